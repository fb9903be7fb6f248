//! Mood sentiment classification

use serde::Serialize;

const NEGATIVE_MOODS: &[&str] = &["anxious", "sad", "irritable", "depressed", "angry", "overwhelmed"];
const POSITIVE_MOODS: &[&str] = &["happy", "energetic", "calm", "content", "peaceful"];

/// Coarse sentiment of a mood label
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    /// Classify a mood label (case-insensitive). Unlisted moods are neutral.
    pub fn of(mood: &str) -> Self {
        let mood = mood.trim().to_lowercase();
        if NEGATIVE_MOODS.contains(&mood.as_str()) {
            Sentiment::Negative
        } else if POSITIVE_MOODS.contains(&mood.as_str()) {
            Sentiment::Positive
        } else {
            Sentiment::Neutral
        }
    }
}
