//! Recommendation Generator
//!
//! Builds phase-, mood- and symptom-specific wellness suggestions from the
//! static tables. Unknown labels are skipped, never rejected.

use crate::cycle::CyclePhase;
use crate::recommend::tables::{phase_guide, Mood, Symptom};
use serde::Serialize;

/// Suggestions taken from the phase and mood tables
const SUGGESTIONS_PER_CATEGORY: usize = 3;
/// Cap on combined symptom relief tips
const MAX_SYMPTOM_TIPS: usize = 4;

const ENCOURAGEMENT: &str = "Remember: You're doing great by tracking your cycle and taking care of yourself. These patterns are normal, and with awareness, you can support yourself through each phase. 💙";
const NOTE: &str =
    "These are general wellness tips. For persistent concerns, please consult a healthcare provider.";

/// Recommendation category
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum CategoryKind {
    #[serde(rename = "Phase-Based")]
    PhaseBased,
    #[serde(rename = "Mood Support")]
    MoodSupport,
    #[serde(rename = "Symptom Relief")]
    SymptomRelief,
}

/// A group of related suggestions
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendationCategory {
    pub category: CategoryKind,
    pub focus: String,
    pub suggestions: Vec<String>,
    /// Things to avoid (phase category only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avoid: Option<Vec<String>>,
}

/// Successful recommendation result
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendationReport {
    /// Phase as supplied by the caller
    pub cycle_phase: String,
    /// Mood, lower-cased
    pub mood: String,
    pub recommendations: Vec<RecommendationCategory>,
    pub encouragement: String,
    pub note: String,
}

impl RecommendationReport {
    pub fn category(&self, kind: CategoryKind) -> Option<&RecommendationCategory> {
        self.recommendations.iter().find(|c| c.category == kind)
    }
}

/// Outcome of a recommendation request
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationOutcome {
    Success(RecommendationReport),
    Error {
        error_message: String,
        recommendations: Vec<RecommendationCategory>,
    },
}

impl RecommendationOutcome {
    pub fn error(message: impl std::fmt::Display) -> Self {
        RecommendationOutcome::Error {
            error_message: format!("Error generating recommendations: {}", message),
            recommendations: Vec::new(),
        }
    }
}

impl From<RecommendationReport> for RecommendationOutcome {
    fn from(report: RecommendationReport) -> Self {
        RecommendationOutcome::Success(report)
    }
}

/// Generates wellness recommendations
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationGenerator;

impl RecommendationGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Build recommendations for a phase, mood and set of symptoms.
    ///
    /// All labels are matched case-insensitively.
    pub fn generate<S: AsRef<str>>(
        &self,
        cycle_phase: &str,
        mood: &str,
        symptoms: &[S],
    ) -> RecommendationReport {
        let mood_label = mood.trim().to_lowercase();
        let mut recommendations = Vec::new();

        if let Ok(phase) = cycle_phase.parse::<CyclePhase>() {
            let guide = phase_guide(phase);
            recommendations.push(RecommendationCategory {
                category: CategoryKind::PhaseBased,
                focus: guide.focus.to_string(),
                suggestions: take_strings(guide.activities, SUGGESTIONS_PER_CATEGORY),
                avoid: Some(take_strings(guide.avoid, guide.avoid.len())),
            });
        }

        if let Some(known) = Mood::parse(&mood_label) {
            recommendations.push(RecommendationCategory {
                category: CategoryKind::MoodSupport,
                focus: format!("Managing {} feelings", mood_label),
                suggestions: take_strings(known.tips(), SUGGESTIONS_PER_CATEGORY),
                avoid: None,
            });
        }

        let relief = symptom_relief(symptoms);
        if !relief.is_empty() {
            recommendations.push(RecommendationCategory {
                category: CategoryKind::SymptomRelief,
                focus: "Physical symptom management".to_string(),
                suggestions: relief,
                avoid: None,
            });
        }

        tracing::info!(
            phase = %cycle_phase,
            mood = %mood_label,
            count = recommendations.len(),
            "Recommendations generated"
        );

        RecommendationReport {
            cycle_phase: cycle_phase.to_string(),
            mood: mood_label,
            recommendations,
            encouragement: ENCOURAGEMENT.to_string(),
            note: NOTE.to_string(),
        }
    }
}

fn take_strings(items: &[&str], n: usize) -> Vec<String> {
    items.iter().take(n).map(|s| s.to_string()).collect()
}

/// Tips for every recognized symptom, de-duplicated in first-seen order
fn symptom_relief<S: AsRef<str>>(symptoms: &[S]) -> Vec<String> {
    let mut tips: Vec<&'static str> = Vec::new();
    for symptom in symptoms.iter().filter_map(|s| Symptom::parse(s.as_ref())) {
        for tip in symptom.tips() {
            if !tips.contains(tip) {
                tips.push(tip);
            }
        }
    }
    take_strings(&tips, MAX_SYMPTOM_TIPS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_luteal_anxious_with_symptoms() {
        let report =
            RecommendationGenerator::new().generate("Luteal", "anxious", &["cramps", "fatigue"]);

        let kinds: Vec<CategoryKind> = report.recommendations.iter().map(|c| c.category).collect();
        assert_eq!(
            kinds,
            vec![
                CategoryKind::PhaseBased,
                CategoryKind::MoodSupport,
                CategoryKind::SymptomRelief
            ]
        );

        let phase = report.category(CategoryKind::PhaseBased).unwrap();
        assert_eq!(phase.focus, "Gentle energy management and self-compassion");
        assert_eq!(phase.suggestions.len(), 3);
        assert_eq!(phase.avoid.as_ref().map(Vec::len), Some(3));

        let mood = report.category(CategoryKind::MoodSupport).unwrap();
        assert_eq!(mood.focus, "Managing anxious feelings");
        assert_eq!(mood.suggestions[0], "Practice deep breathing (4-7-8 technique)");

        let relief = report.category(CategoryKind::SymptomRelief).unwrap();
        let allowed: HashSet<&str> = Symptom::Cramps
            .tips()
            .iter()
            .chain(Symptom::Fatigue.tips())
            .copied()
            .collect();
        let unique: HashSet<&str> = relief.suggestions.iter().map(String::as_str).collect();
        assert!(relief.suggestions.len() <= 4);
        assert_eq!(unique.len(), relief.suggestions.len());
        assert!(unique.is_subset(&allowed));
    }

    #[test]
    fn test_unknown_labels_are_skipped() {
        let report = RecommendationGenerator::new().generate("Autumn", "content", &["insomnia"]);
        assert!(report.recommendations.is_empty());
        assert_eq!(report.cycle_phase, "Autumn");
    }

    #[test]
    fn test_empty_symptoms() {
        let none: [&str; 0] = [];
        let report = RecommendationGenerator::new().generate("follicular", "Energetic", &none);

        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(
            report.recommendations[0].focus,
            "Energy building and new beginnings"
        );
        assert_eq!(report.mood, "energetic");
    }

    #[test]
    fn test_shared_tips_are_deduplicated() {
        // headache, bloating and acne all suggest staying hydrated
        let report = RecommendationGenerator::new().generate(
            "Menstrual",
            "TIRED",
            &["Headache", "bloating", "acne"],
        );

        let relief = report.category(CategoryKind::SymptomRelief).unwrap();
        assert_eq!(
            relief.suggestions,
            vec!["Stay hydrated", "Dim lighting", "Peppermint tea", "Cold compress"]
        );
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome: RecommendationOutcome = RecommendationGenerator::new()
            .generate("Ovulation", "sad", &["acne"])
            .into();
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["recommendations"][0]["category"], "Phase-Based");
        assert!(json["recommendations"][1].get("avoid").is_none());
        assert_eq!(json["recommendations"][2]["category"], "Symptom Relief");

        let json = serde_json::to_value(RecommendationOutcome::error("bad input")).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["recommendations"], serde_json::json!([]));
    }
}
