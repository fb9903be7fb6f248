//! Record types held by the memory store
//!
//! - `CycleInfo`: Current cycle parameters for a user (overwritten on update)
//! - `MoodLogEntry`: One mood/symptom check-in (append-only)
//! - `Pattern`: A derived insight recorded after analysis
//! - `MoodLogQuery`: Filter and limit for mood log retrieval

use crate::cycle::CyclePhase;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

/// Current cycle information for a user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CycleInfo {
    /// First day of the most recent period
    pub last_period_date: NaiveDate,
    /// Average cycle length in days
    pub cycle_length: u32,
    /// When this record was last written
    pub updated_at: DateTime<Utc>,
}

/// A stored mood and symptom log entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodLogEntry {
    pub user_id: String,
    /// Calendar date the entry describes
    pub date: NaiveDate,
    /// Phase the user was in on `date`
    pub cycle_phase: CyclePhase,
    /// Mood label, stored with the casing the user supplied
    pub mood: String,
    /// Symptom labels, unique case-insensitively
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// When the entry was appended
    pub logged_at: DateTime<Utc>,
}

/// A mood log waiting to be appended
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct NewMoodLog {
    pub date: NaiveDate,
    pub cycle_phase: CyclePhase,
    pub mood: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewMoodLog {
    pub fn new(date: NaiveDate, cycle_phase: CyclePhase, mood: impl Into<String>) -> Self {
        Self {
            date,
            cycle_phase,
            mood: mood.into(),
            symptoms: Vec::new(),
            notes: None,
        }
    }

    /// Builder: add a symptom
    pub fn symptom(mut self, symptom: impl Into<String>) -> Self {
        self.symptoms.push(symptom.into());
        self
    }

    /// Builder: add several symptoms
    pub fn symptoms<I, S>(mut self, symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symptoms.extend(symptoms.into_iter().map(Into::into));
        self
    }

    /// Builder: attach free-text notes
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Kind of derived pattern
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// A mood that recurs within one cycle phase
    PhaseMoodCorrelation,
    /// A symptom that appears repeatedly
    SymptomPattern,
    /// Overall balance of positive and negative moods
    OverallTrend,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::PhaseMoodCorrelation => "phase_mood_correlation",
            PatternKind::SymptomPattern => "symptom_pattern",
            PatternKind::OverallTrend => "overall_trend",
        }
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatternKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "phase_mood_correlation" => Ok(PatternKind::PhaseMoodCorrelation),
            "symptom_pattern" => Ok(PatternKind::SymptomPattern),
            "overall_trend" => Ok(PatternKind::OverallTrend),
            other => Err(format!("Unknown pattern type: {}", other)),
        }
    }
}

/// A stored pattern
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pattern {
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: PatternKind,
    /// Human-readable description
    pub description: String,
    /// Attributes of the pattern (phase, mood, frequency, ...)
    #[serde(default)]
    pub data: Map<String, Value>,
    pub identified_at: DateTime<Utc>,
}

/// Filter for mood log retrieval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodLogQuery {
    /// Maximum number of entries returned
    pub limit: usize,
    /// Only return entries logged in this phase
    pub phase: Option<CyclePhase>,
}

impl Default for MoodLogQuery {
    fn default() -> Self {
        Self {
            limit: 30,
            phase: None,
        }
    }
}

impl MoodLogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn phase(mut self, phase: CyclePhase) -> Self {
        self.phase = Some(phase);
        self
    }
}

/// Record counts across all users
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct StoreStats {
    pub users: usize,
    pub cycle_records: usize,
    pub mood_logs: usize,
    pub patterns: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} users, {} cycle records, {} mood logs, {} patterns",
            self.users, self.cycle_records, self.mood_logs, self.patterns
        )
    }
}
