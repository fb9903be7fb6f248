//! Pattern Analyzer
//!
//! Mines mood log history for three kinds of pattern:
//!
//! 1. Phase-mood correlation: the most frequent mood within each phase
//! 2. Symptom frequency: the most frequently logged symptoms
//! 3. Overall trend: whether negative or positive moods dominate
//!
//! Every call recomputes from its input; no state is kept between calls.

use crate::analysis::sentiment::Sentiment;
use crate::cycle::CyclePhase;
use crate::store::{MoodLogEntry, PatternKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Number of top symptoms considered for symptom patterns
const TOP_SYMPTOMS: usize = 3;
/// One side must outnumber the other by this factor to form a trend
const TREND_RATIO: f64 = 1.5;

const NO_DATA_MESSAGE: &str = "No mood data available yet. Keep logging to see patterns!";

/// One mood log as read by the analyzer.
///
/// Every field is optional so partially filled records from callers are
/// still usable.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct MoodRecord {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub cycle_phase: Option<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl MoodRecord {
    fn phase(&self) -> Option<CyclePhase> {
        self.cycle_phase.as_deref().and_then(|p| p.parse().ok())
    }

    /// Case-folded mood, `None` when blank
    fn mood_key(&self) -> Option<String> {
        self.mood
            .as_deref()
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty())
    }
}

impl From<&MoodLogEntry> for MoodRecord {
    fn from(entry: &MoodLogEntry) -> Self {
        Self {
            date: Some(entry.date.to_string()),
            cycle_phase: Some(entry.cycle_phase.to_string()),
            mood: Some(entry.mood.clone()),
            symptoms: entry.symptoms.clone(),
            notes: entry.notes.clone(),
        }
    }
}

/// Direction of the overall mood trend
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    PredominantlyNegative,
    PredominantlyPositive,
}

/// A pattern detected in mood history
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PatternFinding {
    PhaseMoodCorrelation {
        phase: CyclePhase,
        mood: String,
        frequency: usize,
        insight: String,
    },
    SymptomPattern {
        symptom: String,
        frequency: usize,
        insight: String,
    },
    OverallTrend {
        trend: Trend,
        insight: String,
    },
}

impl PatternFinding {
    pub fn kind(&self) -> PatternKind {
        match self {
            PatternFinding::PhaseMoodCorrelation { .. } => PatternKind::PhaseMoodCorrelation,
            PatternFinding::SymptomPattern { .. } => PatternKind::SymptomPattern,
            PatternFinding::OverallTrend { .. } => PatternKind::OverallTrend,
        }
    }

    pub fn insight(&self) -> &str {
        match self {
            PatternFinding::PhaseMoodCorrelation { insight, .. }
            | PatternFinding::SymptomPattern { insight, .. }
            | PatternFinding::OverallTrend { insight, .. } => insight,
        }
    }

    /// Attributes of the finding without its type tag and insight text,
    /// in the shape the memory store keeps as pattern data
    pub fn data(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(mut map)) => {
                map.remove("type");
                map.remove("insight");
                map
            }
            _ => Map::new(),
        }
    }
}

/// Successful analysis result
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PatternReport {
    pub total_logs_analyzed: usize,
    pub patterns_found: Vec<PatternFinding>,
    pub summary: String,
}

/// Outcome of a pattern analysis
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisOutcome {
    Success(PatternReport),
    NoData {
        message: String,
        patterns_found: Vec<PatternFinding>,
    },
    Error {
        error_message: String,
        patterns_found: Vec<PatternFinding>,
    },
}

impl AnalysisOutcome {
    fn no_data() -> Self {
        AnalysisOutcome::NoData {
            message: NO_DATA_MESSAGE.to_string(),
            patterns_found: Vec::new(),
        }
    }

    fn error(message: impl std::fmt::Display) -> Self {
        AnalysisOutcome::Error {
            error_message: format!("Error analyzing patterns: {}", message),
            patterns_found: Vec::new(),
        }
    }

    /// Patterns found (empty unless successful)
    pub fn patterns(&self) -> &[PatternFinding] {
        match self {
            AnalysisOutcome::Success(report) => &report.patterns_found,
            AnalysisOutcome::NoData { patterns_found, .. }
            | AnalysisOutcome::Error { patterns_found, .. } => patterns_found,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisOutcome::Success(_))
    }

    pub fn status(&self) -> &'static str {
        match self {
            AnalysisOutcome::Success(_) => "success",
            AnalysisOutcome::NoData { .. } => "no_data",
            AnalysisOutcome::Error { .. } => "error",
        }
    }
}

/// Detects patterns in mood history
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternAnalyzer;

impl PatternAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyze stored mood log entries
    pub fn analyze_entries(&self, entries: &[MoodLogEntry]) -> AnalysisOutcome {
        let records: Vec<MoodRecord> = entries.iter().map(MoodRecord::from).collect();
        self.analyze(&records)
    }

    /// Analyze a JSON document holding a list of mood records.
    ///
    /// Text that does not parse is treated as no data.
    pub fn analyze_json(&self, text: &str) -> AnalysisOutcome {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => self.analyze_value(&value),
            Err(e) => {
                tracing::debug!(error = %e, "Mood logs are not valid JSON, treating as no data");
                AnalysisOutcome::no_data()
            }
        }
    }

    /// Analyze mood logs given as a JSON list, or as a string containing one.
    ///
    /// Any other value is treated as no data. A list element that is not a
    /// mood record yields an error outcome.
    pub fn analyze_value(&self, input: &Value) -> AnalysisOutcome {
        let items = match input {
            Value::String(text) => return self.analyze_json(text),
            Value::Array(items) => items,
            _ => return AnalysisOutcome::no_data(),
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match MoodRecord::deserialize(item) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Malformed mood record");
                    return AnalysisOutcome::error(format!("entry {}: {}", index, e));
                }
            }
        }

        self.analyze(&records)
    }

    /// Run all detectors over the records
    pub fn analyze(&self, records: &[MoodRecord]) -> AnalysisOutcome {
        if records.is_empty() {
            return AnalysisOutcome::no_data();
        }

        let mut patterns = phase_mood_correlations(records);
        patterns.extend(symptom_patterns(records));
        patterns.extend(overall_trend(records));

        let summary = format!(
            "Analyzed {} mood logs and found {} patterns.",
            records.len(),
            patterns.len()
        );

        tracing::debug!(
            total_logs = records.len(),
            patterns = patterns.len(),
            "Pattern analysis complete"
        );

        AnalysisOutcome::Success(PatternReport {
            total_logs_analyzed: records.len(),
            patterns_found: patterns,
            summary,
        })
    }
}

/// Count occurrences, keeping first-seen order
fn tally<'a>(items: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(seen, _)| *seen == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item, 1)),
        }
    }
    counts
}

/// Most frequent item; ties go to the first one seen
fn mode<'a>(items: impl IntoIterator<Item = &'a str>) -> Option<(&'a str, usize)> {
    tally(items)
        .into_iter()
        .fold(None, |best, (item, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((item, count)),
        })
}

fn phase_mood_correlations(records: &[MoodRecord]) -> Vec<PatternFinding> {
    let keyed: Vec<(CyclePhase, String)> = records
        .iter()
        .filter_map(|r| Some((r.phase()?, r.mood_key()?)))
        .collect();

    let mut findings = Vec::new();
    for &phase in CyclePhase::all() {
        let moods = keyed
            .iter()
            .filter(|(p, _)| *p == phase)
            .map(|(_, mood)| mood.as_str());

        if let Some((mood, frequency)) = mode(moods) {
            if frequency > 1 {
                findings.push(PatternFinding::PhaseMoodCorrelation {
                    phase,
                    mood: mood.to_string(),
                    frequency,
                    insight: format!("You tend to feel {} during your {} phase.", mood, phase),
                });
            }
        }
    }
    findings
}

fn symptom_patterns(records: &[MoodRecord]) -> Vec<PatternFinding> {
    let symptoms: Vec<String> = records
        .iter()
        .flat_map(|r| r.symptoms.iter())
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    let mut counts = tally(symptoms.iter().map(String::as_str));
    // Stable sort keeps first-appearance order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    counts
        .into_iter()
        .take(TOP_SYMPTOMS)
        .filter(|(_, count)| *count > 1)
        .map(|(symptom, frequency)| PatternFinding::SymptomPattern {
            symptom: symptom.to_string(),
            frequency,
            insight: format!(
                "{} appears frequently in your logs ({} times).",
                capitalize(symptom),
                frequency
            ),
        })
        .collect()
}

fn overall_trend(records: &[MoodRecord]) -> Option<PatternFinding> {
    let (mut negative, mut positive) = (0usize, 0usize);
    for mood in records.iter().filter_map(MoodRecord::mood_key) {
        match Sentiment::of(&mood) {
            Sentiment::Negative => negative += 1,
            Sentiment::Positive => positive += 1,
            Sentiment::Neutral => {}
        }
    }

    if negative as f64 > positive as f64 * TREND_RATIO {
        Some(PatternFinding::OverallTrend {
            trend: Trend::PredominantlyNegative,
            insight: "Your logs show more challenging moods. Consider discussing with a healthcare provider.".to_string(),
        })
    } else if positive as f64 > negative as f64 * TREND_RATIO {
        Some(PatternFinding::OverallTrend {
            trend: Trend::PredominantlyPositive,
            insight: "Your mood logs show many positive moments! Keep up the self-care.".to_string(),
        })
    } else {
        None
    }
}

/// Upper-case the first character, lower-case the rest
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(phase: &str, mood: &str, symptoms: &[&str]) -> MoodRecord {
        MoodRecord {
            date: None,
            cycle_phase: Some(phase.to_string()),
            mood: Some(mood.to_string()),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            notes: None,
        }
    }

    fn sample_logs() -> Value {
        json!([
            {"date": "2025-11-10", "cycle_phase": "Luteal", "mood": "anxious", "symptoms": ["cramps", "fatigue"]},
            {"date": "2025-11-15", "cycle_phase": "Luteal", "mood": "irritable", "symptoms": ["headache", "fatigue"]},
            {"date": "2025-11-20", "cycle_phase": "Menstrual", "mood": "tired", "symptoms": ["cramps"]},
            {"date": "2025-11-25", "cycle_phase": "Follicular", "mood": "energetic", "symptoms": []}
        ])
    }

    #[test]
    fn test_empty_input_is_no_data() {
        let analyzer = PatternAnalyzer::new();

        for input in [json!([]), json!(null), json!(42), json!({"mood": "sad"})] {
            let outcome = analyzer.analyze_value(&input);
            assert_eq!(outcome.status(), "no_data", "input {input}");
            assert!(outcome.patterns().is_empty());
        }
    }

    #[test]
    fn test_malformed_json_is_no_data() {
        let analyzer = PatternAnalyzer::new();

        assert_eq!(analyzer.analyze_json("not json at all").status(), "no_data");
        assert_eq!(analyzer.analyze_json("[").status(), "no_data");
        assert_eq!(analyzer.analyze_value(&json!("[]")).status(), "no_data");
    }

    #[test]
    fn test_non_record_element_is_error() {
        let analyzer = PatternAnalyzer::new();
        let outcome = analyzer.analyze_value(&json!([{"mood": "sad"}, "oops"]));

        match outcome {
            AnalysisOutcome::Error { error_message, patterns_found } => {
                assert!(error_message.starts_with("Error analyzing patterns"));
                assert!(patterns_found.is_empty());
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[test]
    fn test_reference_logs() {
        let analyzer = PatternAnalyzer::new();
        let outcome = analyzer.analyze_value(&sample_logs());

        let AnalysisOutcome::Success(report) = outcome else {
            panic!("expected success");
        };
        assert_eq!(report.total_logs_analyzed, 4);

        // Luteal has two different moods, each seen once: no correlation
        assert!(report
            .patterns_found
            .iter()
            .all(|p| p.kind() != PatternKind::PhaseMoodCorrelation));

        // cramps(2) and fatigue(2) qualify, headache(1) does not
        let symptoms: Vec<(&str, usize)> = report
            .patterns_found
            .iter()
            .filter_map(|p| match p {
                PatternFinding::SymptomPattern { symptom, frequency, .. } => {
                    Some((symptom.as_str(), *frequency))
                }
                _ => None,
            })
            .collect();
        assert_eq!(symptoms, vec![("cramps", 2), ("fatigue", 2)]);

        // anxious + irritable against energetic: 2 > 1 * 1.5
        assert_eq!(
            report.patterns_found.last().map(PatternFinding::kind),
            Some(PatternKind::OverallTrend)
        );
        assert!(matches!(
            report.patterns_found.last(),
            Some(PatternFinding::OverallTrend { trend: Trend::PredominantlyNegative, .. })
        ));

        assert_eq!(report.summary, "Analyzed 4 mood logs and found 3 patterns.");
    }

    #[test]
    fn test_string_input_is_parsed() {
        let analyzer = PatternAnalyzer::new();
        let text = sample_logs().to_string();

        assert_eq!(
            analyzer.analyze_value(&Value::String(text.clone())),
            analyzer.analyze_value(&sample_logs())
        );
        assert_eq!(analyzer.analyze_json(&text).status(), "success");
    }

    #[test]
    fn test_phase_mood_correlation_fires_on_repeat() {
        let records = vec![
            record("Luteal", "Anxious", &[]),
            record("luteal", "anxious", &[]),
            record("Luteal", "sad", &[]),
            record("Menstrual", "tired", &[]),
        ];

        let outcome = PatternAnalyzer::new().analyze(&records);
        let first = &outcome.patterns()[0];
        assert_eq!(
            first,
            &PatternFinding::PhaseMoodCorrelation {
                phase: CyclePhase::Luteal,
                mood: "anxious".to_string(),
                frequency: 2,
                insight: "You tend to feel anxious during your Luteal phase.".to_string(),
            }
        );
    }

    #[test]
    fn test_mode_tie_breaks_on_first_seen() {
        let records = vec![
            record("Follicular", "happy", &[]),
            record("Follicular", "calm", &[]),
            record("Follicular", "calm", &[]),
            record("Follicular", "happy", &[]),
        ];

        let outcome = PatternAnalyzer::new().analyze(&records);
        match &outcome.patterns()[0] {
            PatternFinding::PhaseMoodCorrelation { mood, frequency, .. } => {
                assert_eq!(mood, "happy");
                assert_eq!(*frequency, 2);
            }
            other => panic!("unexpected finding {other:?}"),
        }
    }

    #[test]
    fn test_correlations_follow_phase_order() {
        let records = vec![
            record("Luteal", "sad", &[]),
            record("Luteal", "sad", &[]),
            record("Menstrual", "tired", &[]),
            record("Menstrual", "tired", &[]),
        ];

        let outcome = PatternAnalyzer::new().analyze(&records);
        let phases: Vec<CyclePhase> = outcome
            .patterns()
            .iter()
            .filter_map(|p| match p {
                PatternFinding::PhaseMoodCorrelation { phase, .. } => Some(*phase),
                _ => None,
            })
            .collect();
        assert_eq!(phases, vec![CyclePhase::Menstrual, CyclePhase::Luteal]);
    }

    #[test]
    fn test_top_three_symptoms_only() {
        let records = vec![
            record("Luteal", "ok", &["bloating", "acne", "cramps", "headache"]),
            record("Luteal", "ok", &["bloating", "acne", "cramps", "headache"]),
            record("Luteal", "ok", &["Cramps", "headache"]),
        ];

        let outcome = PatternAnalyzer::new().analyze(&records);
        let symptoms: Vec<&str> = outcome
            .patterns()
            .iter()
            .filter_map(|p| match p {
                PatternFinding::SymptomPattern { symptom, .. } => Some(symptom.as_str()),
                _ => None,
            })
            .collect();

        // cramps(3), headache(3), then bloating wins the tie with acne
        assert_eq!(symptoms, vec!["cramps", "headache", "bloating"]);
    }

    #[test]
    fn test_symptom_insight_capitalizes() {
        let records = vec![
            record("Luteal", "ok", &["breast_tenderness"]),
            record("Menstrual", "fine", &["Breast_Tenderness"]),
        ];

        let outcome = PatternAnalyzer::new().analyze(&records);
        assert_eq!(outcome.patterns().len(), 1);

        let finding = outcome
            .patterns()
            .iter()
            .find(|p| p.kind() == PatternKind::SymptomPattern)
            .unwrap();
        assert_eq!(
            finding.insight(),
            "Breast_tenderness appears frequently in your logs (2 times)."
        );
    }

    #[test]
    fn test_overall_trends() {
        let negative = vec![
            record("Luteal", "sad", &[]),
            record("Menstrual", "angry", &[]),
            record("Follicular", "happy", &[]),
        ];
        let outcome = PatternAnalyzer::new().analyze(&negative);
        assert!(outcome.patterns().iter().any(|p| matches!(
            p,
            PatternFinding::OverallTrend { trend: Trend::PredominantlyNegative, .. }
        )));

        let positive = vec![record("Follicular", "Happy", &[]), record("Ovulation", "calm", &[])];
        let outcome = PatternAnalyzer::new().analyze(&positive);
        assert!(outcome.patterns().iter().any(|p| matches!(
            p,
            PatternFinding::OverallTrend { trend: Trend::PredominantlyPositive, .. }
        )));

        let neutral = vec![record("Luteal", "tired", &[]), record("Luteal", "hungry", &[])];
        let outcome = PatternAnalyzer::new().analyze(&neutral);
        assert!(outcome.patterns().is_empty());
    }

    #[test]
    fn test_trend_ratio_is_strict() {
        // 3 negative vs 2 positive is exactly 1.5x and yields no trend
        let records = vec![
            record("Menstrual", "sad", &[]),
            record("Follicular", "anxious", &[]),
            record("Ovulation", "irritable", &[]),
            record("Luteal", "happy", &[]),
            record("Menstrual", "calm", &[]),
        ];

        let outcome = PatternAnalyzer::new().analyze(&records);
        assert!(outcome.is_success());
        assert!(!outcome
            .patterns()
            .iter()
            .any(|p| matches!(p, PatternFinding::OverallTrend { .. })));

        let mut tipped = records;
        tipped.push(record("Luteal", "angry", &[]));
        let outcome = PatternAnalyzer::new().analyze(&tipped);
        assert!(outcome.patterns().iter().any(|p| matches!(
            p,
            PatternFinding::OverallTrend { trend: Trend::PredominantlyNegative, .. }
        )));
    }

    #[test]
    fn test_unknown_phase_and_blank_mood_are_ignored_by_correlation() {
        let records = vec![
            record("Winter", "sad", &[]),
            record("Winter", "sad", &[]),
            record("Luteal", "  ", &[]),
            record("Luteal", "", &[]),
        ];

        let outcome = PatternAnalyzer::new().analyze(&records);
        assert!(outcome
            .patterns()
            .iter()
            .all(|p| p.kind() != PatternKind::PhaseMoodCorrelation));
        // The sad moods still count towards the overall trend
        assert_eq!(outcome.patterns().len(), 1);
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let analyzer = PatternAnalyzer::new();
        let input = sample_logs();
        assert_eq!(analyzer.analyze_value(&input), analyzer.analyze_value(&input));
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = PatternAnalyzer::new().analyze_value(&sample_logs());
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["total_logs_analyzed"], 4);
        assert_eq!(json["patterns_found"][0]["type"], "symptom_pattern");
        assert_eq!(json["patterns_found"][0]["symptom"], "cramps");

        let json = serde_json::to_value(PatternAnalyzer::new().analyze(&[])).unwrap();
        assert_eq!(json["status"], "no_data");
        assert_eq!(json["patterns_found"], json!([]));
    }

    #[test]
    fn test_finding_data_excludes_type_and_insight() {
        let finding = PatternFinding::SymptomPattern {
            symptom: "cramps".to_string(),
            frequency: 3,
            insight: "Cramps appears frequently".to_string(),
        };

        let data = finding.data();
        assert_eq!(data.get("symptom"), Some(&json!("cramps")));
        assert_eq!(data.get("frequency"), Some(&json!(3)));
        assert!(!data.contains_key("type"));
        assert!(!data.contains_key("insight"));
    }
}
