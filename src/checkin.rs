//! Check-in Workflow
//!
//! One check-in runs three stages against the memory store:
//!
//! 1. **Intake**: record cycle info (or reuse what is stored), compute the
//!    phase and append the mood log
//! 2. **Analysis**: analyze recent history, store newly found patterns and
//!    scan the entry for crisis language
//! 3. **Wellness**: generate phase, mood and symptom recommendations

use crate::analysis::{AnalysisOutcome, PatternAnalyzer};
use crate::config::{Config, StoreConfig};
use crate::cycle::{parse_date, CycleCalculator, CycleError, CycleStatus};
use crate::recommend::{RecommendationGenerator, RecommendationReport};
use crate::safety::{CrisisAssessment, CrisisDetector, CrisisResource};
use crate::store::{MemoryStore, MoodLogEntry, MoodLogQuery, NewMoodLog, StoreError};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckInError {
    #[error("No cycle information for user {0}; provide last_period_date")]
    NoCycleInfo(String),

    #[error("Mood is required")]
    MissingMood,

    #[error(transparent)]
    Cycle(#[from] CycleError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type CheckInResult<T> = Result<T, CheckInError>;

/// Input for a check-in
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CheckInRequest {
    /// New last period date (YYYY-MM-DD); stored info is used when absent
    #[serde(default)]
    pub last_period_date: Option<String>,
    #[serde(default)]
    pub cycle_length: Option<i64>,
    pub mood: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Date of the entry (YYYY-MM-DD), today when absent
    #[serde(default)]
    pub date: Option<String>,
}

impl CheckInRequest {
    pub fn new(mood: impl Into<String>) -> Self {
        Self {
            mood: mood.into(),
            ..Default::default()
        }
    }

    pub fn last_period(mut self, date: impl Into<String>, cycle_length: Option<i64>) -> Self {
        self.last_period_date = Some(date.into());
        self.cycle_length = cycle_length;
        self
    }

    pub fn symptom(mut self, symptom: impl Into<String>) -> Self {
        self.symptoms.push(symptom.into());
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }
}

/// Everything produced by a check-in
#[derive(Debug, Clone, Serialize)]
pub struct CheckInReport {
    pub crisis_flagged: bool,
    /// Listed first so a flagged report leads with help
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub crisis_resources: Vec<CrisisResource>,
    pub user_id: String,
    pub cycle: CycleStatus,
    pub mood_log: MoodLogEntry,
    /// True when this was the user's first mood log
    pub first_entry: bool,
    pub analysis: AnalysisOutcome,
    /// Patterns newly written to the store by this check-in
    pub patterns_stored: usize,
    pub crisis: CrisisAssessment,
    pub recommendations: RecommendationReport,
}

/// Result of re-analyzing stored history
#[derive(Debug, Clone, Serialize)]
pub struct PatternRefresh {
    pub analysis: AnalysisOutcome,
    pub patterns_stored: usize,
}

/// Runs check-ins against a shared store
#[derive(Debug, Clone)]
pub struct CheckInService {
    store: Arc<MemoryStore>,
    calculator: CycleCalculator,
    analyzer: PatternAnalyzer,
    generator: RecommendationGenerator,
    detector: CrisisDetector,
    analysis_window: usize,
}

impl CheckInService {
    pub fn new(
        store: Arc<MemoryStore>,
        calculator: CycleCalculator,
        store_config: &StoreConfig,
    ) -> Self {
        Self {
            store,
            calculator,
            analyzer: PatternAnalyzer::new(),
            generator: RecommendationGenerator::new(),
            detector: CrisisDetector::new(),
            analysis_window: store_config.analysis_window.max(1),
        }
    }

    pub fn from_config(store: Arc<MemoryStore>, config: &Config) -> Self {
        Self::new(store, CycleCalculator::from_config(&config.cycle), &config.store)
    }

    pub fn store(&self) -> &Arc<MemoryStore> {
        &self.store
    }

    /// Run a check-in dated by the request, or the local date
    pub async fn check_in(
        &self,
        user_id: &str,
        request: CheckInRequest,
    ) -> CheckInResult<CheckInReport> {
        let today = match request.date.as_deref() {
            Some(date) => parse_date(date)?,
            None => Local::now().date_naive(),
        };
        self.check_in_on(user_id, request, today).await
    }

    /// Run a check-in as of `today`
    pub async fn check_in_on(
        &self,
        user_id: &str,
        request: CheckInRequest,
        today: NaiveDate,
    ) -> CheckInResult<CheckInReport> {
        let mood = request.mood.trim().to_string();
        if mood.is_empty() {
            return Err(CheckInError::MissingMood);
        }

        // Intake
        tracing::info!(user_id, stage = "intake", "Check-in stage started");
        let cycle = self.resolve_cycle(user_id, &request, today).await?;
        let first_entry = self
            .store
            .get_mood_logs(user_id, &MoodLogQuery::new().limit(1))
            .await
            .is_empty();

        let mut log = NewMoodLog::new(today, cycle.current_phase, mood.as_str())
            .symptoms(request.symptoms.iter().cloned());
        if let Some(notes) = &request.notes {
            log = log.notes(notes.as_str());
        }
        let mood_log = self.store.add_mood_log(user_id, log).await?;
        tracing::info!(
            user_id,
            stage = "intake",
            phase = %cycle.current_phase,
            first_entry,
            "Check-in stage complete"
        );

        // Analysis
        tracing::info!(user_id, stage = "analysis", "Check-in stage started");
        let PatternRefresh {
            analysis,
            patterns_stored,
        } = self.refresh_patterns(user_id).await?;

        let texts = std::iter::once(mood_log.mood.as_str())
            .chain(mood_log.symptoms.iter().map(String::as_str))
            .chain(mood_log.notes.as_deref());
        let crisis = self.detector.assess(texts);
        tracing::info!(
            user_id,
            stage = "analysis",
            status = analysis.status(),
            patterns = analysis.patterns().len(),
            patterns_stored,
            crisis_flagged = crisis.flagged,
            "Check-in stage complete"
        );

        // Wellness
        tracing::info!(user_id, stage = "wellness", "Check-in stage started");
        let recommendations =
            self.generator
                .generate(cycle.current_phase.as_str(), &mood, &mood_log.symptoms);
        tracing::info!(
            user_id,
            stage = "wellness",
            categories = recommendations.recommendations.len(),
            "Check-in stage complete"
        );

        Ok(CheckInReport {
            crisis_flagged: crisis.flagged,
            crisis_resources: crisis.resources.clone(),
            user_id: user_id.to_string(),
            cycle,
            mood_log,
            first_entry,
            analysis,
            patterns_stored,
            crisis,
            recommendations,
        })
    }

    /// Store the request's cycle info if it carries any, then compute the
    /// status from whatever is now on record
    async fn resolve_cycle(
        &self,
        user_id: &str,
        request: &CheckInRequest,
        today: NaiveDate,
    ) -> CheckInResult<CycleStatus> {
        let stored = self.store.get_cycle_info(user_id).await;

        let info = match (request.last_period_date.as_deref(), stored) {
            (Some(date), stored) => {
                let last_period = parse_date(date)?;
                let length = match (request.cycle_length, &stored) {
                    (None, Some(info)) => info.cycle_length,
                    (length, _) => self.calculator.validate_length(length)?,
                };
                self.store
                    .store_cycle_info(user_id, last_period, length)
                    .await?
            }
            (None, Some(info)) => match request.cycle_length {
                Some(length) => {
                    let length = self.calculator.validate_length(Some(length))?;
                    self.store
                        .store_cycle_info(user_id, info.last_period_date, length)
                        .await?
                }
                None => info,
            },
            (None, None) => return Err(CheckInError::NoCycleInfo(user_id.to_string())),
        };

        Ok(self
            .calculator
            .status_for(info.last_period_date, info.cycle_length, today)?)
    }

    /// Analyze the user's recent mood history and store any new findings
    pub async fn refresh_patterns(&self, user_id: &str) -> CheckInResult<PatternRefresh> {
        let history = self
            .store
            .get_mood_logs(user_id, &MoodLogQuery::new().limit(self.analysis_window))
            .await;
        let analysis = self.analyzer.analyze_entries(&history);
        let patterns_stored = self.store_new_patterns(user_id, &analysis).await?;

        Ok(PatternRefresh {
            analysis,
            patterns_stored,
        })
    }

    /// Store findings not already on record (same kind and description)
    async fn store_new_patterns(
        &self,
        user_id: &str,
        analysis: &AnalysisOutcome,
    ) -> CheckInResult<usize> {
        let mut stored = 0;
        for finding in analysis.patterns() {
            let known = self.store.get_patterns(user_id, Some(finding.kind())).await;
            if known.iter().any(|p| p.description == finding.insight()) {
                continue;
            }
            self.store
                .store_pattern(user_id, finding.kind(), finding.insight(), finding.data())
                .await?;
            stored += 1;
        }
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::CyclePhase;
    use crate::recommend::CategoryKind;

    fn service() -> CheckInService {
        CheckInService::from_config(Arc::new(MemoryStore::new()), &Config::default())
    }

    fn day(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[tokio::test]
    async fn test_first_check_in() {
        let service = service();
        let request = CheckInRequest::new("Anxious")
            .last_period("2025-11-18", Some(28))
            .symptom("cramps");

        let report = service
            .check_in_on("alice", request, day("2025-11-23"))
            .await
            .unwrap();

        assert!(report.first_entry);
        assert!(!report.crisis_flagged);
        assert_eq!(report.cycle.current_phase, CyclePhase::Menstrual);
        assert_eq!(report.cycle.day_in_cycle, 5);
        assert_eq!(report.mood_log.cycle_phase, CyclePhase::Menstrual);
        assert_eq!(report.mood_log.date, day("2025-11-23"));
        assert!(report.analysis.is_success());
        assert!(report
            .recommendations
            .category(CategoryKind::PhaseBased)
            .is_some());

        let info = service.store().get_cycle_info("alice").await.unwrap();
        assert_eq!(info.last_period_date, day("2025-11-18"));
    }

    #[tokio::test]
    async fn test_reuses_stored_cycle_info() {
        let service = service();
        service
            .check_in_on(
                "bob",
                CheckInRequest::new("calm").last_period("2025-11-01", Some(30)),
                day("2025-11-02"),
            )
            .await
            .unwrap();

        let report = service
            .check_in_on("bob", CheckInRequest::new("tired"), day("2025-11-20"))
            .await
            .unwrap();

        assert!(!report.first_entry);
        assert_eq!(report.cycle.cycle_length, 30);
        assert_eq!(report.cycle.day_in_cycle, 19);
        assert_eq!(report.cycle.current_phase, CyclePhase::Luteal);
    }

    #[tokio::test]
    async fn test_missing_cycle_info() {
        let err = service()
            .check_in("nobody", CheckInRequest::new("calm").on("2025-11-20"))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckInError::NoCycleInfo(user) if user == "nobody"));
    }

    #[tokio::test]
    async fn test_rejects_blank_mood_and_bad_date() {
        let service = service();

        let err = service
            .check_in_on("carol", CheckInRequest::new("  "), day("2025-11-20"))
            .await
            .unwrap_err();
        assert!(matches!(err, CheckInError::MissingMood));

        let err = service
            .check_in(
                "carol",
                CheckInRequest::new("calm").last_period("Nov 1", None),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CheckInError::Cycle(CycleError::InvalidDate(_))));
        assert!(service.store().get_cycle_info("carol").await.is_none());
    }

    #[tokio::test]
    async fn test_crisis_language_flags_report() {
        let report = service()
            .check_in_on(
                "dana",
                CheckInRequest::new("sad")
                    .last_period("2025-11-01", None)
                    .notes("Feeling hopeless lately"),
                day("2025-11-20"),
            )
            .await
            .unwrap();

        assert!(report.crisis_flagged);
        assert_eq!(report.crisis.indicators, vec!["hopeless"]);
        assert_eq!(report.crisis_resources.len(), 3);

        let body = serde_json::to_string(&report).unwrap();
        assert!(
            body.starts_with(r#"{"crisis_flagged":true,"crisis_resources":[{"name":"#),
            "{body}"
        );
    }

    #[tokio::test]
    async fn test_patterns_stored_once() {
        let service = service();
        let start = CheckInRequest::new("irritable")
            .last_period("2025-11-01", None)
            .symptom("bloating");

        service
            .check_in_on("erin", start, day("2025-11-20"))
            .await
            .unwrap();
        let second = service
            .check_in_on(
                "erin",
                CheckInRequest::new("irritable").symptom("bloating"),
                day("2025-11-21"),
            )
            .await
            .unwrap();
        let third = service
            .check_in_on(
                "erin",
                CheckInRequest::new("irritable").symptom("bloating"),
                day("2025-11-22"),
            )
            .await
            .unwrap();

        // phase-mood and bloating patterns are new; the trend was stored on day one
        assert_eq!(second.patterns_stored, 2);
        // only the bloating count changed
        assert_eq!(third.patterns_stored, 1);

        let descriptions: Vec<String> = service
            .store()
            .get_patterns("erin", None)
            .await
            .into_iter()
            .map(|p| format!("{}:{}", p.kind, p.description))
            .collect();
        let unique: std::collections::HashSet<&String> = descriptions.iter().collect();
        assert_eq!(unique.len(), descriptions.len());
        assert!(third.analysis.is_success());
    }
}
