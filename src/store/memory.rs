//! In-memory store
//!
//! Holds cycle info, mood logs, patterns and preferences for every user of
//! the process. Constructed once and shared through `Arc`; all tables sit
//! behind a single Tokio `RwLock`. Nothing is persisted.

use crate::store::error::{StoreError, StoreResult};
use crate::store::types::{
    CycleInfo, MoodLogEntry, MoodLogQuery, NewMoodLog, Pattern, PatternKind, StoreStats,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    cycle_info: HashMap<String, CycleInfo>,
    mood_logs: Vec<MoodLogEntry>,
    patterns: Vec<Pattern>,
    preferences: HashMap<String, HashMap<String, String>>,
    /// Last timestamp handed out, keeps `logged_at`/`updated_at` monotonic
    last_timestamp: Option<DateTime<Utc>>,
}

impl Tables {
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.last_timestamp {
            Some(prev) if prev > now => prev,
            _ => now,
        };
        self.last_timestamp = Some(ts);
        ts
    }
}

/// Process-wide keyed storage for cycle wellness data
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store (overwrite) the cycle information for a user
    pub async fn store_cycle_info(
        &self,
        user_id: &str,
        last_period_date: NaiveDate,
        cycle_length: u32,
    ) -> StoreResult<CycleInfo> {
        check_user_id(user_id)?;
        if cycle_length == 0 {
            return Err(StoreError::InvalidCycleLength(cycle_length));
        }

        let mut tables = self.tables.write().await;
        let info = CycleInfo {
            last_period_date,
            cycle_length,
            updated_at: tables.next_timestamp(),
        };
        tables.cycle_info.insert(user_id.to_string(), info.clone());

        tracing::info!(
            user_id,
            last_period_date = %last_period_date,
            cycle_length,
            "Cycle data stored"
        );
        Ok(info)
    }

    /// Current cycle information for a user, if any
    pub async fn get_cycle_info(&self, user_id: &str) -> Option<CycleInfo> {
        self.tables.read().await.cycle_info.get(user_id).cloned()
    }

    /// Append a mood log entry.
    ///
    /// Symptoms are de-duplicated case-insensitively, keeping the first
    /// spelling; no other validation is applied.
    pub async fn add_mood_log(&self, user_id: &str, log: NewMoodLog) -> StoreResult<MoodLogEntry> {
        check_user_id(user_id)?;

        let mut seen = HashSet::new();
        let symptoms: Vec<String> = log
            .symptoms
            .into_iter()
            .filter(|s| !s.trim().is_empty())
            .filter(|s| seen.insert(s.trim().to_lowercase()))
            .collect();

        let mut tables = self.tables.write().await;
        let entry = MoodLogEntry {
            user_id: user_id.to_string(),
            date: log.date,
            cycle_phase: log.cycle_phase,
            mood: log.mood,
            symptoms,
            notes: log.notes.filter(|n| !n.trim().is_empty()),
            logged_at: tables.next_timestamp(),
        };
        tables.mood_logs.push(entry.clone());

        tracing::info!(
            user_id,
            date = %entry.date,
            mood = %entry.mood,
            phase = %entry.cycle_phase,
            symptoms = ?entry.symptoms,
            "Mood logged"
        );
        Ok(entry)
    }

    /// Mood logs for a user, newest date first.
    ///
    /// Entries sharing a date keep their insertion order.
    pub async fn get_mood_logs(&self, user_id: &str, query: &MoodLogQuery) -> Vec<MoodLogEntry> {
        let tables = self.tables.read().await;
        let mut logs: Vec<MoodLogEntry> = tables
            .mood_logs
            .iter()
            .filter(|log| log.user_id == user_id)
            .filter(|log| query.phase.map_or(true, |phase| log.cycle_phase == phase))
            .cloned()
            .collect();
        drop(tables);

        logs.sort_by(|a, b| b.date.cmp(&a.date));
        logs.truncate(query.limit);

        tracing::debug!(
            user_id,
            phase = ?query.phase,
            count = logs.len(),
            "Mood logs retrieved"
        );
        logs
    }

    /// Record a derived pattern
    pub async fn store_pattern(
        &self,
        user_id: &str,
        kind: PatternKind,
        description: impl Into<String>,
        data: Map<String, Value>,
    ) -> StoreResult<Pattern> {
        check_user_id(user_id)?;

        let mut tables = self.tables.write().await;
        let pattern = Pattern {
            user_id: user_id.to_string(),
            kind,
            description: description.into(),
            data,
            identified_at: tables.next_timestamp(),
        };
        tables.patterns.push(pattern.clone());

        tracing::info!(
            user_id,
            pattern_type = %kind,
            description = %pattern.description,
            "Pattern identified"
        );
        Ok(pattern)
    }

    /// Stored patterns for a user in insertion order, optionally by kind
    pub async fn get_patterns(&self, user_id: &str, kind: Option<PatternKind>) -> Vec<Pattern> {
        let tables = self.tables.read().await;
        tables
            .patterns
            .iter()
            .filter(|p| p.user_id == user_id)
            .filter(|p| kind.map_or(true, |k| p.kind == k))
            .cloned()
            .collect()
    }

    /// Set a single preference value
    pub async fn set_preference(
        &self,
        user_id: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> StoreResult<()> {
        check_user_id(user_id)?;
        let mut tables = self.tables.write().await;
        tables
            .preferences
            .entry(user_id.to_string())
            .or_default()
            .insert(key.into(), value.into());
        Ok(())
    }

    /// All preferences for a user (empty when none were set)
    pub async fn get_preferences(&self, user_id: &str) -> HashMap<String, String> {
        self.tables
            .read()
            .await
            .preferences
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Remove every record belonging to a user
    pub async fn clear_user(&self, user_id: &str) {
        let mut tables = self.tables.write().await;
        tables.cycle_info.remove(user_id);
        tables.mood_logs.retain(|log| log.user_id != user_id);
        tables.patterns.retain(|p| p.user_id != user_id);
        tables.preferences.remove(user_id);

        tracing::info!(user_id, "All data cleared for user");
    }

    /// Record counts
    pub async fn stats(&self) -> StoreStats {
        let tables = self.tables.read().await;

        let users: HashSet<&str> = tables
            .cycle_info
            .keys()
            .map(String::as_str)
            .chain(tables.mood_logs.iter().map(|l| l.user_id.as_str()))
            .chain(tables.patterns.iter().map(|p| p.user_id.as_str()))
            .chain(tables.preferences.keys().map(String::as_str))
            .collect();

        StoreStats {
            users: users.len(),
            cycle_records: tables.cycle_info.len(),
            mood_logs: tables.mood_logs.len(),
            patterns: tables.patterns.len(),
        }
    }
}

fn check_user_id(user_id: &str) -> StoreResult<()> {
    if user_id.trim().is_empty() {
        Err(StoreError::EmptyUserId)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::CyclePhase;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[tokio::test]
    async fn test_cycle_info_is_overwritten() {
        let store = MemoryStore::new();

        store.store_cycle_info("u1", date("2025-10-20"), 30).await.unwrap();
        store.store_cycle_info("u1", date("2025-11-18"), 28).await.unwrap();

        let info = store.get_cycle_info("u1").await.unwrap();
        assert_eq!(info.last_period_date, date("2025-11-18"));
        assert_eq!(info.cycle_length, 28);
        assert!(store.get_cycle_info("u2").await.is_none());
    }

    #[tokio::test]
    async fn test_cycle_info_validation() {
        let store = MemoryStore::new();

        assert_eq!(
            store.store_cycle_info("", date("2025-11-18"), 28).await.unwrap_err(),
            StoreError::EmptyUserId
        );
        assert_eq!(
            store.store_cycle_info("u1", date("2025-11-18"), 0).await.unwrap_err(),
            StoreError::InvalidCycleLength(0)
        );
    }

    #[tokio::test]
    async fn test_mood_logs_sorted_filtered_and_limited() {
        let store = MemoryStore::new();

        let logs = [
            ("2025-11-10", CyclePhase::Luteal, "anxious"),
            ("2025-11-25", CyclePhase::Follicular, "energetic"),
            ("2025-11-15", CyclePhase::Luteal, "irritable"),
            ("2025-11-20", CyclePhase::Menstrual, "tired"),
            ("2025-11-28", CyclePhase::Luteal, "calm"),
        ];
        for (d, phase, mood) in logs {
            store
                .add_mood_log("u1", NewMoodLog::new(date(d), phase, mood))
                .await
                .unwrap();
        }
        store
            .add_mood_log("u2", NewMoodLog::new(date("2025-11-30"), CyclePhase::Luteal, "sad"))
            .await
            .unwrap();

        let all = store.get_mood_logs("u1", &MoodLogQuery::new()).await;
        assert_eq!(all.len(), 5);
        let dates: Vec<NaiveDate> = all.iter().map(|l| l.date).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);

        let luteal = store
            .get_mood_logs("u1", &MoodLogQuery::new().phase(CyclePhase::Luteal).limit(2))
            .await;
        assert_eq!(luteal.len(), 2);
        assert!(luteal.iter().all(|l| l.cycle_phase == CyclePhase::Luteal));
        assert_eq!(luteal[0].date, date("2025-11-28"));
        assert_eq!(luteal[1].date, date("2025-11-15"));
    }

    #[tokio::test]
    async fn test_same_date_keeps_insertion_order() {
        let store = MemoryStore::new();
        for mood in ["first", "second", "third"] {
            store
                .add_mood_log("u1", NewMoodLog::new(date("2025-11-20"), CyclePhase::Luteal, mood))
                .await
                .unwrap();
        }

        let logs = store.get_mood_logs("u1", &MoodLogQuery::new()).await;
        let moods: Vec<&str> = logs.iter().map(|l| l.mood.as_str()).collect();
        assert_eq!(moods, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_symptoms_deduplicated_with_original_casing() {
        let store = MemoryStore::new();
        let entry = store
            .add_mood_log(
                "u1",
                NewMoodLog::new(date("2025-11-20"), CyclePhase::Luteal, "Anxious")
                    .symptoms(["Cramps", "cramps", " ", "Fatigue"]),
            )
            .await
            .unwrap();

        assert_eq!(entry.mood, "Anxious");
        assert_eq!(entry.symptoms, vec!["Cramps", "Fatigue"]);
    }

    #[tokio::test]
    async fn test_timestamps_are_monotonic() {
        let store = MemoryStore::new();
        let mut previous = None;
        for i in 0..20 {
            let entry = store
                .add_mood_log(
                    "u1",
                    NewMoodLog::new(date("2025-11-20"), CyclePhase::Luteal, format!("m{i}")),
                )
                .await
                .unwrap();
            if let Some(prev) = previous {
                assert!(entry.logged_at >= prev);
            }
            previous = Some(entry.logged_at);
        }
    }

    #[tokio::test]
    async fn test_patterns_filtered_by_kind() {
        let store = MemoryStore::new();
        store
            .store_pattern("u1", PatternKind::PhaseMoodCorrelation, "anxious in luteal", Map::new())
            .await
            .unwrap();
        store
            .store_pattern("u1", PatternKind::SymptomPattern, "cramps", Map::new())
            .await
            .unwrap();
        store
            .store_pattern("u2", PatternKind::SymptomPattern, "acne", Map::new())
            .await
            .unwrap();

        assert_eq!(store.get_patterns("u1", None).await.len(), 2);
        let symptoms = store.get_patterns("u1", Some(PatternKind::SymptomPattern)).await;
        assert_eq!(symptoms.len(), 1);
        assert_eq!(symptoms[0].description, "cramps");
    }

    #[tokio::test]
    async fn test_clear_user_removes_only_that_user() {
        let store = MemoryStore::new();
        store.store_cycle_info("u1", date("2025-11-18"), 28).await.unwrap();
        store.store_cycle_info("u2", date("2025-11-10"), 30).await.unwrap();
        store
            .add_mood_log("u1", NewMoodLog::new(date("2025-11-20"), CyclePhase::Menstrual, "sad"))
            .await
            .unwrap();
        store
            .add_mood_log("u2", NewMoodLog::new(date("2025-11-20"), CyclePhase::Follicular, "happy"))
            .await
            .unwrap();
        store.set_preference("u1", "tone", "gentle").await.unwrap();

        store.clear_user("u1").await;

        assert!(store.get_cycle_info("u1").await.is_none());
        assert!(store.get_mood_logs("u1", &MoodLogQuery::new()).await.is_empty());
        assert!(store.get_preferences("u1").await.is_empty());
        assert!(store.get_cycle_info("u2").await.is_some());
        assert_eq!(store.get_mood_logs("u2", &MoodLogQuery::new()).await.len(), 1);

        let stats = store.stats().await;
        assert_eq!(stats.users, 1);
        assert_eq!(stats.mood_logs, 1);
    }

    #[tokio::test]
    async fn test_preferences() {
        let store = MemoryStore::new();
        store.set_preference("u1", "reminders", "daily").await.unwrap();
        store.set_preference("u1", "reminders", "weekly").await.unwrap();

        let prefs = store.get_preferences("u1").await;
        assert_eq!(prefs.get("reminders").map(String::as_str), Some("weekly"));
        assert!(store.set_preference(" ", "k", "v").await.is_err());
    }
}
