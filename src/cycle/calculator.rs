//! Cycle Calculator
//!
//! Derives the current cycle phase and next-period prediction from the
//! start date of the last period and the average cycle length.

use crate::config::CycleConfig;
use crate::cycle::error::{CycleError, CycleResult};
use crate::cycle::phase::CyclePhase;
use chrono::{Duration, Local, NaiveDate};
use serde::Serialize;
use std::ops::RangeInclusive;

/// Date format accepted for all calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(value: &str) -> CycleResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| CycleError::InvalidDate(e.to_string()))
}

/// Where a user currently is in their cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleStatus {
    /// Phase derived from `day_in_cycle`
    pub current_phase: CyclePhase,
    /// Human-readable description of the phase
    pub phase_description: String,
    /// 0-based day within the current cycle, always in `[0, cycle_length)`
    pub day_in_cycle: u32,
    /// Days since the last period started (negative for future dates)
    pub days_since_last_period: i64,
    /// Last period date plus one cycle length
    pub next_period_date: NaiveDate,
    /// Days until `next_period_date` (negative when overdue)
    pub days_until_next_period: i64,
    /// Cycle length used for the calculation
    pub cycle_length: u32,
}

/// Computes cycle phases
#[derive(Debug, Clone)]
pub struct CycleCalculator {
    default_length: u32,
    typical_range: RangeInclusive<u32>,
}

impl Default for CycleCalculator {
    fn default() -> Self {
        Self {
            default_length: 28,
            typical_range: 21..=45,
        }
    }
}

impl CycleCalculator {
    /// Create a calculator with a default cycle length and the range of
    /// lengths considered typical (values outside it are accepted but logged)
    pub fn new(default_length: u32, typical_range: RangeInclusive<u32>) -> Self {
        Self {
            default_length: default_length.max(1),
            typical_range,
        }
    }

    pub fn from_config(config: &CycleConfig) -> Self {
        Self::new(
            config.default_length,
            config.typical_min..=config.typical_max,
        )
    }

    /// Cycle length used when the caller does not supply one
    pub fn default_length(&self) -> u32 {
        self.default_length
    }

    /// Calculate the cycle status as of the local calendar date
    pub fn calculate(
        &self,
        last_period_date: &str,
        cycle_length: Option<i64>,
    ) -> CycleResult<CycleStatus> {
        self.calculate_on(last_period_date, cycle_length, Local::now().date_naive())
    }

    /// Calculate the cycle status as of `today`
    pub fn calculate_on(
        &self,
        last_period_date: &str,
        cycle_length: Option<i64>,
        today: NaiveDate,
    ) -> CycleResult<CycleStatus> {
        let last_period = parse_date(last_period_date)?;
        let length = self.validate_length(cycle_length)?;
        self.status_for(last_period, length, today)
    }

    /// Calculate the cycle status from an already parsed date
    pub fn status_for(
        &self,
        last_period: NaiveDate,
        cycle_length: u32,
        today: NaiveDate,
    ) -> CycleResult<CycleStatus> {
        if cycle_length == 0 {
            return Err(CycleError::InvalidCycleLength(0));
        }

        let days_since = (today - last_period).num_days();
        // Euclidean modulo keeps future dates inside [0, cycle_length)
        let day_in_cycle = days_since.rem_euclid(i64::from(cycle_length)) as u32;
        let phase = CyclePhase::from_day_in_cycle(day_in_cycle);

        let next_period = last_period
            .checked_add_signed(Duration::days(i64::from(cycle_length)))
            .ok_or_else(|| {
                CycleError::DateOutOfRange(format!(
                    "{} + {} days",
                    last_period, cycle_length
                ))
            })?;
        let days_until = (next_period - today).num_days();

        tracing::debug!(
            last_period = %last_period,
            cycle_length,
            day_in_cycle,
            phase = %phase,
            "Calculated cycle phase"
        );

        Ok(CycleStatus {
            current_phase: phase,
            phase_description: phase.description().to_string(),
            day_in_cycle,
            days_since_last_period: days_since,
            next_period_date: next_period,
            days_until_next_period: days_until,
            cycle_length,
        })
    }

    /// Resolve an optional, caller-supplied cycle length
    pub fn validate_length(&self, cycle_length: Option<i64>) -> CycleResult<u32> {
        let length = match cycle_length {
            None => return Ok(self.default_length),
            Some(l) if l <= 0 => return Err(CycleError::InvalidCycleLength(l)),
            Some(l) => u32::try_from(l).map_err(|_| CycleError::InvalidCycleLength(l))?,
        };

        if !self.typical_range.contains(&length) {
            tracing::warn!(
                cycle_length = length,
                typical_min = *self.typical_range.start(),
                typical_max = *self.typical_range.end(),
                "Cycle length outside the typical range"
            );
        }

        Ok(length)
    }
}
