//! Cycle phases
//!
//! The four segments of a menstrual cycle and the day boundaries that
//! separate them.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Last day (0-based day in cycle) of the menstrual phase
const MENSTRUAL_END: u32 = 5;
/// Last day of the follicular phase
const FOLLICULAR_END: u32 = 13;
/// Last day of the ovulation window
const OVULATION_END: u32 = 16;

/// One of the four phases of a menstrual cycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String")]
pub enum CyclePhase {
    /// Days 0-5: the period itself
    Menstrual,
    /// Days 6-13: energy building
    Follicular,
    /// Days 14-16: peak energy window
    Ovulation,
    /// Day 17 until the next period
    Luteal,
}

impl CyclePhase {
    /// All phases in cycle order
    pub fn all() -> &'static [CyclePhase] {
        &[
            CyclePhase::Menstrual,
            CyclePhase::Follicular,
            CyclePhase::Ovulation,
            CyclePhase::Luteal,
        ]
    }

    /// Map a 0-based day in cycle onto its phase.
    ///
    /// Boundaries are inclusive: 0-5, 6-13, 14-16, 17+.
    pub fn from_day_in_cycle(day_in_cycle: u32) -> Self {
        match day_in_cycle {
            0..=MENSTRUAL_END => CyclePhase::Menstrual,
            d if d <= FOLLICULAR_END => CyclePhase::Follicular,
            d if d <= OVULATION_END => CyclePhase::Ovulation,
            _ => CyclePhase::Luteal,
        }
    }

    /// Canonical display name ("Menstrual", "Luteal", ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            CyclePhase::Menstrual => "Menstrual",
            CyclePhase::Follicular => "Follicular",
            CyclePhase::Ovulation => "Ovulation",
            CyclePhase::Luteal => "Luteal",
        }
    }

    /// Short human-readable description of what the phase usually feels like
    pub fn description(&self) -> &'static str {
        match self {
            CyclePhase::Menstrual => "Your period is here. Focus on rest and gentle self-care.",
            CyclePhase::Follicular => {
                "Energy is rising! Good time for new projects and social activities."
            }
            CyclePhase::Ovulation => {
                "Peak energy and confidence. Great for important conversations and challenges."
            }
            CyclePhase::Luteal => "Energy may dip. Prioritize rest, boundaries, and comfort.",
        }
    }
}

impl std::fmt::Display for CyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known phase
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown cycle phase: {0}")]
pub struct ParsePhaseError(pub String);

impl FromStr for CyclePhase {
    type Err = ParsePhaseError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "menstrual" => Ok(CyclePhase::Menstrual),
            "follicular" => Ok(CyclePhase::Follicular),
            "ovulation" => Ok(CyclePhase::Ovulation),
            "luteal" => Ok(CyclePhase::Luteal),
            _ => Err(ParsePhaseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for CyclePhase {
    type Error = ParsePhaseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_boundaries() {
        assert_eq!(CyclePhase::from_day_in_cycle(0), CyclePhase::Menstrual);
        assert_eq!(CyclePhase::from_day_in_cycle(5), CyclePhase::Menstrual);
        assert_eq!(CyclePhase::from_day_in_cycle(6), CyclePhase::Follicular);
        assert_eq!(CyclePhase::from_day_in_cycle(13), CyclePhase::Follicular);
        assert_eq!(CyclePhase::from_day_in_cycle(14), CyclePhase::Ovulation);
        assert_eq!(CyclePhase::from_day_in_cycle(16), CyclePhase::Ovulation);
        assert_eq!(CyclePhase::from_day_in_cycle(17), CyclePhase::Luteal);
        assert_eq!(CyclePhase::from_day_in_cycle(44), CyclePhase::Luteal);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("luteal".parse::<CyclePhase>().unwrap(), CyclePhase::Luteal);
        assert_eq!(" MENSTRUAL ".parse::<CyclePhase>().unwrap(), CyclePhase::Menstrual);
        assert_eq!("Ovulation".parse::<CyclePhase>().unwrap(), CyclePhase::Ovulation);
        assert!("spring".parse::<CyclePhase>().is_err());
    }

    #[test]
    fn test_serde_uses_display_names() {
        let json = serde_json::to_string(&CyclePhase::Follicular).unwrap();
        assert_eq!(json, "\"Follicular\"");

        let phase: CyclePhase = serde_json::from_str("\"luteal\"").unwrap();
        assert_eq!(phase, CyclePhase::Luteal);

        assert!(serde_json::from_str::<CyclePhase>("\"winter\"").is_err());
    }
}
