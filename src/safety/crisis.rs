//! Crisis Detector
//!
//! Scans free text for language indicating risk of self-harm. Matching is
//! whole-word and case-insensitive. A match attaches fixed crisis resources
//! to the assessment.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// (indicator label, pattern) in reporting order
static INDICATORS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("suicidal", r"(?i)\bsuicidal\b"),
        ("suicide", r"(?i)\bsuicide\b"),
        ("self-harm", r"(?i)\bself[\s-]?harm(?:ing)?\b"),
        ("kill myself", r"(?i)\bkill\s+myself\b"),
        ("end my life", r"(?i)\bend\s+my\s+life\b"),
        ("hopeless", r"(?i)\bhopeless\b"),
        ("want to die", r"(?i)\bwant\s+to\s+die\b"),
        ("severely depressed", r"(?i)\bsevere(?:ly)?\s+depress(?:ed|ion)\b"),
    ]
    .into_iter()
    .map(|(label, pattern)| (label, Regex::new(pattern).expect("valid regex")))
    .collect()
});

/// A place to reach for immediate help
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CrisisResource {
    pub name: &'static str,
    pub contact: &'static str,
}

pub const CRISIS_RESOURCES: &[CrisisResource] = &[
    CrisisResource {
        name: "National Suicide Prevention Lifeline",
        contact: "Call or text 988",
    },
    CrisisResource {
        name: "Crisis Text Line",
        contact: "Text HOME to 741741",
    },
    CrisisResource {
        name: "International Association for Suicide Prevention",
        contact: "https://www.iasp.info/resources/Crisis_Centres/",
    },
];

/// Result of scanning text for crisis language
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CrisisAssessment {
    pub flagged: bool,
    /// Matched indicators, deduplicated
    pub indicators: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<CrisisResource>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CrisisDetector;

impl CrisisDetector {
    pub fn new() -> Self {
        Self
    }

    /// Scan every text fragment for crisis indicators
    pub fn assess<I, S>(&self, texts: I) -> CrisisAssessment
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let texts: Vec<S> = texts.into_iter().collect();

        let indicators: Vec<&'static str> = INDICATORS
            .iter()
            .filter(|(_, re)| texts.iter().any(|t| re.is_match(t.as_ref())))
            .map(|(label, _)| *label)
            .collect();

        if indicators.is_empty() {
            return CrisisAssessment::default();
        }

        tracing::warn!(indicators = ?indicators, "Crisis signals detected");

        CrisisAssessment {
            flagged: true,
            indicators,
            resources: CRISIS_RESOURCES.to_vec(),
        }
    }
}
