//! Static recommendation tables
//!
//! Suggestions keyed by cycle phase, mood and symptom. Labels are parsed
//! into enums at the boundary; anything unrecognized parses to `None`.

use crate::cycle::CyclePhase;

/// Baseline guidance for a cycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseGuide {
    pub focus: &'static str,
    pub activities: &'static [&'static str],
    pub avoid: &'static [&'static str],
}

/// Guidance for a cycle phase
pub fn phase_guide(phase: CyclePhase) -> PhaseGuide {
    match phase {
        CyclePhase::Menstrual => PhaseGuide {
            focus: "Rest and gentle self-care",
            activities: &[
                "Gentle yoga or stretching",
                "Warm baths with Epsom salts",
                "Comfort foods that nourish",
                "Extra sleep and rest time",
                "Light walks in nature",
            ],
            avoid: &["Intense exercise", "Major decisions", "Overcommitting"],
        },
        CyclePhase::Follicular => PhaseGuide {
            focus: "Energy building and new beginnings",
            activities: &[
                "Try new workouts or activities",
                "Start new projects",
                "Social activities and connections",
                "Creative pursuits",
                "Goal setting and planning",
            ],
            avoid: &["Overextending yourself", "Ignoring nutrition"],
        },
        CyclePhase::Ovulation => PhaseGuide {
            focus: "Peak energy and confidence",
            activities: &[
                "Important conversations or presentations",
                "High-intensity workouts",
                "Networking and social events",
                "Tackling challenging tasks",
                "Making important decisions",
            ],
            avoid: &["Wasting your high-energy window", "Poor sleep habits"],
        },
        CyclePhase::Luteal => PhaseGuide {
            focus: "Gentle energy management and self-compassion",
            activities: &[
                "Moderate exercise (yoga, walking)",
                "Journaling and self-reflection",
                "Setting boundaries",
                "Cozy, comforting activities",
                "Meal prep for upcoming cycle",
            ],
            avoid: &[
                "Overcommitting socially",
                "Harsh self-criticism",
                "Too much caffeine",
            ],
        },
    }
}

/// Moods with dedicated support tips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Anxious,
    Sad,
    Tired,
    Irritable,
    Overwhelmed,
}

impl Mood {
    /// Case-insensitive parse; `None` for moods without tips
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "anxious" => Some(Mood::Anxious),
            "sad" => Some(Mood::Sad),
            "tired" => Some(Mood::Tired),
            "irritable" => Some(Mood::Irritable),
            "overwhelmed" => Some(Mood::Overwhelmed),
            _ => None,
        }
    }

    pub fn tips(&self) -> &'static [&'static str] {
        match self {
            Mood::Anxious => &[
                "Practice deep breathing (4-7-8 technique)",
                "Try grounding exercises (5-4-3-2-1 method)",
                "Limit caffeine and sugar",
                "Progressive muscle relaxation",
                "Talk to a trusted friend or therapist",
            ],
            Mood::Sad => &[
                "Get sunlight exposure (even 10 minutes helps)",
                "Reach out to supportive friends/family",
                "Gentle movement or stretching",
                "Journal your feelings",
                "Consider talking to a mental health professional",
            ],
            Mood::Tired => &[
                "Prioritize 8+ hours of sleep",
                "Take short power naps (20 min max)",
                "Stay hydrated",
                "Eat iron-rich foods",
                "Reduce screen time before bed",
            ],
            Mood::Irritable => &[
                "Take breaks when needed",
                "Practice saying 'no' to non-essentials",
                "Express feelings through journaling",
                "Try calming activities (bath, music, nature)",
                "Give yourself permission to rest",
            ],
            Mood::Overwhelmed => &[
                "Break tasks into tiny steps",
                "Practice one thing at a time",
                "Ask for help when needed",
                "Set firm boundaries",
                "Remember: this phase will pass",
            ],
        }
    }
}

/// Symptoms with dedicated relief tips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symptom {
    Cramps,
    Headache,
    Fatigue,
    Bloating,
    BreastTenderness,
    Acne,
}

impl Symptom {
    /// Case-insensitive parse. Spaces and hyphens are read as underscores,
    /// so "breast tenderness" matches `BreastTenderness`.
    pub fn parse(label: &str) -> Option<Self> {
        let key: String = label
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();

        match key.as_str() {
            "cramps" => Some(Symptom::Cramps),
            "headache" => Some(Symptom::Headache),
            "fatigue" => Some(Symptom::Fatigue),
            "bloating" => Some(Symptom::Bloating),
            "breast_tenderness" => Some(Symptom::BreastTenderness),
            "acne" => Some(Symptom::Acne),
            _ => None,
        }
    }

    pub fn tips(&self) -> &'static [&'static str] {
        match self {
            Symptom::Cramps => &[
                "Heat pad on lower abdomen",
                "Magnesium supplements (consult doctor)",
                "Gentle stretching",
            ],
            Symptom::Headache => &[
                "Stay hydrated",
                "Dim lighting",
                "Peppermint tea",
                "Cold compress",
            ],
            Symptom::Fatigue => &[
                "Iron-rich foods",
                "B-vitamins",
                "Regular sleep schedule",
                "Gentle movement",
            ],
            Symptom::Bloating => &[
                "Reduce salt intake",
                "Herbal teas (ginger, peppermint)",
                "Light walks",
                "Stay hydrated",
            ],
            Symptom::BreastTenderness => &[
                "Supportive bra",
                "Reduce caffeine",
                "Evening primrose oil (consult doctor)",
            ],
            Symptom::Acne => &[
                "Gentle skincare routine",
                "Stay hydrated",
                "Clean pillowcases",
                "Zinc-rich foods",
            ],
        }
    }
}
