//! Safety checks over user-supplied text

pub mod crisis;

pub use crisis::{CrisisAssessment, CrisisDetector, CrisisResource, CRISIS_RESOURCES};
