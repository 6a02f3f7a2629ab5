//! Adorescore Scoring
//!
//! Turns raw model outputs into the analysis response:
//! - Emotion weight table and the weighted overall score
//! - Topic vocabulary, threshold selection and subtopic assembly
//! - Activation buckets and intensities for the displayed emotions
//! - The [`Analyzer`] pipeline tying the models together

pub mod aggregate;
pub mod analyzer;
pub mod topics;
pub mod weights;

pub use aggregate::{activation, adorescore, intensity, overall_score, summarize_emotions};
pub use analyzer::Analyzer;
pub use topics::{GENERAL_FEEDBACK, TOPIC_CANDIDATES, TOPIC_THRESHOLD};
pub use weights::EmotionWeights;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::analyzer::Analyzer;
    pub use crate::weights::EmotionWeights;
}
