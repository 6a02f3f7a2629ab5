//! Adorescore Core
//!
//! Core types and utilities shared across Adorescore components.
//!
//! This crate provides:
//! - The request/response data model of the analysis endpoint
//! - Error types and result handling
//! - Review text normalization

pub mod error;
pub mod text;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    Activation, AdorescoreResult, AnalysisRequest, AnalysisResponse, EmotionDetail,
    EmotionScore, EmotionSummary, PolarityScores, TopicId, TopicSummary, ZeroShotOutput,
    NO_TOPIC, UNKNOWN_LABEL,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::text::normalize;
    pub use crate::types::{AnalysisRequest, AnalysisResponse, EmotionScore, ZeroShotOutput};
}
