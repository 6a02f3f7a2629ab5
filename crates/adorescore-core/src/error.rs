//! Error types for Adorescore

/// Result type alias using Adorescore's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for Adorescore operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Model inference errors
    #[error("model error: {0}")]
    Model(String),

    /// A model returned output in a shape the pipeline cannot use
    #[error("{0}")]
    MalformedOutput(String),

    /// A model slot failed to load at startup
    #[error("model '{slot}' is not loaded: {reason}")]
    ModelUnavailable { slot: String, reason: String },

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// Dataset loading or parsing errors
    #[error("dataset error: {0}")]
    Dataset(String),

    /// Network/IO errors
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new model error
    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    /// Create a new malformed output error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedOutput(msg.into())
    }

    /// Create a new unavailable-model error
    pub fn unavailable(slot: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            slot: slot.into(),
            reason: reason.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new dataset error
    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_message_names_slot() {
        let err = Error::unavailable("emotion", "file not found");
        assert_eq!(
            err.to_string(),
            "model 'emotion' is not loaded: file not found"
        );
    }

    #[test]
    fn test_malformed_message_is_verbatim() {
        let err = Error::malformed("Emotion analysis returned unexpected format.");
        assert_eq!(err.to_string(), "Emotion analysis returned unexpected format.");
    }
}
