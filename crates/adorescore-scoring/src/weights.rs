//! Emotion weight table
//!
//! Maps a lower-cased emotion label to its signed contribution to the
//! Adorescore. Labels missing from the table weigh zero.

use adorescore_core::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// Built-in weights (Plutchik emotions and their intense variants)
pub const DEFAULT_WEIGHTS: &[(&str, f64)] = &[
    ("joy", 1.0),
    ("trust", 0.8),
    ("anticipation", 0.7),
    ("surprise", 0.6),
    ("sadness", -1.0),
    ("fear", -0.8),
    ("anger", -0.9),
    ("disgust", -0.7),
    ("ecstasy", 1.2),
    ("admiration", 1.1),
    ("terror", -1.2),
    ("loathing", -1.1),
];

/// Immutable label -> weight table
#[derive(Debug, Clone, PartialEq)]
pub struct EmotionWeights {
    weights: HashMap<String, f64>,
}

impl EmotionWeights {
    /// Table with the built-in weights
    pub fn new() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS
                .iter()
                .map(|(label, weight)| (label.to_string(), *weight))
                .collect(),
        }
    }

    /// Built-in table with entries from a YAML `label: weight` map
    /// added or replaced. Labels are lower-cased.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let overrides: HashMap<String, f64> = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Invalid emotion weights: {}", e)))?;

        let mut table = Self::new();
        for (label, weight) in overrides {
            if !weight.is_finite() {
                return Err(Error::config(format!(
                    "Weight for '{}' must be a finite number",
                    label
                )));
            }
            table.weights.insert(label.to_lowercase(), weight);
        }
        Ok(table)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// Weight of a classifier label, 0 when unknown
    pub fn weight(&self, label: &str) -> f64 {
        self.weights
            .get(&label.to_lowercase())
            .copied()
            .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl Default for EmotionWeights {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = EmotionWeights::new();
        assert_eq!(weights.len(), 12);
        assert_eq!(weights.weight("joy"), 1.0);
        assert_eq!(weights.weight("terror"), -1.2);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let weights = EmotionWeights::new();
        assert_eq!(weights.weight("Anger"), -0.9);
        assert_eq!(weights.weight("DISGUST"), -0.7);
    }

    #[test]
    fn test_unknown_label_weighs_zero() {
        let weights = EmotionWeights::new();
        assert_eq!(weights.weight("neutral"), 0.0);
        assert_eq!(weights.weight(""), 0.0);
    }

    #[test]
    fn test_yaml_overrides() {
        let weights = EmotionWeights::from_yaml("Neutral: 0.1\njoy: 0.9\n").unwrap();
        assert_eq!(weights.weight("neutral"), 0.1);
        assert_eq!(weights.weight("joy"), 0.9);
        assert_eq!(weights.weight("sadness"), -1.0);
    }

    #[test]
    fn test_yaml_rejects_non_numbers() {
        assert!(EmotionWeights::from_yaml("joy: lots\n").is_err());
        assert!(EmotionWeights::from_yaml("joy: .nan\n").is_err());
    }
}
