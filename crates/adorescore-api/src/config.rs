//! Service configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Analysis service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Listen address
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Model backend configuration (`models.yaml`)
    #[serde(default)]
    pub models_config: Option<PathBuf>,

    /// Emotion weight overrides (`label: weight` YAML map)
    #[serde(default)]
    pub weights: Option<PathBuf>,

    /// Largest accepted request body in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl ApiConfig {
    /// Load configuration from a YAML file, or defaults if it does not exist
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.listen, self.port)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            port: default_port(),
            models_config: None,
            weights: None,
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_yaml("").unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8000");
        assert!(config.models_config.is_none());
        assert_eq!(config.max_body_bytes, 1024 * 1024);
    }

    #[test]
    fn test_partial_yaml() {
        let config = ApiConfig::from_yaml("port: 9100\nmodels_config: models.yaml\n").unwrap();
        assert_eq!(config.port, 9100);
        assert_eq!(config.listen, "0.0.0.0");
        assert_eq!(config.models_config, Some(PathBuf::from("models.yaml")));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ApiConfig::load("/nonexistent/adorescore.yaml").unwrap();
        assert_eq!(config.port, 8000);
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(ApiConfig::from_yaml("port: not-a-port\n").is_err());
    }
}
