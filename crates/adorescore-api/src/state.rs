//! Shared application state

use crate::config::ApiConfig;
use adorescore_models::{ModelRegistry, ModelsConfig};
use adorescore_scoring::{Analyzer, EmotionWeights};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tracing::info;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Load models and scoring tables described by `config`.
    ///
    /// Invalid config files are fatal. Model load failures are not: they
    /// surface through the readiness probe instead.
    pub async fn from_config(config: &ApiConfig) -> anyhow::Result<Self> {
        let models_config = match &config.models_config {
            Some(path) => {
                info!("Loading model config from {}", path.display());
                ModelsConfig::from_file(path)?
            }
            None => ModelsConfig::default(),
        };
        if let Some(corpus) = models_config.corpus_path() {
            info!("Refitting topic model from {}", corpus.display());
        }

        let registry = ModelRegistry::load(&models_config).await;

        let weights = match &config.weights {
            Some(path) => {
                info!("Loading emotion weights from {}", path.display());
                EmotionWeights::from_file(path)?
            }
            None => EmotionWeights::new(),
        };

        Ok(Self::new(Analyzer::new(registry).with_weights(weights)))
    }
}
