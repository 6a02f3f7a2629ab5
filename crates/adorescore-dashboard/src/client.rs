//! Client for the analysis API

use adorescore_core::{AnalysisRequest, AnalysisResponse};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Default analysis endpoint
pub const DEFAULT_ANALYZE_URL: &str = "http://127.0.0.1:8000/analyze";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("analysis API returned {0}")]
    Status(u16),

    #[error("analysis request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// The parts of an analysis the dashboard displays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDigest {
    pub primary_emotion: String,
    pub secondary_emotion: String,
    pub main_topics: Vec<String>,
    pub adorescore: i64,
}

impl From<AnalysisResponse> for AnalysisDigest {
    fn from(response: AnalysisResponse) -> Self {
        Self {
            primary_emotion: response.emotions.primary.emotion,
            secondary_emotion: response.emotions.secondary.emotion,
            main_topics: response.topics.main,
            adorescore: response.adorescore.overall,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalysisClient {
    client: reqwest::Client,
    url: String,
}

impl AnalysisClient {
    pub fn new(url: impl Into<String>) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Post text to the analysis endpoint
    pub async fn analyze(&self, text: &str) -> Result<AnalysisDigest, ClientError> {
        let response = self
            .client
            .post(&self.url)
            .json(&AnalysisRequest::new(text))
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            warn!("Analysis API at {} returned {}", self.url, status);
            return Err(ClientError::Status(status.as_u16()));
        }

        let analysis: AnalysisResponse = response.json().await?;
        debug!("Analysis API returned overall {}", analysis.adorescore.overall);
        Ok(analysis.into())
    }
}
