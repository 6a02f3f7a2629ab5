//! Remote inference backends
//!
//! Talks to an HTTP inference server using the Hugging Face inference API
//! request and response shapes. Responses are validated before use; any
//! unexpected shape surfaces as [`Error::MalformedOutput`].

use crate::model::{EmotionClassifier, TopicClassifier};
use adorescore_core::{EmotionScore, Error, Result, ZeroShotOutput};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::{Duration, Instant};
use tracing::debug;

/// Message used when an emotion endpoint returns an unusable payload
pub const EMOTION_FORMAT_ERROR: &str = "Emotion analysis returned unexpected format.";

/// Message used when a zero-shot endpoint returns an unusable payload
pub const ZERO_SHOT_FORMAT_ERROR: &str = "Topic classification returned unexpected format.";

/// Connection settings for one inference endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteSpec {
    /// Full URL of the model endpoint
    pub url: String,

    /// Environment variable holding a bearer token
    #[serde(default)]
    pub token_env: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

/// HTTP client bound to one inference endpoint
#[derive(Clone)]
pub struct RemoteInference {
    name: String,
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl RemoteInference {
    /// Build a client from its spec, reading the token from the environment
    pub fn from_spec(name: impl Into<String>, spec: &RemoteSpec) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(spec.timeout_secs))
            .build()
            .map_err(|e| Error::model(format!("Failed to build HTTP client: {}", e)))?;

        let token = match &spec.token_env {
            Some(var) => Some(std::env::var(var).map_err(|_| {
                Error::config(format!("Environment variable {} is not set", var))
            })?),
            None => None,
        };

        Ok(Self {
            name: name.into(),
            client,
            url: spec.url.clone(),
            token,
        })
    }

    async fn post(&self, body: &Value) -> Result<Value> {
        let start = Instant::now();
        let mut request = self.client.post(&self.url).json(body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::model(format!("{} request failed: {}", self.name, e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::model(format!(
                "{} returned {}: {}",
                self.name, status, detail
            )));
        }

        let value = response
            .json::<Value>()
            .await
            .map_err(|e| Error::model(format!("{} returned invalid JSON: {}", self.name, e)))?;

        debug!(
            "{} responded in {}us",
            self.name,
            start.elapsed().as_micros()
        );
        Ok(value)
    }
}

/// Text-classification endpoint used as the emotion model
pub struct RemoteEmotionClassifier {
    inner: RemoteInference,
}

impl RemoteEmotionClassifier {
    pub fn new(inner: RemoteInference) -> Self {
        Self { inner }
    }
}

#[async_trait::async_trait]
impl EmotionClassifier for RemoteEmotionClassifier {
    async fn rank(&self, text: &str) -> Result<Vec<EmotionScore>> {
        let body = json!({ "inputs": text, "parameters": { "top_k": null } });
        let value = self.inner.post(&body).await?;
        parse_emotion_ranking(value)
    }

    fn name(&self) -> &str {
        &self.inner.name
    }
}

/// Validate a text-classification payload of the form
/// `[[{"label": .., "score": ..}, ..]]` and return the inner ranking.
pub fn parse_emotion_ranking(value: Value) -> Result<Vec<EmotionScore>> {
    let Value::Array(outer) = value else {
        return Err(Error::malformed(EMOTION_FORMAT_ERROR));
    };
    let Some(Value::Array(inner)) = outer.into_iter().next() else {
        return Err(Error::malformed(EMOTION_FORMAT_ERROR));
    };

    let mut ranking = inner
        .into_iter()
        .map(|item| serde_json::from_value::<EmotionScore>(item))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| Error::malformed(EMOTION_FORMAT_ERROR))?;

    ranking.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(ranking)
}

/// Zero-shot classification endpoint used as the topic classifier
pub struct RemoteTopicClassifier {
    inner: RemoteInference,
}

impl RemoteTopicClassifier {
    pub fn new(inner: RemoteInference) -> Self {
        Self { inner }
    }
}

#[async_trait::async_trait]
impl TopicClassifier for RemoteTopicClassifier {
    async fn classify(
        &self,
        text: &str,
        candidates: &[&str],
        multi_label: bool,
    ) -> Result<ZeroShotOutput> {
        let body = json!({
            "inputs": text,
            "parameters": {
                "candidate_labels": candidates,
                "multi_label": multi_label,
            }
        });
        let value = self.inner.post(&body).await?;
        parse_zero_shot(value)
    }

    fn name(&self) -> &str {
        &self.inner.name
    }
}

/// Validate a zero-shot payload of the form `{"labels": [..], "scores": [..]}`
pub fn parse_zero_shot(value: Value) -> Result<ZeroShotOutput> {
    let output: ZeroShotOutput =
        serde_json::from_value(value).map_err(|_| Error::malformed(ZERO_SHOT_FORMAT_ERROR))?;

    if output.labels.len() != output.scores.len() {
        return Err(Error::malformed(ZERO_SHOT_FORMAT_ERROR));
    }

    Ok(ZeroShotOutput::from_pairs(
        output.labels.into_iter().zip(output.scores).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_emotion_ranking_sorts() {
        let value = json!([[
            {"label": "sadness", "score": 0.1},
            {"label": "joy", "score": 0.8},
        ]]);
        let ranking = parse_emotion_ranking(value).unwrap();
        assert_eq!(ranking[0].label, "joy");
        assert_eq!(ranking[1].label, "sadness");
    }

    #[test]
    fn test_parse_emotion_ranking_flat_list_is_malformed() {
        let value = json!([{"label": "joy", "score": 0.8}]);
        let err = parse_emotion_ranking(value).unwrap_err();
        assert_eq!(err.to_string(), EMOTION_FORMAT_ERROR);
    }

    #[test]
    fn test_parse_emotion_ranking_rejects_non_lists() {
        assert!(parse_emotion_ranking(json!({"error": "loading"})).is_err());
        assert!(parse_emotion_ranking(json!([])).is_err());
        assert!(parse_emotion_ranking(json!([[{"label": "joy"}]])).is_err());
    }

    #[test]
    fn test_parse_emotion_ranking_allows_empty_inner_list() {
        assert!(parse_emotion_ranking(json!([[]])).unwrap().is_empty());
    }

    #[test]
    fn test_parse_zero_shot() {
        let value = json!({
            "sequence": "ignored",
            "labels": ["Delivery", "Quality"],
            "scores": [0.3, 0.9],
        });
        let output = parse_zero_shot(value).unwrap();
        assert_eq!(output.labels, vec!["Quality", "Delivery"]);
    }

    #[test]
    fn test_parse_zero_shot_length_mismatch() {
        let value = json!({"labels": ["Delivery"], "scores": [0.3, 0.9]});
        assert!(matches!(
            parse_zero_shot(value),
            Err(Error::MalformedOutput(_))
        ));
    }

    #[test]
    fn test_missing_token_env_is_config_error() {
        let spec = RemoteSpec {
            url: "http://127.0.0.1:1/emotion".to_string(),
            token_env: Some("ADORESCORE_TEST_TOKEN_THAT_IS_NOT_SET".to_string()),
            timeout_secs: 1,
        };
        let err = RemoteInference::from_spec("emotion", &spec).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
    }
}
