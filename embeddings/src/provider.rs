//! Embedding providers.
//!
//! A provider maps a batch of texts to one vector per text, in order. The
//! same text always maps to the same vector for a given provider instance,
//! so vectors are only comparable when they come from the same provider.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::Embedding;
use crate::error::{EmbeddingError, Result};

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Get the model this provider embeds with.
    fn model(&self) -> &str;

    /// Encode a batch of texts, one vector per text, order-preserving.
    async fn encode(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Encode a single text.
    async fn encode_one(&self, text: &str) -> Result<Embedding> {
        self.encode(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::InvalidResponse("no embedding returned".to_string()))
    }
}

/// OpenAI-compatible embeddings API provider.
pub struct OpenAIProvider {
    /// API key.
    api_key: Option<String>,

    /// API base URL.
    base_url: String,

    /// HTTP client.
    client: reqwest::Client,

    /// Model to request.
    model: String,
}

impl OpenAIProvider {
    /// Create a new provider reading the key from `OPENAI_API_KEY`.
    pub fn new() -> Self {
        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            base_url: "https://api.openai.com/v1".to_string(),
            client: reqwest::Client::new(),
            model: "text-embedding-3-small".to_string(),
        }
    }

    /// Set the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn classify(&self, err: reqwest::Error) -> EmbeddingError {
        if err.is_connect() || err.is_timeout() {
            EmbeddingError::Connectivity {
                model: self.model.clone(),
                message: err.to_string(),
            }
        } else {
            EmbeddingError::Http(err)
        }
    }
}

impl Default for OpenAIProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let api_key = self.api_key.as_ref().ok_or_else(|| {
            EmbeddingError::ProviderNotConfigured("no API key for openai provider".to_string())
        })?;

        debug!(
            "Requesting {} embeddings with model: {}",
            texts.len(),
            self.model
        );

        let body = serde_json::json!({
            "input": texts,
            "model": self.model,
        });

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .header("Authorization", format!("Bearer {api_key}"))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|err| self.classify(err))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(EmbeddingError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ApiRequest(format!(
                "{status}: {error_text}"
            )));
        }

        let mut result: OpenAIEmbeddingResponse = response.json().await?;
        if result.data.len() != texts.len() {
            return Err(EmbeddingError::InvalidResponse(format!(
                "requested {} embeddings, received {}",
                texts.len(),
                result.data.len()
            )));
        }

        // The API may answer out of order; `index` is authoritative.
        result.data.sort_by_key(|item| item.index);
        let embeddings: Vec<Embedding> = result.data.into_iter().map(|d| d.embedding).collect();

        info!("Generated {} embeddings", embeddings.len());
        Ok(embeddings)
    }
}

/// OpenAI API response format.
#[derive(Debug, Deserialize)]
struct OpenAIEmbeddingResponse {
    data: Vec<OpenAIEmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct OpenAIEmbeddingData {
    embedding: Vec<f32>,
    index: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[tokio::test]
    async fn test_encode_preserves_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    { "embedding": [0.0, 1.0], "index": 1 },
                    { "embedding": [1.0, 0.0], "index": 0 }
                ],
                "model": "text-embedding-3-small"
            })))
            .mount(&server)
            .await;

        let provider = OpenAIProvider::new()
            .with_api_key("test")
            .with_base_url(server.uri());
        let vectors = provider.encode(&texts(&["first", "second"])).await.unwrap();

        assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[tokio::test]
    async fn test_count_mismatch_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{ "embedding": [1.0], "index": 0 }]
            })))
            .mount(&server)
            .await;

        let provider = OpenAIProvider::new()
            .with_api_key("test")
            .with_base_url(server.uri());
        let err = provider.encode(&texts(&["a", "b"])).await.unwrap_err();

        assert!(matches!(err, EmbeddingError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .mount(&server)
            .await;

        let provider = OpenAIProvider::new()
            .with_api_key("test")
            .with_base_url(server.uri());
        let err = provider.encode(&texts(&["a"])).await.unwrap_err();

        assert!(matches!(
            err,
            EmbeddingError::RateLimited {
                retry_after_secs: 7
            }
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_connectivity() {
        // Port 9 (discard) on localhost is not listening in test environments.
        let provider = OpenAIProvider::new()
            .with_api_key("test")
            .with_base_url("http://127.0.0.1:9");
        let err = provider.encode(&texts(&["a"])).await.unwrap_err();

        assert!(err.is_connectivity(), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_missing_key() {
        let provider = OpenAIProvider {
            api_key: None,
            base_url: "http://127.0.0.1:9".to_string(),
            client: reqwest::Client::new(),
            model: "m".to_string(),
        };
        let err = provider.encode(&texts(&["a"])).await.unwrap_err();
        assert!(matches!(err, EmbeddingError::ProviderNotConfigured(_)));
    }

    #[tokio::test]
    async fn test_empty_batch_skips_request() {
        let provider = OpenAIProvider::new().with_base_url("http://127.0.0.1:9");
        let vectors = provider.encode(&[]).await.unwrap();
        assert!(vectors.is_empty());
    }
}
