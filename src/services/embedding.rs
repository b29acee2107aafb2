//! Embedding client for the hosted embedding model.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::EmbeddingError;
use crate::models::ApiConfig;

/// Turns a text into a fixed-length numeric vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;
}

/// Request body for the embedContent endpoint.
#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: String,
    content: ContentPayload<'a>,
}

#[derive(Debug, Serialize)]
struct ContentPayload<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

/// The provider returns embeddings in more than one shape depending on API
/// version; each known shape is a variant, normalized by [`into_vector`].
///
/// [`into_vector`]: EmbedResponse::into_vector
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmbedResponse {
    /// `{"embedding": {"values": [...]}}`
    Wrapped { embedding: EmbeddingValues },
    /// `{"embedding": [...]}`
    Flat { embedding: Vec<f32> },
    /// `{"data": [{"embedding": [...]}]}`
    Data { data: Vec<EmbeddingEntry> },
}

#[derive(Debug, Deserialize)]
struct EmbeddingValues {
    values: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingEntry {
    embedding: Vec<f32>,
}

impl EmbedResponse {
    fn into_vector(self) -> Result<Vec<f32>, EmbeddingError> {
        let values = match self {
            EmbedResponse::Wrapped { embedding } => embedding.values,
            EmbedResponse::Flat { embedding } => embedding,
            EmbedResponse::Data { data } => data
                .into_iter()
                .next()
                .map(|entry| entry.embedding)
                .unwrap_or_default(),
        };

        if values.is_empty() {
            return Err(EmbeddingError::MissingVector);
        }
        Ok(values)
    }
}

/// Client for the hosted embedding model.
#[derive(Debug, Clone)]
pub struct GeminiEmbedder {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiEmbedder {
    pub fn new(config: &ApiConfig, api_key: String) -> Result<Self, EmbeddingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.embedding_model.clone(),
            api_key,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Embedder for GeminiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let url = format!(
            "{}/v1beta/models/{}:embedContent",
            self.base_url, self.model
        );
        let request = EmbedRequest {
            model: format!("models/{}", self.model),
            content: ContentPayload {
                parts: vec![TextPart { text }],
            },
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::ServerError(format!(
                "status {}: {}",
                status, body
            )));
        }

        let parsed: EmbedResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::InvalidResponse(e.to_string()))?;

        parsed.into_vector()
    }
}
