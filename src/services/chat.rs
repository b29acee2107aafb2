//! Chat client for the hosted generation model.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ChatError;
use crate::models::ApiConfig;

/// Sends a single prompt as a fresh message and returns the generated text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ChatError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

/// Known response shapes from the generation endpoint, normalized by
/// [`into_text`]: a direct text field, a candidate whose content carries
/// text, or a candidate whose content carries parts.
///
/// [`into_text`]: ChatResponse::into_text
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChatResponse {
    Direct { text: String },
    Candidates { candidates: Vec<Candidate> },
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: Option<String>,
}

impl ChatResponse {
    fn into_text(self) -> Result<String, ChatError> {
        match self {
            ChatResponse::Direct { text } if !text.is_empty() => Ok(text),
            ChatResponse::Direct { .. } => Err(ChatError::EmptyResponse),
            ChatResponse::Candidates { candidates } => {
                let content = candidates
                    .into_iter()
                    .next()
                    .map(|candidate| candidate.content)
                    .ok_or(ChatError::EmptyResponse)?;

                if let Some(text) = content.text.filter(|t| !t.is_empty()) {
                    return Ok(text);
                }

                content
                    .parts
                    .into_iter()
                    .find_map(|part| part.text.filter(|t| !t.is_empty()))
                    .ok_or(ChatError::EmptyResponse)
            }
        }
    }
}

/// Client for the hosted chat model.
#[derive(Debug, Clone)]
pub struct GeminiChat {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiChat {
    pub fn new(config: &ApiConfig, api_key: String) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.chat_model.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl ChatModel for GeminiChat {
    async fn generate(&self, prompt: &str) -> Result<String, ChatError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![TextPart { text: prompt }],
            }],
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
            return Err(ChatError::ServerError(format!("status {}: {}", status, body)));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| ChatError::InvalidResponse(e.to_string()))?;

        parsed.into_text()
    }
}
