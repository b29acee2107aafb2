//! Document download and text extraction.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

use crate::error::FetchError;
use crate::models::ApiConfig;

/// Turns a document URL into its full extracted text.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Downloads a PDF and concatenates the text of every page in order.
///
/// Failures are terminal for the request: no retry, no partial recovery.
#[derive(Debug, Clone)]
pub struct PdfFetcher {
    client: Client,
}

impl PdfFetcher {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }

    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(&ApiConfig::default())
    }
}

#[async_trait]
impl DocumentFetcher for PdfFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            warn!(url, status = %response.status(), "document download failed");
            return Err(FetchError::HttpStatus(response.status()));
        }

        let bytes = response.bytes().await?;
        pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            warn!(url, error = %e, "PDF text extraction failed");
            FetchError::PdfParseError(e.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn test_fetcher_creation() {
        assert!(PdfFetcher::with_defaults().is_ok());
    }

    #[tokio::test]
    async fn test_http_error_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing.pdf");
                then.status(404);
            })
            .await;

        let fetcher = PdfFetcher::with_defaults().unwrap();
        let result = fetcher
            .fetch_text(&server.url("/missing.pdf"))
            .await;

        assert!(matches!(result, Err(FetchError::HttpStatus(status)) if status.as_u16() == 404));
    }

    #[tokio::test]
    async fn test_non_pdf_body_is_a_parse_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/doc.pdf");
                then.status(200).body("this is not a pdf");
            })
            .await;

        let fetcher = PdfFetcher::with_defaults().unwrap();
        let result = fetcher.fetch_text(&server.url("/doc.pdf")).await;

        assert!(matches!(result, Err(FetchError::PdfParseError(_))));
    }
}
