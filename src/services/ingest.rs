//! Ingestion pipeline: fetch a document, split it into sections, embed each
//! section, and append the records to the vector store in batches.

use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{AppError, IngestError};
use crate::models::{Config, Document, DocumentConfig, IngestionConfig, NewSectionRecord};
use crate::services::embedding::{Embedder, GeminiEmbedder};
use crate::services::fetcher::{DocumentFetcher, PdfFetcher};
use crate::services::splitter::SectionSplitter;
use crate::services::vector_store::{SqliteStore, VectorStore};

/// A document to ingest.
#[derive(Debug, Clone)]
pub struct IngestRequest {
    pub url: String,
    pub name: String,
    pub description: String,
}

impl IngestRequest {
    pub fn new(
        url: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            description: description.into(),
        }
    }

    /// Build a request from the configured source document, if one is set.
    pub fn from_config(config: &DocumentConfig) -> Option<Self> {
        let url = config.url.clone()?;
        Some(Self {
            name: config.name.clone().unwrap_or_else(|| url.clone()),
            description: config.description.clone().unwrap_or_default(),
            url,
        })
    }
}

/// A section dropped from the batch because its embedding failed.
#[derive(Debug, Clone)]
pub struct SkippedSection {
    pub index: usize,
    pub reason: String,
}

/// Outcome of one ingestion run.
#[derive(Debug)]
pub struct IngestReport {
    pub document_id: String,
    pub sections_total: usize,
    pub stored_ids: Vec<i64>,
    pub skipped: Vec<SkippedSection>,
}

/// Sequential ingestion pipeline.
pub struct Ingestor {
    fetcher: Arc<dyn DocumentFetcher>,
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    splitter: SectionSplitter,
    batch_size: usize,
}

impl Ingestor {
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
        config: &IngestionConfig,
    ) -> Self {
        Self {
            fetcher,
            embedder,
            store,
            splitter: SectionSplitter::new(config),
            batch_size: config.batch_size.max(1),
        }
    }

    /// Wire the production pipeline from configuration. Fails fast when the
    /// API key is missing.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let api_key = config.api.resolve_api_key()?;
        let fetcher = PdfFetcher::new(&config.api)?;
        let embedder = GeminiEmbedder::new(&config.api, api_key)?;
        let store = SqliteStore::open(&config.store)?;

        Ok(Self::new(
            Arc::new(fetcher),
            Arc::new(embedder),
            Arc::new(store),
            &config.ingestion,
        ))
    }

    /// Run the pipeline for one document.
    ///
    /// A document with no extractable text aborts before any store write.
    /// A section whose embedding fails is skipped and logged; if every
    /// section skips, the whole batch fails.
    pub async fn ingest(&self, request: &IngestRequest) -> Result<IngestReport, IngestError> {
        let text = match self.fetcher.fetch_text(&request.url).await {
            Ok(text) => text,
            Err(err) => {
                warn!(url = %request.url, error = %err, "document fetch failed");
                return Err(err.into());
            }
        };
        if text.trim().is_empty() {
            return Err(IngestError::EmptyDocument);
        }

        let document = Document::new(&request.url, &request.name, &request.description, text);
        let sections = self.splitter.split(&document.content);
        if sections.is_empty() {
            return Err(IngestError::EmptyDocument);
        }

        self.store.create_collection().await?;
        info!(
            document = %document.id,
            sections = sections.len(),
            collection = self.store.collection(),
            "ingesting document"
        );

        let mut stored_ids = Vec::new();
        let mut skipped = Vec::new();
        let mut pending: Vec<NewSectionRecord> = Vec::new();

        for section in &sections {
            match self.embedder.embed(&section.content).await {
                Ok(embedding) => {
                    pending.push(NewSectionRecord::from_section(&document, section, embedding));
                }
                Err(err) => {
                    warn!(section = section.index, error = %err, "skipping section: embedding failed");
                    skipped.push(SkippedSection {
                        index: section.index,
                        reason: err.to_string(),
                    });
                }
            }

            if pending.len() >= self.batch_size {
                let ids = self.store.append(std::mem::take(&mut pending)).await?;
                stored_ids.extend(ids);
            }
        }
        stored_ids.extend(self.store.append(pending).await?);

        if stored_ids.is_empty() {
            return Err(IngestError::AllSectionsSkipped);
        }

        info!(
            document = %document.id,
            stored = stored_ids.len(),
            skipped = skipped.len(),
            "ingestion complete"
        );

        Ok(IngestReport {
            document_id: document.id,
            sections_total: sections.len(),
            stored_ids,
            skipped,
        })
    }
}
