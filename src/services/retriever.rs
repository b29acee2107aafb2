//! Retrieval abstraction: question in, ranked sections out.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::RetrieveError;
use crate::models::ScoredSection;
use crate::services::embedding::Embedder;
use crate::services::vector_store::VectorStore;

/// Turns a question into a ranked sequence of relevant stored sections,
/// hiding the embedding step from the caller.
#[async_trait]
pub trait Retriever: Send + Sync {
    async fn retrieve(
        &self,
        question: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredSection>, RetrieveError>;
}

/// Canonical retriever: embed the question, then search the store by vector.
pub struct VectorRetriever {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
}

impl VectorRetriever {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }
}

#[async_trait]
impl Retriever for VectorRetriever {
    async fn retrieve(
        &self,
        question: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredSection>, RetrieveError> {
        let query_vector = self.embedder.embed(question).await?;
        let sections = self.store.search(query_vector, top_k).await?;
        Ok(sections)
    }
}
