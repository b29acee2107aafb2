//! Vector store abstraction layer.
//!
//! A trait-based seam over the persistence backend so the pipelines can run
//! against deterministic fakes in tests.

mod sqlite;

pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::error::VectorStoreError;
use crate::models::{NewSectionRecord, ScoredSection};

/// Collection statistics.
#[derive(Debug, Clone)]
pub struct CollectionInfo {
    pub record_count: u64,
    /// Embedding dimensionality of the stored records; `None` while empty.
    pub dimension: Option<usize>,
}

/// Persists sections with their embeddings under a named collection and
/// answers top-k similarity queries.
///
/// Writes append records with monotonically increasing identifiers continuing
/// from the current collection count. Single-writer assumption: nothing
/// coordinates the count read against interleaved writers.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Create the collection if it doesn't exist.
    async fn create_collection(&self) -> Result<(), VectorStoreError>;

    /// Statistics for the current collection.
    async fn collection_info(&self) -> Result<CollectionInfo, VectorStoreError>;

    /// Append records, assigning identifiers continuing from the current
    /// count. Returns the assigned identifiers in insertion order.
    async fn append(&self, records: Vec<NewSectionRecord>) -> Result<Vec<i64>, VectorStoreError>;

    /// The `limit` stored sections most similar to `query_vector`, in
    /// descending similarity order.
    async fn search(
        &self,
        query_vector: Vec<f32>,
        limit: usize,
    ) -> Result<Vec<ScoredSection>, VectorStoreError>;

    /// The collection name this store is scoped to.
    fn collection(&self) -> &str;
}
