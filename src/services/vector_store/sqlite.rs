//! SQLite-backed vector store.
//!
//! Records live in a single database file inside the configured persist
//! directory. Embeddings are stored as little-endian f32 blobs and ranked by
//! brute-force cosine similarity at query time.

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, params};
use tokio::sync::Mutex;

use super::{CollectionInfo, VectorStore};
use crate::error::VectorStoreError;
use crate::models::{NewSectionRecord, ScoredSection, SectionMetadata, StoreConfig};

const DB_FILE: &str = "index.db";

pub struct SqliteStore {
    conn: Mutex<Connection>,
    collection: String,
}

impl SqliteStore {
    /// Open (or create) the store under the configured persist directory.
    pub fn open(config: &StoreConfig) -> Result<Self, VectorStoreError> {
        std::fs::create_dir_all(&config.persist_dir)?;
        let conn = Connection::open(config.persist_dir.join(DB_FILE))?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            collection: config.collection.clone(),
        })
    }
}

fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS sections (
            collection TEXT NOT NULL,
            seq_id INTEGER NOT NULL,
            content TEXT NOT NULL,
            metadata TEXT NOT NULL,
            embedding BLOB NOT NULL,
            dimensions INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            PRIMARY KEY (collection, seq_id)
        );
        CREATE INDEX IF NOT EXISTS idx_sections_collection ON sections(collection);
        "#,
    )
}

fn stored_dimension(
    conn: &Connection,
    collection: &str,
) -> Result<Option<usize>, rusqlite::Error> {
    conn.query_row(
        "SELECT dimensions FROM sections WHERE collection = ?1 LIMIT 1",
        params![collection],
        |row| row.get::<_, i64>(0),
    )
    .optional()
    .map(|dim| dim.map(|d| d as usize))
}

fn encode_embedding(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|v| v.to_le_bytes()).collect()
}

fn decode_embedding(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect()
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denominator = (norm_a * norm_b).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    dot / denominator
}

#[async_trait]
impl VectorStore for SqliteStore {
    async fn create_collection(&self) -> Result<(), VectorStoreError> {
        let conn = self.conn.lock().await;
        init_schema(&conn)?;
        Ok(())
    }

    async fn collection_info(&self) -> Result<CollectionInfo, VectorStoreError> {
        let conn = self.conn.lock().await;
        let record_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sections WHERE collection = ?1",
            params![self.collection],
            |row| row.get(0),
        )?;
        let dimension = stored_dimension(&conn, &self.collection)?;

        Ok(CollectionInfo {
            record_count: record_count as u64,
            dimension,
        })
    }

    async fn append(&self, records: Vec<NewSectionRecord>) -> Result<Vec<i64>, VectorStoreError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn.lock().await;

        let mut expected = stored_dimension(&conn, &self.collection)?;
        for record in &records {
            match expected {
                Some(dim) if dim != record.embedding.len() => {
                    return Err(VectorStoreError::DimensionMismatch {
                        expected: dim,
                        actual: record.embedding.len(),
                    });
                }
                None => expected = Some(record.embedding.len()),
                _ => {}
            }
        }

        let tx = conn.transaction()?;
        let base: i64 = tx.query_row(
            "SELECT COUNT(*) FROM sections WHERE collection = ?1",
            params![self.collection],
            |row| row.get(0),
        )?;

        let mut ids = Vec::with_capacity(records.len());
        for (offset, record) in records.into_iter().enumerate() {
            let id = base + offset as i64;
            let metadata = serde_json::to_string(&record.metadata)?;
            tx.execute(
                "INSERT INTO sections (collection, seq_id, content, metadata, embedding, dimensions, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    self.collection,
                    id,
                    record.content,
                    metadata,
                    encode_embedding(&record.embedding),
                    record.embedding.len() as i64,
                    record.created_at,
                ],
            )?;
            ids.push(id);
        }

        tx.commit()?;
        Ok(ids)
    }

    async fn search(
        &self,
        query_vector: Vec<f32>,
        limit: usize,
    ) -> Result<Vec<ScoredSection>, VectorStoreError> {
        let conn = self.conn.lock().await;

        if let Some(dim) = stored_dimension(&conn, &self.collection)?
            && dim != query_vector.len()
        {
            return Err(VectorStoreError::DimensionMismatch {
                expected: dim,
                actual: query_vector.len(),
            });
        }

        let mut stmt = conn.prepare(
            "SELECT seq_id, content, metadata, embedding FROM sections WHERE collection = ?1",
        )?;
        let rows = stmt
            .query_map(params![self.collection], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Vec<u8>>(3)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut scored = Vec::with_capacity(rows.len());
        for (record_id, content, metadata, embedding_bytes) in rows {
            let metadata: SectionMetadata = serde_json::from_str(&metadata)?;
            let embedding = decode_embedding(&embedding_bytes);
            let score = cosine_similarity(&query_vector, &embedding);
            scored.push(ScoredSection {
                record_id,
                score,
                content,
                metadata,
            });
        }

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(limit);

        Ok(scored)
    }

    fn collection(&self) -> &str {
        &self.collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir, collection: &str) -> SqliteStore {
        SqliteStore::open(&StoreConfig {
            persist_dir: dir.path().to_path_buf(),
            collection: collection.to_string(),
        })
        .unwrap()
    }

    fn record(content: &str, index: usize, embedding: Vec<f32>) -> NewSectionRecord {
        NewSectionRecord {
            content: content.to_string(),
            metadata: SectionMetadata {
                document_id: "doc".to_string(),
                name: "Test Document".to_string(),
                description: String::new(),
                section_index: index,
            },
            embedding,
            created_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &[1.0, 0.0, 0.0]) - 1.0).abs() < 0.001);
        assert!(cosine_similarity(&a, &[0.0, 1.0, 0.0]).abs() < 0.001);
        assert!((cosine_similarity(&a, &[-1.0, 0.0, 0.0]) + 1.0).abs() < 0.001);
        assert_eq!(cosine_similarity(&a, &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_embedding_round_trips_through_blob() {
        let values = vec![1.0f32, -2.5, 3.25];
        assert_eq!(decode_embedding(&encode_embedding(&values)), values);
    }

    #[tokio::test]
    async fn test_ids_continue_from_collection_count() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir, "documents");

        let batch = |start: usize| {
            (start..start + 3)
                .map(|i| record(&format!("section {i}"), i, vec![i as f32, 1.0]))
                .collect::<Vec<_>>()
        };

        let first = store.append(batch(0)).await.unwrap();
        assert_eq!(first, vec![0, 1, 2]);

        let second = store.append(batch(0)).await.unwrap();
        assert_eq!(second, vec![3, 4, 5]);

        let info = store.collection_info().await.unwrap();
        assert_eq!(info.record_count, 6);
        assert_eq!(info.dimension, Some(2));
    }

    #[tokio::test]
    async fn test_search_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir, "documents");

        store
            .append(vec![
                record("north", 0, vec![0.0, 1.0]),
                record("east", 1, vec![1.0, 0.0]),
                record("northeast", 2, vec![0.7, 0.7]),
            ])
            .await
            .unwrap();

        let results = store.search(vec![1.0, 0.0], 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].content, "east");
        assert!((results[0].score - 1.0).abs() < 0.001);
        assert_eq!(results[1].content, "northeast");
        assert!(results[0].score >= results[1].score);
    }

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let dir = TempDir::new().unwrap();
        let first = open_store(&dir, "first");
        let second = open_store(&dir, "second");

        first
            .append(vec![record("only in first", 0, vec![1.0, 0.0])])
            .await
            .unwrap();

        // Ids restart per collection, and searches stay scoped.
        let ids = second
            .append(vec![record("only in second", 0, vec![0.0, 1.0])])
            .await
            .unwrap();
        assert_eq!(ids, vec![0]);

        let results = second.search(vec![1.0, 1.0], 10).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, "only in second");
    }

    #[tokio::test]
    async fn test_dimension_mismatch_on_append() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir, "documents");

        store
            .append(vec![record("a", 0, vec![1.0, 2.0, 3.0])])
            .await
            .unwrap();

        let result = store.append(vec![record("b", 1, vec![1.0])]).await;
        assert!(matches!(
            result,
            Err(VectorStoreError::DimensionMismatch {
                expected: 3,
                actual: 1
            })
        ));
    }

    #[tokio::test]
    async fn test_dimension_mismatch_on_search() {
        let dir = TempDir::new().unwrap();
        let store = open_store(&dir, "documents");

        store
            .append(vec![record("a", 0, vec![1.0, 2.0])])
            .await
            .unwrap();

        assert!(matches!(
            store.search(vec![1.0, 2.0, 3.0], 3).await,
            Err(VectorStoreError::DimensionMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_store_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = open_store(&dir, "documents");
            store
                .append(vec![record("durable", 0, vec![1.0, 0.0])])
                .await
                .unwrap();
        }

        let reopened = open_store(&dir, "documents");
        let info = reopened.collection_info().await.unwrap();
        assert_eq!(info.record_count, 1);

        let results = reopened.search(vec![1.0, 0.0], 1).await.unwrap();
        assert_eq!(results[0].content, "durable");
        assert_eq!(results[0].metadata.name, "Test Document");
    }
}
