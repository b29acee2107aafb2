//! Error types for the document QA pipeline.

use thiserror::Error;

/// Errors related to configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),

    #[error("path error: {0}")]
    PathError(String),

    #[error("missing API key: set the {0} environment variable or add it to a .env file")]
    MissingApiKey(String),
}

/// Errors related to document download and text extraction.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("download request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("download failed with status {0}")]
    HttpStatus(reqwest::StatusCode),

    #[error("PDF parse error: {0}")]
    PdfParseError(String),
}

/// Errors related to embedding operations.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("embedding server error: {0}")]
    ServerError(String),

    #[error("invalid embedding response: {0}")]
    InvalidResponse(String),

    #[error("no embedding returned for input text")]
    MissingVector,
}

/// Errors related to chat generation.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("chat server error: {0}")]
    ServerError(String),

    #[error("invalid chat response: {0}")]
    InvalidResponse(String),

    #[error("response contained no text")]
    EmptyResponse,
}

/// Errors related to vector store operations.
#[derive(Debug, Error)]
pub enum VectorStoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("metadata serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Errors related to retrieval (question embedding plus similarity search).
#[derive(Debug, Error)]
pub enum RetrieveError {
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("vector store error: {0}")]
    Store(#[from] VectorStoreError),
}

/// Errors related to ingestion.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("document contained no extractable text")]
    EmptyDocument,

    #[error("every section failed to embed; nothing was stored")]
    AllSectionsSkipped,

    #[error("vector store error: {0}")]
    Store(#[from] VectorStoreError),
}

/// Errors returned from a question-answering request.
///
/// Retrieval failures and generation failures stay distinguishable so callers
/// can react to them separately.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrieveError),

    #[error("generation failed: {0}")]
    Generation(#[from] ChatError),
}

/// Application-level errors that wrap domain errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("chat error: {0}")]
    Chat(#[from] ChatError),

    #[error("vector store error: {0}")]
    Store(#[from] VectorStoreError),

    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("ask error: {0}")]
    Ask(#[from] AskError),
}
