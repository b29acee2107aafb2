mod chat;
mod embedding;
mod fetcher;
mod ingest;
mod qa;
mod retriever;
mod session;
mod splitter;
mod vector_store;

pub use chat::{ChatModel, GeminiChat};
pub use embedding::{Embedder, GeminiEmbedder};
pub use fetcher::{DocumentFetcher, PdfFetcher};
pub use ingest::{IngestReport, IngestRequest, Ingestor, SkippedSection};
pub use qa::{DocumentChat, QA_SYSTEM_PROMPT, assemble_context, build_prompt};
pub use retriever::{Retriever, VectorRetriever};
pub use session::SessionStore;
pub use splitter::SectionSplitter;
pub use vector_store::{CollectionInfo, SqliteStore, VectorStore};
