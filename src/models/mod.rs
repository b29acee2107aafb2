mod chat;
mod config;
mod document;

pub use chat::{Answer, SessionTurn};
pub use config::{
    API_KEY_VAR, ApiConfig, Config, DEFAULT_API_BASE_URL, DEFAULT_CHAT_MODEL, DEFAULT_COLLECTION,
    DEFAULT_EMBEDDING_MODEL, DocumentConfig, IngestionConfig, RetrievalConfig, StoreConfig,
};
pub use document::{Document, NewSectionRecord, ScoredSection, Section, SectionMetadata};
