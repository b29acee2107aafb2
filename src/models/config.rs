use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-004";
pub const DEFAULT_CHAT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_COLLECTION: &str = "documents";

/// Environment variable holding the API key for the model provider.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub document: DocumentConfig,

    #[serde(default)]
    pub ingestion: IngestionConfig,

    #[serde(default)]
    pub retrieval: RetrievalConfig,
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("docchat").join("config.toml"))
    }

    pub fn load() -> Result<Self, crate::error::ConfigError> {
        if let Some(path) = Self::config_path()
            && path.exists()
        {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            return Ok(config);
        }
        Ok(Self::default())
    }

    pub fn save(&self) -> Result<(), crate::error::ConfigError> {
        let path = Self::config_path().ok_or_else(|| {
            crate::error::ConfigError::PathError("could not determine config directory".to_string())
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}

/// Connection settings for the hosted embedding/chat model provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_embedding_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

fn default_chat_model() -> String {
    DEFAULT_CHAT_MODEL.to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            embedding_model: default_embedding_model(),
            chat_model: default_chat_model(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ApiConfig {
    /// Resolve the API key from the process environment or a local `.env`
    /// file. A missing or empty key is a fatal configuration error.
    pub fn resolve_api_key(&self) -> Result<String, crate::error::ConfigError> {
        dotenvy::dotenv().ok();
        match std::env::var(API_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(crate::error::ConfigError::MissingApiKey(
                API_KEY_VAR.to_string(),
            )),
        }
    }
}

/// Location of the persisted vector collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the persisted collection.
    #[serde(default = "default_persist_dir")]
    pub persist_dir: PathBuf,

    /// Collection name scoping records within the store.
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_persist_dir() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join("docchat"))
        .unwrap_or_else(|| PathBuf::from(".docchat"))
}

fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            persist_dir: default_persist_dir(),
            collection: default_collection(),
        }
    }
}

/// Source document to ingest.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentConfig {
    pub url: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Target section size in characters.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Number of records staged per store write.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

fn default_chunk_size() -> usize {
    1000
}

fn default_batch_size() -> usize {
    100
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            batch_size: default_batch_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Number of nearest sections fetched per question.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    3
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}
