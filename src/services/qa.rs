//! Retrieval-augmented question answering.

use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{AppError, AskError};
use crate::models::{Answer, Config, RetrievalConfig, ScoredSection};
use crate::services::chat::{ChatModel, GeminiChat};
use crate::services::embedding::GeminiEmbedder;
use crate::services::retriever::{Retriever, VectorRetriever};
use crate::services::session::SessionStore;
use crate::services::vector_store::SqliteStore;

/// Prompt template for grounded answering; `{context}` is replaced with the
/// retrieved sections.
pub const QA_SYSTEM_PROMPT: &str = "You are an assistant for question-answering tasks. \
Use the following pieces of retrieved context to answer the question. \
If you don't know the answer, just say that you don't know. \
Use three sentences maximum and keep the answer concise.\n\n{context}";

/// Concatenate retrieved sections, in result order, with blank-line
/// separators. No deduplication, no thresholding, no length cap.
pub fn assemble_context(sections: &[ScoredSection]) -> String {
    sections
        .iter()
        .map(|s| s.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Fill the prompt template with `context` and append the raw question.
pub fn build_prompt(context: &str, question: &str) -> String {
    let system = QA_SYSTEM_PROMPT.replace("{context}", context);
    format!("{system}\n\n{question}")
}

/// Answers questions about one ingested document.
///
/// Each ask is a single fresh message to the chat model; the session store
/// records completed turns but no multi-turn memory is sent to the model.
pub struct DocumentChat {
    retriever: Arc<dyn Retriever>,
    chat: Arc<dyn ChatModel>,
    session_id: String,
    top_k: usize,
}

impl DocumentChat {
    pub fn new(
        retriever: Arc<dyn Retriever>,
        chat: Arc<dyn ChatModel>,
        session_id: impl Into<String>,
        config: &RetrievalConfig,
    ) -> Self {
        Self {
            retriever,
            chat,
            session_id: session_id.into(),
            top_k: config.top_k.max(1),
        }
    }

    /// Wire the production query pipeline from configuration. Fails fast
    /// when the API key is missing.
    pub fn from_config(config: &Config, session_id: impl Into<String>) -> Result<Self, AppError> {
        let api_key = config.api.resolve_api_key()?;
        let embedder = GeminiEmbedder::new(&config.api, api_key.clone())?;
        let chat = GeminiChat::new(&config.api, api_key)?;
        let store = SqliteStore::open(&config.store)?;
        let retriever = VectorRetriever::new(Arc::new(embedder), Arc::new(store));

        Ok(Self::new(
            Arc::new(retriever),
            Arc::new(chat),
            session_id,
            &config.retrieval,
        ))
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Answer `question` from the ingested document, recording the turn in
    /// `sessions` on success.
    pub async fn ask(
        &self,
        sessions: &mut SessionStore,
        question: &str,
    ) -> Result<Answer, AskError> {
        let sections = self.retriever.retrieve(question, self.top_k).await?;
        debug!(
            session = %self.session_id,
            retrieved = sections.len(),
            "retrieved context sections"
        );

        let context = assemble_context(&sections);
        let prompt = build_prompt(&context, question);

        let text = self.chat.generate(&prompt).await?;
        info!(session = %self.session_id, "answer generated");

        sessions.record(&self.session_id, question, &text);
        Ok(Answer { text, sections })
    }
}
