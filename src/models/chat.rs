//! Answer and conversation models.

use serde::{Deserialize, Serialize};

use super::document::ScoredSection;

/// A generated answer together with the sections that grounded it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub sections: Vec<ScoredSection>,
}

/// One completed question/answer exchange within a conversation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTurn {
    pub question: String,
    pub answer: String,
    pub asked_at: String,
}

impl SessionTurn {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            asked_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
