use serde::{Deserialize, Serialize};

/// A source document fetched during ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub url: String,
    pub name: String,
    pub description: String,
    pub content: String,
    pub created_at: String,
}

impl Document {
    pub fn generate_id(url: &str) -> String {
        use sha2::{Digest, Sha256};
        let hash = Sha256::digest(url.as_bytes());
        hex::encode(&hash[..16])
    }

    pub fn new(
        url: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        content: String,
    ) -> Self {
        let url = url.into();
        let id = Self::generate_id(&url);
        Self {
            id,
            url,
            name: name.into(),
            description: description.into(),
            content,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// A bounded-size contiguous run of document text. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub content: String,
    pub index: usize,
}

/// Document-level metadata persisted alongside each section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMetadata {
    pub document_id: String,
    pub name: String,
    pub description: String,
    pub section_index: usize,
}

/// A section staged for insertion; the store assigns its identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSectionRecord {
    pub content: String,
    pub metadata: SectionMetadata,
    pub embedding: Vec<f32>,
    pub created_at: String,
}

impl NewSectionRecord {
    pub fn from_section(document: &Document, section: &Section, embedding: Vec<f32>) -> Self {
        Self {
            content: section.content.clone(),
            metadata: SectionMetadata {
                document_id: document.id.clone(),
                name: document.name.clone(),
                description: document.description.clone(),
                section_index: section.index,
            },
            embedding,
            created_at: document.created_at.clone(),
        }
    }
}

/// A stored section returned from a similarity search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredSection {
    pub record_id: i64,
    pub score: f32,
    pub content: String,
    pub metadata: SectionMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_generate_id() {
        let id = Document::generate_id("https://example.com/act.pdf");
        assert_eq!(id.len(), 32);
        assert_eq!(id, Document::generate_id("https://example.com/act.pdf"));
        assert_ne!(id, Document::generate_id("https://example.com/other.pdf"));
    }

    #[test]
    fn test_record_from_section() {
        let document = Document::new(
            "https://example.com/act.pdf",
            "AI Act",
            "Artificial Intelligence Act",
            "body".to_string(),
        );
        let section = Section {
            content: "body".to_string(),
            index: 4,
        };
        let record = NewSectionRecord::from_section(&document, &section, vec![0.5, 0.5]);
        assert_eq!(record.metadata.document_id, document.id);
        assert_eq!(record.metadata.section_index, 4);
        assert_eq!(record.metadata.name, "AI Act");
        assert_eq!(record.created_at, document.created_at);
    }
}
