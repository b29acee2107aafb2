//! Paragraph-based text splitting into bounded-size sections.

use crate::models::{IngestionConfig, Section};

/// Paragraph boundary used when splitting document text.
const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Splits document text into ordered, non-overlapping sections.
///
/// Paragraphs accumulate into a running buffer; once the next paragraph would
/// push the buffer past the target size the buffer is emitted and a new one
/// starts. A single paragraph larger than the target becomes its own
/// oversized section rather than being broken mid-paragraph.
#[derive(Debug, Clone)]
pub struct SectionSplitter {
    max_len: usize,
}

impl SectionSplitter {
    pub fn new(config: &IngestionConfig) -> Self {
        Self {
            max_len: config.chunk_size.max(1),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&IngestionConfig::default())
    }

    /// Split `text` into sections. The trailing buffer is always emitted,
    /// even when under the target size; no emitted section is empty.
    pub fn split(&self, text: &str) -> Vec<Section> {
        let mut sections = Vec::new();
        let mut buffer = String::new();

        for paragraph in text.split(PARAGRAPH_SEPARATOR) {
            let paragraph = paragraph.trim();
            if paragraph.is_empty() {
                continue;
            }

            if !buffer.is_empty()
                && buffer.len() + PARAGRAPH_SEPARATOR.len() + paragraph.len() > self.max_len
            {
                push_section(&mut sections, &mut buffer);
            }

            if !buffer.is_empty() {
                buffer.push_str(PARAGRAPH_SEPARATOR);
            }
            buffer.push_str(paragraph);
        }

        push_section(&mut sections, &mut buffer);
        sections
    }
}

fn push_section(sections: &mut Vec<Section>, buffer: &mut String) {
    if !buffer.is_empty() {
        sections.push(Section {
            content: std::mem::take(buffer),
            index: sections.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter(max_len: usize) -> SectionSplitter {
        SectionSplitter::new(&IngestionConfig {
            chunk_size: max_len,
            ..Default::default()
        })
    }

    #[test]
    fn test_empty_input_yields_no_sections() {
        assert!(splitter(100).split("").is_empty());
        assert!(splitter(100).split("\n\n\n\n").is_empty());
    }

    #[test]
    fn test_small_input_single_section() {
        let sections = splitter(100).split("just one short paragraph");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "just one short paragraph");
        assert_eq!(sections[0].index, 0);
    }

    #[test]
    fn test_sections_respect_budget() {
        let text = "aaaa\n\nbbbb\n\ncccc\n\ndddd";
        let sections = splitter(10).split(text);
        assert!(sections.len() > 1);
        for section in &sections {
            assert!(section.content.len() <= 10, "{:?}", section.content);
            assert!(!section.content.is_empty());
        }
    }

    #[test]
    fn test_oversized_paragraph_forms_own_section() {
        let big = "x".repeat(50);
        let text = format!("small\n\n{big}\n\nalso small");
        let sections = splitter(20).split(&text);

        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].content, "small");
        assert_eq!(sections[1].content, big);
        assert_eq!(sections[2].content, "also small");
    }

    #[test]
    fn test_trailing_buffer_always_emitted() {
        let text = "aaaaaaaa\n\nbb";
        let sections = splitter(8).split(text);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[1].content, "bb");
    }

    #[test]
    fn test_indices_are_sequential() {
        let text = "one\n\ntwo\n\nthree\n\nfour\n\nfive";
        let sections = splitter(9).split(text);
        for (i, section) in sections.iter().enumerate() {
            assert_eq!(section.index, i);
        }
    }

    #[test]
    fn test_concatenation_reconstructs_input() {
        let text = "First paragraph here.\n\nSecond paragraph.\n\nThird one.\n\nFourth and last.";
        let sections = splitter(30).split(text);

        let rebuilt = sections
            .iter()
            .map(|s| s.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_whitespace_normalized_at_boundaries() {
        let text = "  padded paragraph  \n\n\n\nnext one\n";
        let sections = splitter(100).split(text);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "padded paragraph\n\nnext one");
    }
}
