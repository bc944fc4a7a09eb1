//! Document-level types.

use super::Paragraph;
use serde::{Deserialize, Serialize};

/// A composed document: page setup plus an ordered list of styled
/// paragraphs.
///
/// The list is append-only. The layout state machine refers back to
/// already-emitted paragraphs by index (never by reference) when a pairing
/// line extends an earlier one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Page margins and default font
    pub page: PageSetup,

    /// Paragraphs in document order
    pub paragraphs: Vec<Paragraph>,
}

impl Document {
    /// Create an empty document with the given page setup.
    pub fn new(page: PageSetup) -> Self {
        Self {
            page,
            paragraphs: Vec::new(),
        }
    }

    /// Append a paragraph and return its index.
    pub fn push_paragraph(&mut self, paragraph: Paragraph) -> usize {
        self.paragraphs.push(paragraph);
        self.paragraphs.len() - 1
    }

    /// Get a paragraph by index.
    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    /// Get a paragraph mutably by index.
    pub fn paragraph_mut(&mut self, index: usize) -> Option<&mut Paragraph> {
        self.paragraphs.get_mut(index)
    }

    /// Plain text of the most recently emitted paragraph, if any.
    pub fn last_paragraph_text(&self) -> Option<String> {
        self.paragraphs.last().map(|p| p.plain_text())
    }

    /// Check if the document has any paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Plain text content of the whole document, one line per paragraph.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Page margins and default font, applied once at document start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    /// Top margin in inches
    pub margin_top: f32,

    /// Bottom margin in inches
    pub margin_bottom: f32,

    /// Left margin in inches
    pub margin_left: f32,

    /// Right margin in inches
    pub margin_right: f32,

    /// Default font family for all unstyled text
    pub font_name: String,

    /// Default font size in points
    pub font_size: f32,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            margin_top: 0.5,
            margin_bottom: 0.5,
            margin_left: 0.5,
            margin_right: 0.5,
            font_name: "Calibri".to_string(),
            font_size: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_new() {
        let doc = Document::new(PageSetup::default());
        assert!(doc.is_empty());
        assert!(doc.last_paragraph_text().is_none());
    }

    #[test]
    fn test_push_paragraph_returns_index() {
        let mut doc = Document::new(PageSetup::default());
        assert_eq!(doc.push_paragraph(Paragraph::with_text("first")), 0);
        assert_eq!(doc.push_paragraph(Paragraph::with_text("second")), 1);
        assert_eq!(doc.last_paragraph_text().as_deref(), Some("second"));
    }

    #[test]
    fn test_plain_text_joins_paragraphs() {
        let mut doc = Document::new(PageSetup::default());
        doc.push_paragraph(Paragraph::with_text("one"));
        doc.push_paragraph(Paragraph::with_text("two"));
        assert_eq!(doc.plain_text(), "one\ntwo");
    }
}
