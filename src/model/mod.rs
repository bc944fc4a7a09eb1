//! Structured document model.
//!
//! The layout state machine composes a [`Document`] out of styled
//! paragraphs; the render module serializes it into a DOCX package.

mod document;
mod paragraph;

pub use document::{Document, PageSetup};
pub use paragraph::{
    Alignment, InlineContent, ListInfo, Paragraph, ParagraphStyle, TabAlignment, TabStop,
    TextRun, TextStyle,
};
