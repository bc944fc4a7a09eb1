//! Rendering module: composed document model to output artifacts.

mod docx;
mod json;
mod package;

pub use json::{to_json, JsonFormat};

use crate::error::Result;
use crate::model::Document;
use crate::style::StyleSheet;

/// Render a composed document into a complete `.docx` byte buffer.
///
/// Produced and returned whole, no streaming. Paragraph structure and text
/// are deterministic for identical input; only the package's core
/// properties (timestamps) vary between runs.
pub fn to_docx(doc: &Document, style: &StyleSheet) -> Result<Vec<u8>> {
    package::write_package(doc, style)
}
