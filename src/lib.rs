//! # resumedoc
//!
//! Deterministic renderer from marker-tagged resume text to a formatted
//! DOCX document.
//!
//! An upstream generator (an LLM prompt) emits one marker per line, e.g.
//! `[NAME]`, `[JOB_TITLE]`, `[BULLET]`. This library parses that text,
//! walks it through a layout state machine that folds related lines into
//! single visual lines (title | company with a right-aligned date), and
//! packages the result as a complete `.docx` byte buffer.
//!
//! ## Quick Start
//!
//! ```
//! use resumedoc::to_docx;
//!
//! fn main() -> resumedoc::Result<()> {
//!     let text = "[NAME] Jane Doe\n\
//!                 [JOB_TITLE] Engineer\n\
//!                 [COMPANY] Acme\n\
//!                 [DATES] 2020-2022";
//!     let bytes = to_docx(text)?;
//!     assert_eq!(&bytes[..2], b"PK");
//!     Ok(())
//! }
//! ```
//!
//! ## Behavior highlights
//!
//! - **Graceful degradation**: unrecognized lines become plain body
//!   paragraphs; malformed input is never an error. Empty input yields a
//!   valid empty document.
//! - **Pairing**: `[COMPANY]` and `[DATES]` extend the preceding
//!   `[JOB_TITLE]` paragraph; `[EDUCATION_*]` markers pair the same way. A
//!   plain line in between ends the pending pairing.
//! - **Determinism**: identical input yields identical paragraph structure
//!   and text; only package metadata timestamps vary.

pub mod error;
pub mod filename;
pub mod layout;
pub mod marker;
pub mod model;
pub mod render;
pub mod style;

// Re-export commonly used types
pub use error::{Error, Result};
pub use filename::suggest_filename;
pub use layout::compose;
pub use marker::{MarkerKind, MarkerLine, MarkerParser};
pub use model::{
    Alignment, Document, InlineContent, ListInfo, PageSetup, Paragraph, ParagraphStyle,
    TabAlignment, TabStop, TextRun, TextStyle,
};
pub use render::JsonFormat;
pub use style::StyleSheet;

/// Render marker-tagged text to a `.docx` buffer with the default style.
///
/// # Example
///
/// ```
/// let bytes = resumedoc::to_docx("[NAME] Jane Doe").unwrap();
/// assert!(!bytes.is_empty());
/// ```
pub fn to_docx(text: &str) -> Result<Vec<u8>> {
    DocxRenderer::new().render(text)
}

/// Render marker-tagged text to a `.docx` buffer with a custom style sheet.
pub fn to_docx_with_style(text: &str, style: &StyleSheet) -> Result<Vec<u8>> {
    let doc = layout::compose(text, style);
    render::to_docx(&doc, style)
}

/// Reusable renderer: compiled marker table plus a style sheet.
///
/// Construction compiles the marker patterns once; `render` and `compose`
/// take `&self` and build a fresh document per call, so one renderer can be
/// shared across threads or invoked concurrently.
///
/// # Example
///
/// ```
/// use resumedoc::{DocxRenderer, StyleSheet};
///
/// let renderer = DocxRenderer::with_style(StyleSheet::new().with_font("Georgia"));
/// let doc = renderer.compose("[SECTION_HEADER] Skills");
/// assert_eq!(doc.paragraphs[0].plain_text(), "SKILLS");
/// ```
pub struct DocxRenderer {
    parser: MarkerParser,
    style: StyleSheet,
}

impl DocxRenderer {
    /// Create a renderer with the default style sheet.
    pub fn new() -> Self {
        Self::with_style(StyleSheet::default())
    }

    /// Create a renderer with a custom style sheet.
    pub fn with_style(style: StyleSheet) -> Self {
        Self {
            parser: MarkerParser::new(),
            style,
        }
    }

    /// The style sheet in use.
    pub fn style(&self) -> &StyleSheet {
        &self.style
    }

    /// Compose the structural document without packaging it.
    pub fn compose(&self, text: &str) -> Document {
        layout::compose_with_parser(&self.parser, text, &self.style)
    }

    /// Render marker-tagged text to a complete `.docx` buffer.
    pub fn render(&self, text: &str) -> Result<Vec<u8>> {
        let doc = self.compose(text);
        render::to_docx(&doc, &self.style)
    }

    /// Render to JSON for inspection of the composed structure.
    pub fn render_json(&self, text: &str, format: JsonFormat) -> Result<String> {
        let doc = self.compose(text);
        render::to_json(&doc, format)
    }
}

impl Default for DocxRenderer {
    fn default() -> Self {
        Self::new()
    }
}
