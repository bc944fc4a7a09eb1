//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

/// A styled paragraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline content in document order
    pub content: Vec<InlineContent>,

    /// Paragraph style
    pub style: ParagraphStyle,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self {
            content: Vec::new(),
            style: ParagraphStyle::default(),
        }
    }

    /// Create a paragraph with a single plain-styled run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.content.push(InlineContent::Text(TextRun::new(text)));
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.content.push(InlineContent::Text(run));
    }

    /// Add a tab character (rendered against the paragraph's tab stops).
    pub fn add_tab(&mut self) {
        self.content.push(InlineContent::Tab);
    }

    /// Get plain text content of the paragraph. Tabs map to `"\t"`.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                InlineContent::Text(run) => run.text.as_str(),
                InlineContent::Tab => "\t",
            })
            .collect()
    }

    /// Check if the paragraph has no visible content.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() || self.plain_text().trim().is_empty()
    }

    /// Check if this is a bulleted list item.
    pub fn is_list_item(&self) -> bool {
        self.style.list_info.is_some()
    }

    /// Iterate text runs, skipping tabs.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.content.iter().filter_map(|c| match c {
            InlineContent::Text(run) => Some(run),
            InlineContent::Tab => None,
        })
    }

    /// Mutably iterate text runs, skipping tabs.
    pub fn runs_mut(&mut self) -> impl Iterator<Item = &mut TextRun> {
        self.content.iter_mut().filter_map(|c| match c {
            InlineContent::Text(run) => Some(run),
            InlineContent::Tab => None,
        })
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Inline content within a paragraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineContent {
    /// A text run with styling
    Text(TextRun),

    /// A tab, advancing to the next paragraph tab stop
    Tab,
}

/// A run of text with consistent styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Text styling
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                bold: true,
                ..Default::default()
            },
        }
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle {
                italic: true,
                ..Default::default()
            },
        }
    }
}

/// Run-level styling properties.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,

    /// Font name override (document default when `None`)
    pub font_name: Option<String>,

    /// Font size override in points (document default when `None`)
    pub font_size: Option<f32>,
}

impl TextStyle {
    /// Check if any styling beyond the document default is applied.
    pub fn has_styling(&self) -> bool {
        self.bold || self.italic || self.font_name.is_some() || self.font_size.is_some()
    }
}

/// Paragraph-level styling properties.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Text alignment
    pub alignment: Alignment,

    /// Space before paragraph in points
    pub space_before: Option<f32>,

    /// Space after paragraph in points
    pub space_after: Option<f32>,

    /// Line spacing multiplier (1.0 = single)
    pub line_spacing: Option<f32>,

    /// Left indent in inches
    pub left_indent: Option<f32>,

    /// Draw a thin rule under the paragraph
    pub bottom_border: bool,

    /// Bullet information if this is a list item
    pub list_info: Option<ListInfo>,

    /// Tab stops, positions in inches from the left margin
    pub tab_stops: Vec<TabStop>,
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

/// A paragraph tab stop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TabStop {
    /// Position in inches from the left margin
    pub position: f32,

    /// How text aligns against the stop
    pub alignment: TabAlignment,
}

impl TabStop {
    /// Create a right-aligned tab stop.
    pub fn right(position: f32) -> Self {
        Self {
            position,
            alignment: TabAlignment::Right,
        }
    }
}

/// Tab stop alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabAlignment {
    /// Text starts at the stop
    Left,
    /// Text centers on the stop
    Center,
    /// Text ends at the stop
    Right,
}

/// Information about a bulleted list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListInfo {
    /// Nesting level (0 = top level)
    pub level: u8,
}

impl ListInfo {
    /// Create a bulleted list item at a nesting level.
    pub fn bullet(level: u8) -> Self {
        Self { level }
    }
}
