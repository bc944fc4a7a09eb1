//! Style configuration.
//!
//! All formatting tunables flow through an explicit [`StyleSheet`] passed in
//! at construction; the renderer reads no environment and keeps no global
//! state. The defaults reproduce the reference layout: 0.5 in margins,
//! Calibri 10 pt body text, 16 pt name line, compact bullet list.

use crate::model::PageSetup;
use serde::{Deserialize, Serialize};

/// Immutable style configuration for composing and rendering a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    /// Page margins in inches (applied to all four sides via [`PageSetup`])
    pub margin: f32,

    /// Default font family
    pub font_name: String,

    /// Default font size in points
    pub font_size: f32,

    /// Font size for the name line
    pub name_size: f32,

    /// Font size for contact, location, and education detail lines
    pub detail_size: f32,

    /// Font size for section headers
    pub section_size: f32,

    /// Right-aligned tab stop for dates, inches from the left margin.
    /// Shared by job-date and education-date pairings.
    pub date_tab_position: f32,

    /// Bullet indent step in inches; a bullet at nesting level `n` indents
    /// `(n + 1)` steps
    pub bullet_indent_step: f32,

    /// Space after a paragraph inside a job/education block, in points
    pub tight_space_after: f32,

    /// Space after a default paragraph, in points
    pub body_space_after: f32,

    /// Space after the contact line, in points
    pub contact_space_after: f32,

    /// Space before a section header, in points
    pub section_space_before: f32,

    /// Space before a skill category line, in points
    pub category_space_before: f32,
}

impl StyleSheet {
    /// Create a style sheet with the reference defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page margin (all four sides), in inches.
    pub fn with_margin(mut self, inches: f32) -> Self {
        self.margin = inches;
        self
    }

    /// Set the default font family.
    pub fn with_font(mut self, name: impl Into<String>) -> Self {
        self.font_name = name.into();
        self
    }

    /// Set the default font size in points.
    pub fn with_font_size(mut self, points: f32) -> Self {
        self.font_size = points;
        self
    }

    /// Set the date tab stop position, in inches from the left margin.
    pub fn with_date_tab_position(mut self, inches: f32) -> Self {
        self.date_tab_position = inches;
        self
    }

    /// Page setup derived from this style sheet.
    pub fn page_setup(&self) -> PageSetup {
        PageSetup {
            margin_top: self.margin,
            margin_bottom: self.margin,
            margin_left: self.margin,
            margin_right: self.margin,
            font_name: self.font_name.clone(),
            font_size: self.font_size,
        }
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            margin: 0.5,
            font_name: "Calibri".to_string(),
            font_size: 10.0,
            name_size: 16.0,
            detail_size: 9.0,
            section_size: 11.0,
            date_tab_position: 6.5,
            bullet_indent_step: 0.25,
            tight_space_after: 2.0,
            body_space_after: 3.0,
            contact_space_after: 6.0,
            section_space_before: 6.0,
            category_space_before: 3.0,
        }
    }
}
