//! Marker-tagged line parsing.
//!
//! The upstream rewrite generator emits one marker (or plain text) per line,
//! e.g. `[JOB_TITLE] Senior Cloud Engineer`. The tag vocabulary is a frozen
//! wire contract; tags match case-insensitively and must anchor at the
//! (optionally indented) start of the line.

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Semantic role of one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    /// `[NAME]` - candidate name
    Name,
    /// `[CONTACT]` - phone / email / links line
    Contact,
    /// `[SUMMARY]` - professional summary, payload may span embedded newlines
    Summary,
    /// `[SECTION_HEADER]` - top-level resume section
    SectionHeader,
    /// `[JOB_TITLE]` - opens a job pairing block
    JobTitle,
    /// `[COMPANY]` - complement to a pending job title
    Company,
    /// `[DATES]` - closes a job pairing block
    Dates,
    /// `[LOCATION]` - standalone location line
    Location,
    /// `[BULLET]` - achievement bullet
    Bullet,
    /// `[SKILL_CATEGORY]` - skill group label
    SkillCategory,
    /// `[SKILLS]` - skill list, may continue the preceding category inline
    Skills,
    /// `[EDUCATION_DEGREE]` - opens an education pairing block
    EducationDegree,
    /// `[EDUCATION_SCHOOL]` - complement to a pending degree
    EducationSchool,
    /// `[EDUCATION_DATES]` - closes an education pairing block
    EducationDates,
    /// `[EDUCATION_DETAILS]` - standalone education note
    EducationDetails,
    /// No tag matched; the whole trimmed line is body text
    Plain,
}

impl MarkerKind {
    /// All tagged kinds, in the fixed order matching is attempted.
    pub const TAGGED: [MarkerKind; 15] = [
        MarkerKind::Name,
        MarkerKind::Contact,
        MarkerKind::Summary,
        MarkerKind::SectionHeader,
        MarkerKind::JobTitle,
        MarkerKind::Company,
        MarkerKind::Dates,
        MarkerKind::Location,
        MarkerKind::Bullet,
        MarkerKind::SkillCategory,
        MarkerKind::Skills,
        MarkerKind::EducationDegree,
        MarkerKind::EducationSchool,
        MarkerKind::EducationDates,
        MarkerKind::EducationDetails,
    ];

    /// The wire tag for this kind, without brackets. `Plain` has none.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            MarkerKind::Name => Some("NAME"),
            MarkerKind::Contact => Some("CONTACT"),
            MarkerKind::Summary => Some("SUMMARY"),
            MarkerKind::SectionHeader => Some("SECTION_HEADER"),
            MarkerKind::JobTitle => Some("JOB_TITLE"),
            MarkerKind::Company => Some("COMPANY"),
            MarkerKind::Dates => Some("DATES"),
            MarkerKind::Location => Some("LOCATION"),
            MarkerKind::Bullet => Some("BULLET"),
            MarkerKind::SkillCategory => Some("SKILL_CATEGORY"),
            MarkerKind::Skills => Some("SKILLS"),
            MarkerKind::EducationDegree => Some("EDUCATION_DEGREE"),
            MarkerKind::EducationSchool => Some("EDUCATION_SCHOOL"),
            MarkerKind::EducationDates => Some("EDUCATION_DATES"),
            MarkerKind::EducationDetails => Some("EDUCATION_DETAILS"),
            MarkerKind::Plain => None,
        }
    }
}

/// One parsed input line: marker kind plus trimmed payload.
///
/// A line that matches a tag but carries no payload still reports its kind
/// with empty `text`; the layout stage suppresses output for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerLine {
    /// Semantic role of the line
    pub kind: MarkerKind,

    /// Trimmed payload following the tag (whole trimmed line for `Plain`)
    pub text: String,
}

impl MarkerLine {
    /// Create a marker line.
    pub fn new(kind: MarkerKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// True when the payload is empty after trimming.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Parser holding the compiled marker table.
///
/// Matching is attempted against every tag in [`MarkerKind::TAGGED`] order;
/// the first tag that matches consumes the line. Construction compiles the
/// table once, so callers that render many documents should reuse one
/// instance.
#[derive(Debug)]
pub struct MarkerParser {
    table: Vec<(MarkerKind, Regex)>,
}

impl MarkerParser {
    /// Compile the marker table.
    pub fn new() -> Self {
        let table = MarkerKind::TAGGED
            .iter()
            .map(|&kind| {
                let tag = kind.tag().unwrap_or_default();
                let pattern = format!(r"(?i)^\s*\[{}\]\s*(.*)$", tag);
                // Patterns are fixed literals over a fixed alphabet.
                let regex = Regex::new(&pattern).unwrap_or_else(|e| {
                    panic!("invalid marker pattern for [{}]: {}", tag, e)
                });
                (kind, regex)
            })
            .collect();
        Self { table }
    }

    /// Classify a single trimmed, non-empty line.
    pub fn classify(&self, line: &str) -> MarkerLine {
        for (kind, regex) in &self.table {
            if let Some(captures) = regex.captures(line) {
                let text = captures
                    .get(1)
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default();
                return MarkerLine::new(*kind, text);
            }
        }
        MarkerLine::new(MarkerKind::Plain, line.to_string())
    }

    /// Parse marker text into a lazy sequence of [`MarkerLine`].
    ///
    /// Splits on line breaks, trims each line, and skips fully blank lines.
    /// Blank lines carry no paragraph-break semantics; they simply produce
    /// no item. Deterministic: the same input always yields the same
    /// sequence.
    pub fn parse_lines<'a>(&'a self, text: &'a str) -> impl Iterator<Item = MarkerLine> + 'a {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(move |line| self.classify(line))
    }

    /// Count `[BULLET]` lines in the input without a full parse pass.
    pub fn count_bullets(&self, text: &str) -> usize {
        let count = self
            .parse_lines(text)
            .filter(|line| line.kind == MarkerKind::Bullet)
            .count();
        debug!("input contains {} bullet lines", count);
        count
    }
}

impl Default for MarkerParser {
    fn default() -> Self {
        Self::new()
    }
}
