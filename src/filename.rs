//! Artifact filename suggestion.
//!
//! The upload layer tracks generated documents by a descriptive, unique
//! name: `Resume_<name>_<job>_<company>_<timestamp>.docx`. The candidate
//! name is pulled from the `[NAME]` marker line; job title and company come
//! from the calling orchestration (they describe the posting, not the
//! resume).

use chrono::Local;
use regex::Regex;

use crate::marker::{MarkerKind, MarkerParser};

const UNKNOWN: &str = "Not Specified";

/// Suggest a unique `.docx` filename for a rendered resume.
///
/// Components are sanitized to filesystem-safe tokens; missing components
/// fall back to `Not_Specified`. The trailing timestamp makes repeated
/// renders distinguishable.
pub fn suggest_filename(marker_text: &str, job_title: &str, company: &str) -> String {
    let name = extract_name(marker_text).unwrap_or_else(|| UNKNOWN.to_string());
    let timestamp = Local::now().format("%Y%m%d%H%M%S");
    format!(
        "Resume_{}_{}_{}_{}.docx",
        sanitize(&name),
        sanitize(job_title),
        sanitize(company),
        timestamp
    )
}

/// Pull the candidate name from the first non-empty `[NAME]` line.
pub fn extract_name(marker_text: &str) -> Option<String> {
    let parser = MarkerParser::new();
    let name = parser
        .parse_lines(marker_text)
        .find(|line| line.kind == MarkerKind::Name && !line.is_empty())
        .map(|line| line.text);
    name
}

fn sanitize(text: &str) -> String {
    // Keep word characters, whitespace, and hyphens; collapse the remainder
    // the way the tracking ledger expects.
    let re = Regex::new(r"[^\w\s-]").unwrap_or_else(|e| panic!("invalid sanitize pattern: {}", e));
    let cleaned = re.replace_all(text, "");
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        return UNKNOWN.replace(' ', "_");
    }
    trimmed.replace(' ', "_")
}
