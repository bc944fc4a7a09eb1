//! Layout state machine.
//!
//! Walks the parsed marker sequence in a single pass and composes a
//! [`Document`]. Whether a line becomes a new paragraph or extends an
//! earlier one depends on accumulated state: a `[JOB_TITLE]` opens a pairing
//! block that a following `[COMPANY]` and `[DATES]` fold into the same
//! visual line, and the education markers do the same with their own
//! tracker. An unmatched plain line ends any pending pairing.

use log::{debug, warn};

use crate::marker::{MarkerKind, MarkerLine, MarkerParser};
use crate::model::{Alignment, Document, ListInfo, Paragraph, TabStop, TextRun};
use crate::style::StyleSheet;

/// Bullet documents shorter than this tend to leave the second page mostly
/// blank; worth a warning, not an error.
const EXPECTED_MIN_BULLETS: usize = 15;

/// Compose a document from marker-tagged text.
///
/// Pure and deterministic: identical input yields an identical paragraph
/// structure. Empty or fully unrecognized input composes a document of
/// plain paragraphs (possibly zero), never an error.
pub fn compose(text: &str, style: &StyleSheet) -> Document {
    compose_with_parser(&MarkerParser::new(), text, style)
}

/// Compose with a caller-provided (reusable) parser.
pub(crate) fn compose_with_parser(
    parser: &MarkerParser,
    text: &str,
    style: &StyleSheet,
) -> Document {
    let mut composer = Composer::new(style);
    for line in parser.parse_lines(text) {
        composer.emit(&line);
    }
    composer.finish()
}

/// Back-references into the paragraph list for pairing lines.
///
/// Indices plus `Option` validity, never raw references: the document is
/// append-only, so a stored index stays valid until it is cleared.
#[derive(Debug, Default)]
struct LayoutState {
    /// Most recent job-title/company paragraph still awaiting its dates
    open_job: Option<usize>,

    /// Most recent degree/school paragraph still awaiting its dates
    open_education: Option<usize>,
}

struct Composer<'a> {
    doc: Document,
    style: &'a StyleSheet,
    state: LayoutState,
    bullet_count: usize,
}

impl<'a> Composer<'a> {
    fn new(style: &'a StyleSheet) -> Self {
        Self {
            doc: Document::new(style.page_setup()),
            style,
            state: LayoutState::default(),
            bullet_count: 0,
        }
    }

    fn finish(self) -> Document {
        debug!(
            "composed {} paragraphs ({} bullets)",
            self.doc.paragraphs.len(),
            self.bullet_count
        );
        if self.bullet_count > 0 && self.bullet_count < EXPECTED_MIN_BULLETS {
            warn!(
                "resume has only {} bullet points; may not fill two pages",
                self.bullet_count
            );
        }
        self.doc
    }

    fn emit(&mut self, line: &MarkerLine) {
        // A recognized tag with an empty payload is consumed silently; no
        // paragraph, no state change.
        if line.is_empty() {
            return;
        }
        let text = line.text.as_str();

        match line.kind {
            MarkerKind::Name => {
                let mut run = TextRun::bold(text);
                run.style.font_size = Some(self.style.name_size);
                let mut p = paragraph_with_run(run);
                p.style.alignment = Alignment::Center;
                p.style.space_after = Some(self.style.tight_space_after);
                self.doc.push_paragraph(p);
            }

            MarkerKind::Contact => {
                let mut run = TextRun::new(text);
                run.style.font_size = Some(self.style.detail_size);
                let mut p = paragraph_with_run(run);
                p.style.alignment = Alignment::Center;
                p.style.space_after = Some(self.style.contact_space_after);
                p.style.bottom_border = true;
                self.doc.push_paragraph(p);
            }

            MarkerKind::Summary => {
                // Payload may carry embedded newlines; one paragraph per
                // sub-line, all at default weight.
                for sub_line in text.split('\n') {
                    if sub_line.trim().is_empty() {
                        continue;
                    }
                    let mut p = Paragraph::with_text(sub_line.trim());
                    p.style.space_after = Some(self.style.tight_space_after);
                    self.doc.push_paragraph(p);
                }
            }

            MarkerKind::SectionHeader => {
                let mut run = TextRun::bold(text.to_uppercase());
                run.style.font_size = Some(self.style.section_size);
                let mut p = paragraph_with_run(run);
                p.style.space_before = Some(self.style.section_space_before);
                p.style.space_after = Some(self.style.body_space_after);
                p.style.bottom_border = true;
                self.doc.push_paragraph(p);
            }

            MarkerKind::JobTitle => {
                // Two titles in a row would leave the first block dangling;
                // the new title simply takes over the tracker.
                let index = self.push_block_opener(TextRun::bold(text));
                self.state.open_job = Some(index);
            }

            MarkerKind::Company => {
                match self.open_paragraph(self.state.open_job) {
                    Some(index) => {
                        // Same visual line as the title; DATES still needs
                        // the tracker, so leave it set.
                        self.append_run(index, TextRun::italic(format!(" | {}", text)));
                    }
                    None => {
                        let index = self.push_block_opener(TextRun::italic(text));
                        self.state.open_job = Some(index);
                    }
                }
            }

            MarkerKind::Dates => {
                let open = self.state.open_job.take();
                self.close_block_with_dates(open, text);
            }

            MarkerKind::Location => {
                let mut run = TextRun::italic(text);
                run.style.font_size = Some(self.style.detail_size);
                let mut p = paragraph_with_run(run);
                p.style.space_after = Some(self.style.tight_space_after);
                self.doc.push_paragraph(p);
            }

            MarkerKind::Bullet => {
                self.bullet_count += 1;
                self.push_bullet(text, 0);
            }

            MarkerKind::SkillCategory => {
                let mut p = paragraph_with_run(TextRun::bold(format!("{}: ", text)));
                p.style.space_before = Some(self.style.category_space_before);
                p.style.space_after = Some(0.0);
                self.doc.push_paragraph(p);
            }

            MarkerKind::Skills => {
                // Inline continuation is decided purely by the literal ": "
                // suffix of the last emitted paragraph, whatever produced it.
                let continues = self
                    .doc
                    .last_paragraph_text()
                    .is_some_and(|t| t.ends_with(": "));
                if continues {
                    let index = self.doc.paragraphs.len() - 1;
                    self.append_run(index, TextRun::new(text));
                    if let Some(p) = self.doc.paragraph_mut(index) {
                        p.style.space_after = Some(self.style.body_space_after);
                    }
                } else {
                    let mut p = Paragraph::with_text(text);
                    p.style.space_after = Some(self.style.body_space_after);
                    self.doc.push_paragraph(p);
                }
            }

            MarkerKind::EducationDegree => {
                let index = self.push_block_opener(TextRun::bold(text));
                self.state.open_education = Some(index);
            }

            MarkerKind::EducationSchool => match self.open_paragraph(self.state.open_education) {
                Some(index) => {
                    self.append_run(index, TextRun::italic(format!(", {}", text)));
                }
                None => {
                    let index = self.push_block_opener(TextRun::italic(text));
                    self.state.open_education = Some(index);
                }
            },

            MarkerKind::EducationDates => {
                let open = self.state.open_education.take();
                self.close_block_with_dates(open, text);
            }

            MarkerKind::EducationDetails => {
                let mut run = TextRun::italic(text);
                run.style.font_size = Some(self.style.detail_size);
                let mut p = paragraph_with_run(run);
                p.style.space_after = Some(self.style.body_space_after);
                self.doc.push_paragraph(p);
            }

            MarkerKind::Plain => {
                // Body text under a title ends any pending pairing.
                let mut p = Paragraph::with_text(text);
                p.style.space_after = Some(self.style.body_space_after);
                self.doc.push_paragraph(p);
                self.state.open_job = None;
                self.state.open_education = None;
            }
        }
    }

    /// Start a title/category paragraph that a later line may extend.
    fn push_block_opener(&mut self, run: TextRun) -> usize {
        let mut p = paragraph_with_run(run);
        p.style.space_after = Some(0.0);
        self.doc.push_paragraph(p)
    }

    /// Validate a pairing index: set and pointing at a non-empty paragraph.
    fn open_paragraph(&self, index: Option<usize>) -> Option<usize> {
        let index = index?;
        let non_empty = self.doc.paragraph(index).is_some_and(|p| !p.is_empty());
        non_empty.then_some(index)
    }

    fn append_run(&mut self, index: usize, run: TextRun) {
        if let Some(p) = self.doc.paragraph_mut(index) {
            p.add_run(run);
        }
    }

    /// Fold a date onto a pending block paragraph via a right-aligned tab
    /// stop, or emit it as a standalone right-aligned paragraph.
    fn close_block_with_dates(&mut self, open: Option<usize>, text: &str) {
        match open {
            Some(index) => {
                let tab = TabStop::right(self.style.date_tab_position);
                let tight = self.style.tight_space_after;
                if let Some(p) = self.doc.paragraph_mut(index) {
                    p.style.tab_stops.push(tab);
                    p.add_tab();
                    p.add_text(text);
                    p.style.space_after = Some(tight);
                }
            }
            None => {
                let mut p = Paragraph::with_text(text);
                p.style.alignment = Alignment::Right;
                p.style.space_after = Some(self.style.tight_space_after);
                self.doc.push_paragraph(p);
            }
        }
    }

    /// Emit one bulleted paragraph, splitting the payload into sentences.
    ///
    /// Each sentence gets its period restored unless it is the final
    /// sentence and already ends in terminal punctuation. The first sentence
    /// is bold only at nesting level 0. Run fonts are pinned to the document
    /// default so the bullet matches the body text.
    fn push_bullet(&mut self, text: &str, level: u8) {
        let mut p = Paragraph::new();
        p.style.list_info = Some(ListInfo::bullet(level));
        p.style.left_indent = Some(self.style.bullet_indent_step * (level as f32 + 1.0));
        p.style.space_before = Some(0.0);
        p.style.space_after = Some(self.style.tight_space_after);
        p.style.line_spacing = Some(1.0);

        let sentences: Vec<&str> = text.split(". ").collect();
        let last = sentences.len() - 1;
        let mut first = true;
        for (i, sentence) in sentences.iter().enumerate() {
            if sentence.trim().is_empty() {
                continue;
            }
            let mut s = sentence.to_string();
            if i < last || !s.ends_with(['.', '!', '?']) {
                s.push('.');
            }
            let mut run = TextRun::new(format!("{} ", s));
            if first {
                run.style.bold = level == 0;
                first = false;
            }
            p.add_run(run);
        }

        let font_name = self.doc.page.font_name.clone();
        let font_size = self.doc.page.font_size;
        for run in p.runs_mut() {
            run.style.font_name = Some(font_name.clone());
            run.style.font_size = Some(font_size);
        }

        self.doc.push_paragraph(p);
    }
}

fn paragraph_with_run(run: TextRun) -> Paragraph {
    let mut p = Paragraph::new();
    p.add_run(run);
    p
}
