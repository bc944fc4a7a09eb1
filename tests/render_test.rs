//! Integration tests for the full pipeline: marker text in, DOCX package
//! out, verified by unzipping the buffer and inspecting the
//! WordprocessingML parts.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use resumedoc::{to_docx, to_docx_with_style, DocxRenderer, MarkerParser, StyleSheet};

/// Extract one part of the package as a UTF-8 string.
fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("valid zip container");
    let mut file = archive.by_name(name).expect("part present");
    let mut content = String::new();
    file.read_to_string(&mut content).expect("UTF-8 part");
    content
}

/// Paragraph texts from `word/document.xml`, tabs rendered as `\t`.
fn paragraph_texts(bytes: &[u8]) -> Vec<String> {
    let xml = read_part(bytes, "word/document.xml");
    let mut reader = Reader::from_str(&xml);

    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;
    let mut in_tab_stops = false;

    loop {
        match reader.read_event().expect("well-formed document.xml") {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => current = Some(String::new()),
                b"w:t" => in_text = true,
                b"w:tabs" => in_tab_stops = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:p" => {
                    if let Some(text) = current.take() {
                        paragraphs.push(text);
                    }
                }
                b"w:t" => in_text = false,
                b"w:tabs" => in_tab_stops = false,
                _ => {}
            },
            Event::Empty(e) => {
                // A run-level <w:tab/>; tab stop definitions inside
                // <w:tabs> share the element name.
                if e.name().as_ref() == b"w:tab" && !in_tab_stops {
                    if let Some(ref mut text) = current {
                        text.push('\t');
                    }
                }
            }
            Event::Text(t) => {
                if in_text {
                    if let Some(ref mut text) = current {
                        text.push_str(&t.unescape().expect("valid text"));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    paragraphs
}

#[test]
fn parse_is_idempotent() {
    let parser = MarkerParser::new();
    let text = "[NAME] Jane\nfree text\n[BULLET] Did X. Did Y.\n[SKILLS] Rust";
    let first: Vec<_> = parser.parse_lines(text).collect();
    let second: Vec<_> = parser.parse_lines(text).collect();
    assert_eq!(first, second);
}

#[test]
fn empty_payload_markers_produce_no_paragraphs() {
    let text = "[NAME]\n[CONTACT]\n[BULLET]\n[SKILL_CATEGORY]\n[EDUCATION_DEGREE]";
    let bytes = to_docx(text).unwrap();
    assert!(paragraph_texts(&bytes).is_empty());
}

#[test]
fn title_company_dates_fold_into_one_paragraph() {
    let bytes = to_docx("[JOB_TITLE] Engineer\n[COMPANY] Acme\n[DATES] 2020-2022").unwrap();
    let texts = paragraph_texts(&bytes);
    assert_eq!(texts, vec!["Engineer | Acme\t2020-2022"]);

    let xml = read_part(&bytes, "word/document.xml");
    assert!(xml.contains(r#"<w:tab w:val="right" w:pos="9360"/>"#));
}

#[test]
fn plain_line_interrupts_pairing() {
    let bytes = to_docx("[JOB_TITLE] Engineer\nsome body text\n[DATES] 2020").unwrap();
    let texts = paragraph_texts(&bytes);
    assert_eq!(texts, vec!["Engineer", "some body text", "2020"]);

    // The standalone date is right-aligned rather than tab-folded.
    let xml = read_part(&bytes, "word/document.xml");
    assert!(xml.contains(r#"<w:jc w:val="right"/>"#));
    assert!(!xml.contains("<w:tabs>"));
}

#[test]
fn bullet_splits_sentences_and_bolds_the_first() {
    let renderer = DocxRenderer::new();
    let doc = renderer.compose("[BULLET] Did X. Led Y and Z");
    let runs: Vec<_> = doc.paragraphs[0].runs().collect();
    assert_eq!(runs.len(), 2);
    assert!(runs[0].style.bold);
    assert!(runs[0].text.ends_with(". "));
    assert_eq!(runs[1].text, "Led Y and Z. ");
    assert!(!runs[1].style.bold);

    let bytes = renderer.render("[BULLET] Did X. Led Y and Z").unwrap();
    let texts = paragraph_texts(&bytes);
    assert_eq!(texts, vec!["Did X. Led Y and Z. "]);
    let xml = read_part(&bytes, "word/document.xml");
    assert!(xml.contains(r#"<w:pStyle w:val="ListBullet"/>"#));
    assert!(xml.contains(r#"<w:numId w:val="1"/>"#));
}

#[test]
fn skills_append_inline_after_category() {
    let bytes = to_docx("[SKILL_CATEGORY] Languages\n[SKILLS] Go, Rust").unwrap();
    assert_eq!(paragraph_texts(&bytes), vec!["Languages: Go, Rust"]);
}

#[test]
fn skills_start_fresh_after_interruption() {
    let bytes =
        to_docx("[SKILL_CATEGORY] Languages\nintervening text\n[SKILLS] Go, Rust").unwrap();
    assert_eq!(
        paragraph_texts(&bytes),
        vec!["Languages: ", "intervening text", "Go, Rust"]
    );
}

#[test]
fn document_part_is_deterministic_across_renders() {
    let text = "[NAME] Jane Doe\n\
                [CONTACT] jane@example.com | 555-1234\n\
                [SECTION_HEADER] Experience\n\
                [JOB_TITLE] Engineer\n\
                [COMPANY] Acme\n\
                [DATES] 2020-2022\n\
                [BULLET] Did X. Led Y.\n\
                [SECTION_HEADER] Skills\n\
                [SKILL_CATEGORY] Languages\n\
                [SKILLS] Go, Rust";
    let first = to_docx(text).unwrap();
    let second = to_docx(text).unwrap();

    for part in ["word/document.xml", "word/styles.xml", "word/numbering.xml"] {
        assert_eq!(read_part(&first, part), read_part(&second, part), "{}", part);
    }
}

#[test]
fn empty_input_yields_valid_empty_document() {
    for input in ["", "   \n \t \n"] {
        let bytes = to_docx(input).unwrap();
        assert_eq!(&bytes[..2], b"PK");
        assert!(paragraph_texts(&bytes).is_empty());
    }
}

#[test]
fn unrecognized_text_degrades_to_plain_paragraphs() {
    let bytes = to_docx("completely untagged\nresume text").unwrap();
    assert_eq!(
        paragraph_texts(&bytes),
        vec!["completely untagged", "resume text"]
    );
}

#[test]
fn education_block_pairs_like_job_block() {
    let bytes = to_docx(
        "[EDUCATION_DEGREE] BSc Computer Science\n\
         [EDUCATION_SCHOOL] State University\n\
         [EDUCATION_DATES] 2012-2016\n\
         [EDUCATION_DETAILS] Magna cum laude",
    )
    .unwrap();
    let texts = paragraph_texts(&bytes);
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[0], "BSc Computer Science, State University\t2012-2016");
    assert_eq!(texts[1], "Magna cum laude");
}

#[test]
fn section_headers_are_uppercased_with_rule() {
    let bytes = to_docx("[SECTION_HEADER] Professional Experience").unwrap();
    assert_eq!(paragraph_texts(&bytes), vec!["PROFESSIONAL EXPERIENCE"]);
    let xml = read_part(&bytes, "word/document.xml");
    assert!(xml.contains("<w:pBdr>"));
}

#[test]
fn custom_style_sheet_flows_into_package() {
    let style = StyleSheet::new()
        .with_font("Georgia")
        .with_font_size(11.0)
        .with_margin(1.0);
    let bytes = to_docx_with_style("[NAME] Jane", &style).unwrap();

    let styles = read_part(&bytes, "word/styles.xml");
    assert!(styles.contains(r#"w:ascii="Georgia""#));
    assert!(styles.contains(r#"<w:sz w:val="22"/>"#));

    let document = read_part(&bytes, "word/document.xml");
    assert!(document.contains(r#"w:top="1440""#));
}

#[test]
fn rendered_file_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resume.docx");

    let bytes = to_docx("[NAME] Jane Doe\n[SKILLS] Rust").unwrap();
    std::fs::write(&path, &bytes).unwrap();

    let reread = std::fs::read(&path).unwrap();
    assert_eq!(paragraph_texts(&reread), vec!["Jane Doe", "Rust"]);
}

#[test]
fn full_resume_renders_in_order() {
    let text = "\
[NAME] Jane Doe
[CONTACT] 555-555-5555 | jane@example.com | City, State

[SUMMARY] Experienced cloud engineer with a decade of platform work.

[SECTION_HEADER] Professional Experience

[JOB_TITLE] Senior Cloud Engineer
[COMPANY] ExampleCorp
[DATES] Jan 2022 - Present
[LOCATION] City, State
Serves as technical lead for the platform group.
[BULLET] Architected landing zones. Cut provisioning time by 40%
[BULLET] Led migration of 25 applications. Maintained uptime through cutover.

[SECTION_HEADER] Skills

[SKILL_CATEGORY] Cloud
[SKILLS] Azure, AWS

[SECTION_HEADER] Education

[EDUCATION_DEGREE] BSc Computer Science
[EDUCATION_SCHOOL] State University
[EDUCATION_DATES] 2008-2012";

    let bytes = to_docx(text).unwrap();
    let texts = paragraph_texts(&bytes);

    assert_eq!(texts[0], "Jane Doe");
    assert_eq!(texts[1], "555-555-5555 | jane@example.com | City, State");
    assert_eq!(texts[2], "Experienced cloud engineer with a decade of platform work.");
    assert_eq!(texts[3], "PROFESSIONAL EXPERIENCE");
    assert_eq!(texts[4], "Senior Cloud Engineer | ExampleCorp\tJan 2022 - Present");
    assert_eq!(texts[5], "City, State");
    assert_eq!(texts[6], "Serves as technical lead for the platform group.");
    assert!(texts[7].starts_with("Architected landing zones. "));
    assert_eq!(texts[9], "SKILLS");
    assert_eq!(texts[10], "Cloud: Azure, AWS");
    assert_eq!(texts[11], "EDUCATION");
    assert_eq!(texts[12], "BSc Computer Science, State University\t2008-2012");
    assert_eq!(texts.len(), 13);
}
