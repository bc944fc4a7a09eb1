//! WordprocessingML part writers.
//!
//! Builds `word/document.xml` and `word/styles.xml` from the composed
//! [`Document`] with quick-xml's event writer. All measurements convert to
//! the OOXML units: twentieths of a point (twips) for spacing and indents,
//! half-points for font sizes, eighths of a point for border widths.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{Error, Result};
use crate::model::{
    Alignment, Document, InlineContent, PageSetup, Paragraph, TabAlignment, TextStyle,
};

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// US Letter, in twips.
const PAGE_WIDTH: i64 = 12240;
const PAGE_HEIGHT: i64 = 15840;

/// Thin rule under contact lines and section headers: 0.75 pt single.
const RULE_SIZE_EIGHTHS: &str = "6";

/// Numbering instance shared by all bullet paragraphs.
const BULLET_NUM_ID: &str = "1";

type XmlWriter = Writer<Vec<u8>>;

/// Twips from inches.
fn twips_from_inches(inches: f32) -> i64 {
    (inches * 1440.0).round() as i64
}

/// Twips from points.
fn twips_from_points(points: f32) -> i64 {
    (points * 20.0).round() as i64
}

/// Half-points from points.
fn half_points(points: f32) -> i64 {
    (points * 2.0).round() as i64
}

fn emit(w: &mut XmlWriter, event: Event) -> Result<()> {
    w.write_event(event).map_err(|e| Error::Xml(e.to_string()))
}

fn open(w: &mut XmlWriter, name: &str) -> Result<()> {
    emit(w, Event::Start(BytesStart::new(name)))
}

fn open_with(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut el = BytesStart::new(name);
    for (k, v) in attrs {
        el.push_attribute((*k, *v));
    }
    emit(w, Event::Start(el))
}

fn close(w: &mut XmlWriter, name: &str) -> Result<()> {
    emit(w, Event::End(BytesEnd::new(name)))
}

fn empty_with(w: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut el = BytesStart::new(name);
    for (k, v) in attrs {
        el.push_attribute((*k, *v));
    }
    emit(w, Event::Empty(el))
}

fn declaration(w: &mut XmlWriter) -> Result<()> {
    emit(
        w,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))),
    )
}

/// Serialize the main document part.
pub fn document_xml(doc: &Document) -> Result<Vec<u8>> {
    let mut w = Writer::new(Vec::new());
    declaration(&mut w)?;
    open_with(&mut w, "w:document", &[("xmlns:w", W_NS)])?;
    open(&mut w, "w:body")?;

    for paragraph in &doc.paragraphs {
        write_paragraph(&mut w, paragraph)?;
    }

    write_section_properties(&mut w, &doc.page)?;

    close(&mut w, "w:body")?;
    close(&mut w, "w:document")?;
    Ok(w.into_inner())
}

fn write_section_properties(w: &mut XmlWriter, page: &PageSetup) -> Result<()> {
    open(w, "w:sectPr")?;
    empty_with(
        w,
        "w:pgSz",
        &[
            ("w:w", PAGE_WIDTH.to_string().as_str()),
            ("w:h", PAGE_HEIGHT.to_string().as_str()),
        ],
    )?;
    let top = twips_from_inches(page.margin_top).to_string();
    let right = twips_from_inches(page.margin_right).to_string();
    let bottom = twips_from_inches(page.margin_bottom).to_string();
    let left = twips_from_inches(page.margin_left).to_string();
    empty_with(
        w,
        "w:pgMar",
        &[
            ("w:top", top.as_str()),
            ("w:right", right.as_str()),
            ("w:bottom", bottom.as_str()),
            ("w:left", left.as_str()),
            ("w:header", "720"),
            ("w:footer", "720"),
            ("w:gutter", "0"),
        ],
    )?;
    close(w, "w:sectPr")
}

fn write_paragraph(w: &mut XmlWriter, paragraph: &Paragraph) -> Result<()> {
    open(w, "w:p")?;
    write_paragraph_properties(w, paragraph)?;

    for content in &paragraph.content {
        match content {
            InlineContent::Text(run) => {
                open(w, "w:r")?;
                write_run_properties(w, &run.style)?;
                open_with(w, "w:t", &[("xml:space", "preserve")])?;
                emit(w, Event::Text(BytesText::new(&run.text)))?;
                close(w, "w:t")?;
                close(w, "w:r")?;
            }
            InlineContent::Tab => {
                open(w, "w:r")?;
                empty_with(w, "w:tab", &[])?;
                close(w, "w:r")?;
            }
        }
    }

    close(w, "w:p")
}

fn write_paragraph_properties(w: &mut XmlWriter, paragraph: &Paragraph) -> Result<()> {
    let style = &paragraph.style;
    open(w, "w:pPr")?;

    // Child order follows the CT_PPr schema: pStyle, numPr, pBdr, tabs,
    // spacing, ind, jc.
    if let Some(list) = style.list_info {
        empty_with(w, "w:pStyle", &[("w:val", "ListBullet")])?;
        open(w, "w:numPr")?;
        let level = list.level.to_string();
        empty_with(w, "w:ilvl", &[("w:val", level.as_str())])?;
        empty_with(w, "w:numId", &[("w:val", BULLET_NUM_ID)])?;
        close(w, "w:numPr")?;
    }

    if style.bottom_border {
        open(w, "w:pBdr")?;
        empty_with(
            w,
            "w:bottom",
            &[
                ("w:val", "single"),
                ("w:sz", RULE_SIZE_EIGHTHS),
                ("w:space", "1"),
                ("w:color", "auto"),
            ],
        )?;
        close(w, "w:pBdr")?;
    }

    if !style.tab_stops.is_empty() {
        open(w, "w:tabs")?;
        for stop in &style.tab_stops {
            let val = match stop.alignment {
                TabAlignment::Left => "left",
                TabAlignment::Center => "center",
                TabAlignment::Right => "right",
            };
            let pos = twips_from_inches(stop.position).to_string();
            empty_with(w, "w:tab", &[("w:val", val), ("w:pos", pos.as_str())])?;
        }
        close(w, "w:tabs")?;
    }

    if style.space_before.is_some() || style.space_after.is_some() || style.line_spacing.is_some()
    {
        let mut attrs: Vec<(&str, String)> = Vec::new();
        if let Some(before) = style.space_before {
            attrs.push(("w:before", twips_from_points(before).to_string()));
        }
        if let Some(after) = style.space_after {
            attrs.push(("w:after", twips_from_points(after).to_string()));
        }
        if let Some(spacing) = style.line_spacing {
            attrs.push(("w:line", ((spacing * 240.0).round() as i64).to_string()));
            attrs.push(("w:lineRule", "auto".to_string()));
        }
        let borrowed: Vec<(&str, &str)> =
            attrs.iter().map(|(k, v)| (*k, v.as_str())).collect();
        empty_with(w, "w:spacing", &borrowed)?;
    }

    if let Some(indent) = style.left_indent {
        let left = twips_from_inches(indent).to_string();
        empty_with(w, "w:ind", &[("w:left", left.as_str())])?;
    }

    let jc = match style.alignment {
        Alignment::Left => None,
        Alignment::Center => Some("center"),
        Alignment::Right => Some("right"),
        Alignment::Justify => Some("both"),
    };
    if let Some(val) = jc {
        empty_with(w, "w:jc", &[("w:val", val)])?;
    }

    close(w, "w:pPr")
}

fn write_run_properties(w: &mut XmlWriter, style: &TextStyle) -> Result<()> {
    if !style.has_styling() {
        return Ok(());
    }
    open(w, "w:rPr")?;
    if let Some(ref name) = style.font_name {
        empty_with(
            w,
            "w:rFonts",
            &[
                ("w:ascii", name.as_str()),
                ("w:hAnsi", name.as_str()),
                ("w:cs", name.as_str()),
            ],
        )?;
    }
    if style.bold {
        empty_with(w, "w:b", &[])?;
    }
    if style.italic {
        empty_with(w, "w:i", &[])?;
    }
    if let Some(size) = style.font_size {
        let val = half_points(size).to_string();
        empty_with(w, "w:sz", &[("w:val", val.as_str())])?;
        empty_with(w, "w:szCs", &[("w:val", val.as_str())])?;
    }
    close(w, "w:rPr")
}

/// Serialize the styles part: document defaults plus the compact
/// `ListBullet` paragraph style.
///
/// The default font is also set as the complex-script font for
/// compatibility, matching the reference output.
pub fn styles_xml(page: &PageSetup, bullet_space_after: f32) -> Result<Vec<u8>> {
    let mut w = Writer::new(Vec::new());
    declaration(&mut w)?;
    open_with(&mut w, "w:styles", &[("xmlns:w", W_NS)])?;

    let size = half_points(page.font_size).to_string();

    open(&mut w, "w:docDefaults")?;
    open(&mut w, "w:rPrDefault")?;
    open(&mut w, "w:rPr")?;
    empty_with(
        &mut w,
        "w:rFonts",
        &[
            ("w:ascii", page.font_name.as_str()),
            ("w:hAnsi", page.font_name.as_str()),
            ("w:cs", page.font_name.as_str()),
        ],
    )?;
    empty_with(&mut w, "w:sz", &[("w:val", size.as_str())])?;
    empty_with(&mut w, "w:szCs", &[("w:val", size.as_str())])?;
    close(&mut w, "w:rPr")?;
    close(&mut w, "w:rPrDefault")?;
    empty_with(&mut w, "w:pPrDefault", &[])?;
    close(&mut w, "w:docDefaults")?;

    open_with(
        &mut w,
        "w:style",
        &[
            ("w:type", "paragraph"),
            ("w:default", "1"),
            ("w:styleId", "Normal"),
        ],
    )?;
    empty_with(&mut w, "w:name", &[("w:val", "Normal")])?;
    empty_with(&mut w, "w:qFormat", &[])?;
    close(&mut w, "w:style")?;

    // Compact bullet list: single line spacing, tight paragraph spacing.
    open_with(
        &mut w,
        "w:style",
        &[("w:type", "paragraph"), ("w:styleId", "ListBullet")],
    )?;
    empty_with(&mut w, "w:name", &[("w:val", "List Bullet")])?;
    empty_with(&mut w, "w:basedOn", &[("w:val", "Normal")])?;
    empty_with(&mut w, "w:qFormat", &[])?;
    open(&mut w, "w:pPr")?;
    open(&mut w, "w:numPr")?;
    empty_with(&mut w, "w:numId", &[("w:val", BULLET_NUM_ID)])?;
    close(&mut w, "w:numPr")?;
    let after = twips_from_points(bullet_space_after).to_string();
    empty_with(
        &mut w,
        "w:spacing",
        &[
            ("w:before", "0"),
            ("w:after", after.as_str()),
            ("w:line", "240"),
            ("w:lineRule", "auto"),
        ],
    )?;
    close(&mut w, "w:pPr")?;
    close(&mut w, "w:style")?;

    close(&mut w, "w:styles")?;
    Ok(w.into_inner())
}

/// Serialize the numbering part: one abstract bullet list with three
/// nesting levels, instanced as numbering id 1.
pub fn numbering_xml() -> Result<Vec<u8>> {
    let mut w = Writer::new(Vec::new());
    declaration(&mut w)?;
    open_with(&mut w, "w:numbering", &[("xmlns:w", W_NS)])?;

    open_with(&mut w, "w:abstractNum", &[("w:abstractNumId", "0")])?;
    empty_with(
        &mut w,
        "w:multiLevelType",
        &[("w:val", "hybridMultilevel")],
    )?;
    for (level, glyph) in [(0u8, "\u{2022}"), (1, "\u{25E6}"), (2, "\u{25AA}")] {
        let ilvl = level.to_string();
        open_with(&mut w, "w:lvl", &[("w:ilvl", ilvl.as_str())])?;
        empty_with(&mut w, "w:start", &[("w:val", "1")])?;
        empty_with(&mut w, "w:numFmt", &[("w:val", "bullet")])?;
        empty_with(&mut w, "w:lvlText", &[("w:val", glyph)])?;
        empty_with(&mut w, "w:lvlJc", &[("w:val", "left")])?;
        open(&mut w, "w:pPr")?;
        let left = (360 * (level as i64 + 1)).to_string();
        empty_with(
            &mut w,
            "w:ind",
            &[("w:left", left.as_str()), ("w:hanging", "360")],
        )?;
        close(&mut w, "w:pPr")?;
        close(&mut w, "w:lvl")?;
    }
    close(&mut w, "w:abstractNum")?;

    open_with(&mut w, "w:num", &[("w:numId", BULLET_NUM_ID)])?;
    empty_with(&mut w, "w:abstractNumId", &[("w:val", "0")])?;
    close(&mut w, "w:num")?;

    close(&mut w, "w:numbering")?;
    Ok(w.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Paragraph, TabStop, TextRun};

    fn xml_string(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_unit_conversions() {
        assert_eq!(twips_from_inches(0.5), 720);
        assert_eq!(twips_from_inches(6.5), 9360);
        assert_eq!(twips_from_points(2.0), 40);
        assert_eq!(half_points(10.0), 20);
        assert_eq!(half_points(16.0), 32);
    }

    #[test]
    fn test_document_xml_margins_and_page_size() {
        let doc = Document::new(PageSetup::default());
        let xml = xml_string(document_xml(&doc).unwrap());
        assert!(xml.contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
        assert!(xml.contains(r#"w:top="720""#));
        assert!(xml.contains(r#"w:left="720""#));
    }

    #[test]
    fn test_paragraph_with_tab_stop_and_runs() {
        let mut doc = Document::new(PageSetup::default());
        let mut p = Paragraph::new();
        p.add_run(TextRun::bold("Engineer"));
        p.add_run(TextRun::italic(" | Acme"));
        p.style.tab_stops.push(TabStop::right(6.5));
        p.add_tab();
        p.add_text("2020-2022");
        doc.push_paragraph(p);

        let xml = xml_string(document_xml(&doc).unwrap());
        assert!(xml.contains(r#"<w:tab w:val="right" w:pos="9360"/>"#));
        assert!(xml.contains("<w:b/>"));
        assert!(xml.contains("<w:i/>"));
        assert!(xml.contains(r#"<w:t xml:space="preserve">Engineer</w:t>"#));
        assert!(xml.contains("<w:tab/>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut doc = Document::new(PageSetup::default());
        doc.push_paragraph(Paragraph::with_text("R&D <Cloud>"));
        let xml = xml_string(document_xml(&doc).unwrap());
        assert!(xml.contains("R&amp;D &lt;Cloud&gt;"));
    }

    #[test]
    fn test_bottom_border_emitted() {
        let mut doc = Document::new(PageSetup::default());
        let mut p = Paragraph::with_text("CONTACT LINE");
        p.style.bottom_border = true;
        doc.push_paragraph(p);
        let xml = xml_string(document_xml(&doc).unwrap());
        assert!(xml.contains("<w:pBdr>"));
        assert!(xml.contains(r#"<w:bottom w:val="single" w:sz="6" w:space="1" w:color="auto"/>"#));
    }

    #[test]
    fn test_styles_xml_default_font() {
        let xml = xml_string(styles_xml(&PageSetup::default(), 2.0).unwrap());
        assert!(xml.contains(r#"w:ascii="Calibri""#));
        assert!(xml.contains(r#"w:cs="Calibri""#));
        assert!(xml.contains(r#"<w:sz w:val="20"/>"#));
        assert!(xml.contains(r#"w:styleId="ListBullet""#));
        assert!(xml.contains(r#"w:after="40""#));
    }

    #[test]
    fn test_numbering_xml_levels() {
        let xml = xml_string(numbering_xml().unwrap());
        assert!(xml.contains(r#"w:ilvl="0""#));
        assert!(xml.contains(r#"w:ilvl="2""#));
        assert!(xml.contains(r#"<w:numFmt w:val="bullet"/>"#));
        assert!(xml.contains(r#"<w:num w:numId="1">"#));
    }

    #[test]
    fn test_document_xml_deterministic() {
        let mut doc = Document::new(PageSetup::default());
        doc.push_paragraph(Paragraph::with_text("same"));
        let a = document_xml(&doc).unwrap();
        let b = document_xml(&doc).unwrap();
        assert_eq!(a, b);
    }
}
