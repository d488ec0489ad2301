//! PPTX package writer.
//!
//! Serializes a [`Deck`] into an Office Open XML package: a ZIP archive of
//! XML parts tied together by relationship files.

use crate::slide::{Deck, Fill, Outline, Paragraph, Run, Shape, ShapeKind, Slide};
use crate::template::{self, content_type, ns, part, rel};
use deck_core::{Error, Result};
use quick_xml::events::{BytesDecl, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Seek, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// First `p:sldId` value; PowerPoint requires ids of at least 256.
const FIRST_SLIDE_ID: usize = 256;

/// Relationship ids in `presentation.xml.rels` before the first slide.
const FIXED_PRESENTATION_RELS: usize = 5;

type XmlWriter = Writer<Vec<u8>>;

/// Writer for PPTX packages.
pub struct PptxWriter {
    compression: CompressionMethod,
}

impl PptxWriter {
    /// Create a writer that deflates every part.
    pub fn new() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }

    /// Store parts without compression.
    pub fn stored(mut self) -> Self {
        self.compression = CompressionMethod::Stored;
        self
    }

    /// Serialize a deck into PPTX bytes.
    pub fn write(&self, deck: &Deck) -> Result<Vec<u8>> {
        let cursor = self.write_to(deck, Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }

    /// Serialize a deck into any seekable writer, returning it when done.
    pub fn write_to<W: Write + Seek>(&self, deck: &Deck, writer: W) -> Result<W> {
        check_xml_text(deck)?;

        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(self.compression);
        let slide_count = deck.slides.len();

        let mut add = |name: &str, data: &[u8]| -> Result<()> {
            zip.start_file(name, options)
                .map_err(|e| Error::Zip(format!("Failed to start '{}': {}", name, e)))?;
            zip.write_all(data)
                .map_err(|e| Error::Zip(format!("Failed to write '{}': {}", name, e)))
        };

        add(part::CONTENT_TYPES, &xml(content_types_xml(slide_count))?)?;
        add(part::PACKAGE_RELS, &xml(package_rels_xml())?)?;
        add(part::CORE_PROPERTIES, &xml(core_properties_xml(&deck.title))?)?;
        add(part::APP_PROPERTIES, &xml(app_properties_xml(slide_count))?)?;
        add(part::PRESENTATION, &xml(presentation_xml(deck))?)?;
        add(part::PRESENTATION_RELS, &xml(presentation_rels_xml(slide_count))?)?;
        add(part::SLIDE_MASTER, template::SLIDE_MASTER_XML.as_bytes())?;
        add(
            part::SLIDE_MASTER_RELS,
            &xml(relationships_xml(&[
                ("rId1", rel::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
                ("rId2", rel::THEME, "../theme/theme1.xml"),
            ]))?,
        )?;
        add(part::SLIDE_LAYOUT, template::SLIDE_LAYOUT_XML.as_bytes())?;
        add(
            part::SLIDE_LAYOUT_RELS,
            &xml(relationships_xml(&[(
                "rId1",
                rel::SLIDE_MASTER,
                "../slideMasters/slideMaster1.xml",
            )]))?,
        )?;
        add(part::THEME, template::THEME_XML.as_bytes())?;
        add(part::PRES_PROPS, template::PRES_PROPS_XML.as_bytes())?;
        add(part::VIEW_PROPS, template::VIEW_PROPS_XML.as_bytes())?;
        add(part::TABLE_STYLES, template::TABLE_STYLES_XML.as_bytes())?;

        let slide_rels = xml(relationships_xml(&[(
            "rId1",
            rel::SLIDE_LAYOUT,
            "../slideLayouts/slideLayout1.xml",
        )]))?;
        for (idx, slide) in deck.slides.iter().enumerate() {
            let number = idx + 1;
            add(&part::slide(number), &xml(slide_xml(slide))?)?;
            add(&part::slide_rels(number), &slide_rels)?;
        }

        log::debug!("Wrote PPTX package with {} slides", slide_count);

        zip.finish()
            .map_err(|e| Error::Zip(format!("Failed to finish archive: {}", e)))
    }
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether `c` may appear in an XML 1.0 document.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Reject text that cannot be written into an XML part.
fn check_xml_text(deck: &Deck) -> Result<()> {
    let texts = std::iter::once(deck.title.as_str()).chain(deck.slides.iter().flat_map(|slide| {
        slide.shapes.iter().flat_map(|shape| {
            std::iter::once(shape.name.as_str()).chain(
                shape
                    .paragraphs
                    .iter()
                    .flat_map(|p| p.runs.iter().map(|r| r.text.as_str())),
            )
        })
    }));

    for text in texts {
        if let Some(c) = text.chars().find(|&c| !is_xml_char(c)) {
            return Err(Error::Render(format!(
                "text {:?} contains U+{:04X}, which is not allowed in XML",
                text, c as u32
            )));
        }
    }
    Ok(())
}

/// Finish an XML part, mapping writer failures into our error type.
fn xml(result: quick_xml::Result<Vec<u8>>) -> Result<Vec<u8>> {
    result.map_err(|e| Error::Xml(e.to_string()))
}

fn new_document() -> quick_xml::Result<XmlWriter> {
    let mut w = Writer::new(Vec::new());
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    Ok(w)
}

fn content_types_xml(slide_count: usize) -> quick_xml::Result<Vec<u8>> {
    let mut w = new_document()?;
    let overrides = [
        ("/ppt/presentation.xml", content_type::PRESENTATION),
        ("/ppt/slideMasters/slideMaster1.xml", content_type::SLIDE_MASTER),
        ("/ppt/slideLayouts/slideLayout1.xml", content_type::SLIDE_LAYOUT),
        ("/ppt/theme/theme1.xml", content_type::THEME),
        ("/ppt/presProps.xml", content_type::PRES_PROPS),
        ("/ppt/viewProps.xml", content_type::VIEW_PROPS),
        ("/ppt/tableStyles.xml", content_type::TABLE_STYLES),
        ("/docProps/core.xml", content_type::CORE_PROPERTIES),
        ("/docProps/app.xml", content_type::EXTENDED_PROPERTIES),
    ];

    w.create_element("Types")
        .with_attribute(("xmlns", ns::CONTENT_TYPES))
        .write_inner_content(|w| {
            w.create_element("Default")
                .with_attribute(("Extension", "rels"))
                .with_attribute(("ContentType", content_type::RELATIONSHIPS))
                .write_empty()?;
            w.create_element("Default")
                .with_attribute(("Extension", "xml"))
                .with_attribute(("ContentType", content_type::XML))
                .write_empty()?;
            for (name, ct) in overrides {
                w.create_element("Override")
                    .with_attribute(("PartName", name))
                    .with_attribute(("ContentType", ct))
                    .write_empty()?;
            }
            for number in 1..=slide_count {
                let name = format!("/{}", part::slide(number));
                w.create_element("Override")
                    .with_attribute(("PartName", name.as_str()))
                    .with_attribute(("ContentType", content_type::SLIDE))
                    .write_empty()?;
            }
            Ok::<_, quick_xml::Error>(())
        })?;

    Ok(w.into_inner())
}

fn relationships_xml(rels: &[(&str, &str, &str)]) -> quick_xml::Result<Vec<u8>> {
    let mut w = new_document()?;
    w.create_element("Relationships")
        .with_attribute(("xmlns", ns::PACKAGE_RELATIONSHIPS))
        .write_inner_content(|w| {
            for (id, rel_type, target) in rels {
                w.create_element("Relationship")
                    .with_attribute(("Id", *id))
                    .with_attribute(("Type", *rel_type))
                    .with_attribute(("Target", *target))
                    .write_empty()?;
            }
            Ok::<_, quick_xml::Error>(())
        })?;
    Ok(w.into_inner())
}

fn package_rels_xml() -> quick_xml::Result<Vec<u8>> {
    relationships_xml(&[
        ("rId1", rel::OFFICE_DOCUMENT, part::PRESENTATION),
        ("rId2", rel::CORE_PROPERTIES, part::CORE_PROPERTIES),
        ("rId3", rel::EXTENDED_PROPERTIES, part::APP_PROPERTIES),
    ])
}

/// Relationship id of the n-th (1-based) slide in `presentation.xml.rels`.
fn slide_rel_id(number: usize) -> String {
    format!("rId{}", FIXED_PRESENTATION_RELS + number)
}

fn presentation_rels_xml(slide_count: usize) -> quick_xml::Result<Vec<u8>> {
    let slides: Vec<(String, String)> = (1..=slide_count)
        .map(|n| (slide_rel_id(n), format!("slides/slide{}.xml", n)))
        .collect();

    let mut rels = vec![
        ("rId1", rel::SLIDE_MASTER, "slideMasters/slideMaster1.xml"),
        ("rId2", rel::THEME, "theme/theme1.xml"),
        ("rId3", rel::PRES_PROPS, "presProps.xml"),
        ("rId4", rel::VIEW_PROPS, "viewProps.xml"),
        ("rId5", rel::TABLE_STYLES, "tableStyles.xml"),
    ];
    rels.extend(
        slides
            .iter()
            .map(|(id, target)| (id.as_str(), rel::SLIDE, target.as_str())),
    );

    relationships_xml(&rels)
}

fn presentation_xml(deck: &Deck) -> quick_xml::Result<Vec<u8>> {
    let mut w = new_document()?;
    w.create_element("p:presentation")
        .with_attribute(("xmlns:a", ns::DRAWING))
        .with_attribute(("xmlns:r", ns::RELATIONSHIPS))
        .with_attribute(("xmlns:p", ns::PRESENTATION))
        .with_attribute(("saveSubsetFonts", "1"))
        .write_inner_content(|w| {
            w.create_element("p:sldMasterIdLst").write_inner_content(|w| {
                w.create_element("p:sldMasterId")
                    .with_attribute(("id", "2147483648"))
                    .with_attribute(("r:id", "rId1"))
                    .write_empty()?;
                Ok::<_, quick_xml::Error>(())
            })?;

            if !deck.slides.is_empty() {
                w.create_element("p:sldIdLst").write_inner_content(|w| {
                    for number in 1..=deck.slides.len() {
                        let id = (FIRST_SLIDE_ID + number - 1).to_string();
                        let rel_id = slide_rel_id(number);
                        w.create_element("p:sldId")
                            .with_attribute(("id", id.as_str()))
                            .with_attribute(("r:id", rel_id.as_str()))
                            .write_empty()?;
                    }
                    Ok::<_, quick_xml::Error>(())
                })?;
            }

            let cx = deck.width.to_string();
            let cy = deck.height.to_string();
            w.create_element("p:sldSz")
                .with_attribute(("cx", cx.as_str()))
                .with_attribute(("cy", cy.as_str()))
                .write_empty()?;
            w.create_element("p:notesSz")
                .with_attribute(("cx", "6858000"))
                .with_attribute(("cy", "9144000"))
                .write_empty()?;
            Ok::<_, quick_xml::Error>(())
        })?;
    Ok(w.into_inner())
}

fn core_properties_xml(title: &str) -> quick_xml::Result<Vec<u8>> {
    let mut w = new_document()?;
    w.create_element("cp:coreProperties")
        .with_attribute(("xmlns:cp", ns::CORE_PROPERTIES))
        .with_attribute(("xmlns:dc", ns::DUBLIN_CORE))
        .with_attribute(("xmlns:dcterms", ns::DUBLIN_CORE_TERMS))
        .with_attribute(("xmlns:xsi", ns::XSI))
        .write_inner_content(|w| {
            w.create_element("dc:title")
                .write_text_content(BytesText::new(title))?;
            w.create_element("dc:creator")
                .write_text_content(BytesText::new(env!("CARGO_PKG_NAME")))?;
            Ok::<_, quick_xml::Error>(())
        })?;
    Ok(w.into_inner())
}

fn app_properties_xml(slide_count: usize) -> quick_xml::Result<Vec<u8>> {
    let mut w = new_document()?;
    let slides = slide_count.to_string();
    w.create_element("Properties")
        .with_attribute(("xmlns", ns::EXTENDED_PROPERTIES))
        .with_attribute(("xmlns:vt", ns::DOC_PROPS_VTYPES))
        .write_inner_content(|w| {
            w.create_element("Application")
                .write_text_content(BytesText::new(env!("CARGO_PKG_NAME")))?;
            w.create_element("Slides")
                .write_text_content(BytesText::new(&slides))?;
            Ok::<_, quick_xml::Error>(())
        })?;
    Ok(w.into_inner())
}

fn slide_xml(slide: &Slide) -> quick_xml::Result<Vec<u8>> {
    let mut w = new_document()?;
    w.create_element("p:sld")
        .with_attribute(("xmlns:a", ns::DRAWING))
        .with_attribute(("xmlns:r", ns::RELATIONSHIPS))
        .with_attribute(("xmlns:p", ns::PRESENTATION))
        .write_inner_content(|w| {
            w.create_element("p:cSld").write_inner_content(|w| {
                w.create_element("p:spTree").write_inner_content(|w| {
                    write_group_header(w)?;
                    // Id 1 belongs to the group shape.
                    for (idx, shape) in slide.shapes.iter().enumerate() {
                        write_shape(w, shape, idx + 2)?;
                    }
                    Ok::<_, quick_xml::Error>(())
                })?;
                Ok::<_, quick_xml::Error>(())
            })?;
            w.create_element("p:clrMapOvr").write_inner_content(|w| {
                w.create_element("a:masterClrMapping").write_empty()?;
                Ok::<_, quick_xml::Error>(())
            })?;
            Ok::<_, quick_xml::Error>(())
        })?;
    Ok(w.into_inner())
}

fn write_group_header(w: &mut XmlWriter) -> quick_xml::Result<()> {
    w.create_element("p:nvGrpSpPr").write_inner_content(|w| {
        w.create_element("p:cNvPr")
            .with_attribute(("id", "1"))
            .with_attribute(("name", ""))
            .write_empty()?;
        w.create_element("p:cNvGrpSpPr").write_empty()?;
        w.create_element("p:nvPr").write_empty()?;
        Ok::<_, quick_xml::Error>(())
    })?;
    w.create_element("p:grpSpPr").write_inner_content(|w| {
        w.create_element("a:xfrm").write_inner_content(|w| {
            for name in ["a:off", "a:chOff"] {
                w.create_element(name)
                    .with_attribute(("x", "0"))
                    .with_attribute(("y", "0"))
                    .write_empty()?;
            }
            for name in ["a:ext", "a:chExt"] {
                w.create_element(name)
                    .with_attribute(("cx", "0"))
                    .with_attribute(("cy", "0"))
                    .write_empty()?;
            }
            Ok::<_, quick_xml::Error>(())
        })?;
        Ok::<_, quick_xml::Error>(())
    })?;
    Ok(())
}

fn write_shape(w: &mut XmlWriter, shape: &Shape, id: usize) -> quick_xml::Result<()> {
    let id = id.to_string();
    w.create_element("p:sp").write_inner_content(|w| {
        w.create_element("p:nvSpPr").write_inner_content(|w| {
            w.create_element("p:cNvPr")
                .with_attribute(("id", id.as_str()))
                .with_attribute(("name", shape.name.as_str()))
                .write_empty()?;
            match shape.kind {
                ShapeKind::TextBox => {
                    w.create_element("p:cNvSpPr")
                        .with_attribute(("txBox", "1"))
                        .write_empty()?;
                }
                ShapeKind::Rectangle => {
                    w.create_element("p:cNvSpPr").write_empty()?;
                }
            }
            w.create_element("p:nvPr").write_empty()?;
            Ok::<_, quick_xml::Error>(())
        })?;

        write_shape_properties(w, shape)?;

        if shape.kind == ShapeKind::TextBox || !shape.paragraphs.is_empty() {
            write_text_body(w, shape)?;
        }
        Ok::<_, quick_xml::Error>(())
    })?;
    Ok(())
}

fn write_shape_properties(w: &mut XmlWriter, shape: &Shape) -> quick_xml::Result<()> {
    let b = shape.bounds;
    let (x, y, cx, cy) = (
        b.x.to_string(),
        b.y.to_string(),
        b.width.to_string(),
        b.height.to_string(),
    );

    w.create_element("p:spPr").write_inner_content(|w| {
        w.create_element("a:xfrm").write_inner_content(|w| {
            w.create_element("a:off")
                .with_attribute(("x", x.as_str()))
                .with_attribute(("y", y.as_str()))
                .write_empty()?;
            w.create_element("a:ext")
                .with_attribute(("cx", cx.as_str()))
                .with_attribute(("cy", cy.as_str()))
                .write_empty()?;
            Ok::<_, quick_xml::Error>(())
        })?;
        w.create_element("a:prstGeom")
            .with_attribute(("prst", "rect"))
            .write_inner_content(|w| {
                w.create_element("a:avLst").write_empty()?;
                Ok::<_, quick_xml::Error>(())
            })?;

        match shape.fill {
            Some(Fill::Solid(color)) => write_solid_fill(w, &color.hex())?,
            Some(Fill::None) => {
                w.create_element("a:noFill").write_empty()?;
            }
            None => {}
        }

        match shape.outline {
            Some(Outline::Solid { color, width }) => {
                let mut ln = w.create_element("a:ln");
                let width = width.map(|v| v.to_string());
                if let Some(width) = width.as_deref() {
                    ln = ln.with_attribute(("w", width));
                }
                ln.write_inner_content(|w| write_solid_fill(w, &color.hex()))?;
            }
            Some(Outline::None) => {
                w.create_element("a:ln").write_inner_content(|w| {
                    w.create_element("a:noFill").write_empty()?;
                    Ok::<_, quick_xml::Error>(())
                })?;
            }
            None => {}
        }
        Ok::<_, quick_xml::Error>(())
    })?;
    Ok(())
}

fn write_solid_fill(w: &mut XmlWriter, hex: &str) -> quick_xml::Result<()> {
    w.create_element("a:solidFill").write_inner_content(|w| {
        w.create_element("a:srgbClr")
            .with_attribute(("val", hex))
            .write_empty()?;
        Ok::<_, quick_xml::Error>(())
    })?;
    Ok(())
}

fn write_text_body(w: &mut XmlWriter, shape: &Shape) -> quick_xml::Result<()> {
    w.create_element("p:txBody").write_inner_content(|w| {
        let mut body_pr = w
            .create_element("a:bodyPr")
            .with_attribute(("wrap", "square"))
            .with_attribute(("rtlCol", "0"));
        if let Some(anchor) = shape.anchor {
            body_pr = body_pr.with_attribute(("anchor", anchor.as_attr()));
        }
        body_pr.write_empty()?;
        w.create_element("a:lstStyle").write_empty()?;

        if shape.paragraphs.is_empty() {
            w.create_element("a:p").write_empty()?;
        }
        for paragraph in &shape.paragraphs {
            write_paragraph(w, paragraph)?;
        }
        Ok::<_, quick_xml::Error>(())
    })?;
    Ok(())
}

fn write_paragraph(w: &mut XmlWriter, paragraph: &Paragraph) -> quick_xml::Result<()> {
    w.create_element("a:p").write_inner_content(|w| {
        if paragraph.align.is_some() || paragraph.space_after.is_some() {
            let mut p_pr = w.create_element("a:pPr");
            if let Some(align) = paragraph.align {
                p_pr = p_pr.with_attribute(("algn", align.as_attr()));
            }
            match paragraph.space_after {
                Some(points) => {
                    let val = crate::units::spacing(points).to_string();
                    p_pr.write_inner_content(|w| {
                        w.create_element("a:spcAft").write_inner_content(|w| {
                            w.create_element("a:spcPts")
                                .with_attribute(("val", val.as_str()))
                                .write_empty()?;
                            Ok::<_, quick_xml::Error>(())
                        })?;
                        Ok::<_, quick_xml::Error>(())
                    })?;
                }
                None => {
                    p_pr.write_empty()?;
                }
            }
        }

        for run in &paragraph.runs {
            for (idx, segment) in run.text.split('\n').enumerate() {
                if idx > 0 {
                    w.create_element("a:br")
                        .write_inner_content(|w| write_run_properties(w, run))?;
                }
                if segment.is_empty() {
                    continue;
                }
                w.create_element("a:r").write_inner_content(|w| {
                    write_run_properties(w, run)?;
                    w.create_element("a:t")
                        .write_text_content(BytesText::new(segment))?;
                    Ok::<_, quick_xml::Error>(())
                })?;
            }
        }
        Ok::<_, quick_xml::Error>(())
    })?;
    Ok(())
}

fn write_run_properties(w: &mut XmlWriter, run: &Run) -> quick_xml::Result<()> {
    let size = run.size.map(|s| crate::units::font_size(s).to_string());
    let mut r_pr = w.create_element("a:rPr").with_attribute(("lang", "en-US"));
    if let Some(size) = size.as_deref() {
        r_pr = r_pr.with_attribute(("sz", size));
    }
    if let Some(bold) = run.bold {
        r_pr = r_pr.with_attribute(("b", if bold { "1" } else { "0" }));
    }
    r_pr = r_pr.with_attribute(("dirty", "0"));

    match run.color {
        Some(color) => {
            r_pr.write_inner_content(|w| write_solid_fill(w, &color.hex()))?;
        }
        None => {
            r_pr.write_empty()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slide::{Align, Bounds, Color};
    use std::io::Read;
    use zip::ZipArchive;

    fn sample_deck() -> Deck {
        let mut deck = Deck::new(10_692_000, 7_560_000);
        deck.title = "Q1 & Q2 <Offsite>".to_string();
        let mut slide = Slide::new();
        slide.add_shape(
            Shape::rectangle("Background", Bounds::new(0, 0, 10, 10))
                .fill(Fill::Solid(Color(153, 153, 153)))
                .outline(Outline::None),
        );
        slide.add_shape(
            Shape::text_box("Title", Bounds::new(1, 2, 3, 4)).paragraph(
                Paragraph::from_run(Run::new("Fish & Chips\nSecond line").size(14.0).bold(true))
                    .align(Align::Right),
            ),
        );
        deck.add_slide(slide);
        deck.add_slide(Slide::new());
        deck
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_package_contains_all_parts() {
        let bytes = PptxWriter::new().write(&sample_deck()).unwrap();
        let archive = ZipArchive::new(Cursor::new(&bytes)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();

        for expected in [
            part::CONTENT_TYPES,
            part::PACKAGE_RELS,
            part::PRESENTATION,
            part::PRESENTATION_RELS,
            part::SLIDE_MASTER,
            part::SLIDE_LAYOUT,
            part::THEME,
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/slides/_rels/slide2.xml.rels",
        ] {
            assert!(names.contains(&expected), "missing {}", expected);
        }
        assert!(!names.contains(&"ppt/slides/slide3.xml"));
    }

    #[test]
    fn test_content_types_list_each_slide() {
        let bytes = PptxWriter::new().write(&sample_deck()).unwrap();
        let content_types = read_part(&bytes, part::CONTENT_TYPES);
        assert!(content_types.contains(r#"PartName="/ppt/slides/slide1.xml""#));
        assert!(content_types.contains(r#"PartName="/ppt/slides/slide2.xml""#));
    }

    #[test]
    fn test_presentation_size_and_slide_ids() {
        let bytes = PptxWriter::new().write(&sample_deck()).unwrap();
        let presentation = read_part(&bytes, part::PRESENTATION);
        assert!(presentation.contains(r#"<p:sldSz cx="10692000" cy="7560000"/>"#));
        assert!(presentation.contains(r#"<p:sldId id="256" r:id="rId6"/>"#));
        assert!(presentation.contains(r#"<p:sldId id="257" r:id="rId7"/>"#));

        let rels = read_part(&bytes, part::PRESENTATION_RELS);
        assert!(rels.contains(r#"Id="rId7""#));
        assert!(rels.contains(r#"Target="slides/slide2.xml""#));
    }

    #[test]
    fn test_slide_xml_escapes_text_and_breaks_lines() {
        let bytes = PptxWriter::new().write(&sample_deck()).unwrap();
        let slide = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(slide.contains("<a:t>Fish &amp; Chips</a:t>"));
        assert!(slide.contains("<a:br>"));
        assert!(slide.contains("<a:t>Second line</a:t>"));
        assert!(slide.contains(r#"sz="1400" b="1""#));
        assert!(slide.contains(r#"<a:pPr algn="r"/>"#));
        assert!(slide.contains(r#"<a:srgbClr val="999999"/>"#));
        assert!(slide.contains("<a:ln><a:noFill/></a:ln>"));
        assert!(slide.contains(r#"<p:cNvSpPr txBox="1"/>"#));
    }

    #[test]
    fn test_core_properties_escape_title() {
        let bytes = PptxWriter::new().write(&sample_deck()).unwrap();
        let core = read_part(&bytes, part::CORE_PROPERTIES);
        assert!(core.contains("<dc:title>Q1 &amp; Q2 &lt;Offsite&gt;</dc:title>"));
    }

    #[test]
    fn test_control_characters_are_rejected() {
        let mut deck = sample_deck();
        deck.slides[1].add_shape(
            Shape::text_box("Bell", Bounds::new(0, 0, 1, 1))
                .paragraph(Paragraph::from_run(Run::new("Ring\u{7}"))),
        );

        let err = PptxWriter::new().write(&deck).unwrap_err();
        assert!(matches!(err, Error::Render(_)));
        assert!(err.to_string().contains("U+0007"));
    }

    #[test]
    fn test_control_character_in_title_is_rejected() {
        let mut deck = sample_deck();
        deck.title = "Bad\u{1}Heading".to_string();
        assert!(matches!(PptxWriter::new().write(&deck), Err(Error::Render(_))));
    }

    #[test]
    fn test_xml_chars() {
        assert!(is_xml_char('\t'));
        assert!(is_xml_char('\n'));
        assert!(is_xml_char('é'));
        assert!(is_xml_char('\u{1F600}'));
        assert!(!is_xml_char('\u{0}'));
        assert!(!is_xml_char('\u{B}'));
        assert!(!is_xml_char('\u{1F}'));
        assert!(!is_xml_char('\u{FFFE}'));
    }

    #[test]
    fn test_stored_writer() {
        let bytes = PptxWriter::new().stored().write(&sample_deck()).unwrap();
        assert!(bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]));
    }
}
