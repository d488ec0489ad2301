//! PPTX text reader.
//!
//! Reads the text of every slide back out of a PPTX package, in presentation
//! order. Used to check generated decks.

use deck_core::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Text found on one slide.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideContent {
    /// 1-based slide number.
    pub number: usize,

    /// Text of each shape, top-to-bottom then left-to-right. Paragraphs and
    /// line breaks inside a shape are joined with `\n`.
    pub texts: Vec<String>,
}

impl SlideContent {
    /// Whether any shape on the slide has exactly this text.
    pub fn contains(&self, text: &str) -> bool {
        self.texts.iter().any(|t| t == text)
    }
}

/// Reader for PPTX (Office Open XML) files.
pub struct DeckReader;

impl DeckReader {
    /// Create a new PPTX reader.
    pub fn new() -> Self {
        Self
    }

    /// Read every slide's text from a PPTX file.
    pub fn read<R: Read + Seek>(&self, reader: R) -> Result<Vec<SlideContent>> {
        let mut archive =
            ZipArchive::new(reader).map_err(|e| Error::Zip(format!("Failed to open ZIP: {}", e)))?;

        let slide_order = self.get_slide_order(&mut archive)?;

        slide_order
            .iter()
            .enumerate()
            .map(|(idx, slide_path)| self.read_slide(&mut archive, slide_path, idx + 1))
            .collect()
    }

    /// Get the ordered list of slide paths from the presentation relationships.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_content = self.read_file_from_archive(archive, "ppt/_rels/presentation.xml.rels")?;
        let mut slides: Vec<(String, Option<usize>)> = Vec::new();

        let mut reader = Reader::from_str(&rels_content);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let rel_type = attribute(e, b"Type").unwrap_or_default();
                    let target = attribute(e, b"Target").unwrap_or_default();
                    let id = attribute(e, b"Id").unwrap_or_default();

                    if rel_type.ends_with("/slide") {
                        let order_num =
                            extract_slide_number(&target).or_else(|| extract_slide_number(&id));
                        let full_path = match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("ppt/{}", target),
                        };
                        slides.push((full_path, order_num));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!("Error parsing relationships: {}", e)));
                }
                _ => {}
            }
        }

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    fn read_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        number: usize,
    ) -> Result<SlideContent> {
        let content = self.read_file_from_archive(archive, slide_path)?;
        let mut shapes = extract_shapes_from_xml(&content)?;

        shapes.sort_by(|a, b| {
            a.y.cmp(&b.y)
                .then(a.x.cmp(&b.x))
                .then(a.order.cmp(&b.order))
        });

        Ok(SlideContent {
            number,
            texts: shapes.into_iter().map(|s| s.text).collect(),
        })
    }

    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::Zip(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::Zip(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for DeckReader {
    fn default() -> Self {
        Self::new()
    }
}

/// A shape with text, as found in slide XML.
#[derive(Debug, Default)]
struct ShapeInfo {
    text: String,
    x: i64,
    y: i64,
    /// Position in the shape tree, to keep ties stable.
    order: usize,
}

/// Extract shapes with text and position from slide XML.
fn extract_shapes_from_xml(xml_content: &str) -> Result<Vec<ShapeInfo>> {
    let mut shapes = Vec::new();
    let mut reader = Reader::from_str(xml_content);

    let mut current_shape: Option<ShapeInfo> = None;
    let mut paragraph_count = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    current_shape = Some(ShapeInfo {
                        order: shapes.len(),
                        ..ShapeInfo::default()
                    });
                    paragraph_count = 0;
                }
                b"p" => {
                    if let Some(shape) = current_shape.as_mut() {
                        if paragraph_count > 0 {
                            shape.text.push('\n');
                        }
                        paragraph_count += 1;
                    }
                }
                b"br" => {
                    if let Some(shape) = current_shape.as_mut() {
                        shape.text.push('\n');
                    }
                }
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                b"off" => {
                    if let Some(shape) = current_shape.as_mut() {
                        set_offset(shape, e);
                    }
                }
                b"br" => {
                    if let Some(shape) = current_shape.as_mut() {
                        shape.text.push('\n');
                    }
                }
                b"p" => {
                    if let Some(shape) = current_shape.as_mut() {
                        if paragraph_count > 0 {
                            shape.text.push('\n');
                        }
                        paragraph_count += 1;
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if in_text {
                    if let Some(shape) = current_shape.as_mut() {
                        let text = e.unescape().unwrap_or_default();
                        shape.text.push_str(&text);
                    }
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    if let Some(mut shape) = current_shape.take() {
                        shape.text = shape.text.trim().to_string();
                        if !shape.text.is_empty() {
                            shapes.push(shape);
                        }
                    }
                }
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Xml(format!("Error parsing slide: {}", e)));
            }
            _ => {}
        }
    }

    Ok(shapes)
}

fn set_offset(shape: &mut ShapeInfo, e: &BytesStart<'_>) {
    if let Some(x) = attribute(e, b"x").and_then(|v| v.parse().ok()) {
        shape.x = x;
    }
    if let Some(y) = attribute(e, b"y").and_then(|v| v.parse().ok()) {
        shape.y = y;
    }
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slides/slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
