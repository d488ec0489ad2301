//! In-memory slide model consumed by the PPTX writer.
//!
//! Positions and sizes are in EMUs (see [`crate::units`]); font sizes and
//! paragraph spacing are in points.

use serde::{Deserialize, Serialize};

/// An RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const WHITE: Color = Color(255, 255, 255);

    /// Hex form used by `a:srgbClr`, e.g. `CC0000`.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub(crate) fn as_attr(&self) -> &'static str {
        match self {
            Align::Left => "l",
            Align::Center => "ctr",
            Align::Right => "r",
        }
    }
}

/// Vertical anchoring of text inside its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Top,
    Middle,
    Bottom,
}

impl Anchor {
    pub(crate) fn as_attr(&self) -> &'static str {
        match self {
            Anchor::Top => "t",
            Anchor::Middle => "ctr",
            Anchor::Bottom => "b",
        }
    }
}

/// Position and size of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Bounds {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Same size, shifted down by `dy`.
    pub fn below(&self, dy: i64) -> Self {
        Self {
            y: self.y + self.height + dy,
            ..*self
        }
    }
}

/// A run of text sharing one character format.
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    /// Text content. `\n` becomes a line break inside the paragraph.
    pub text: String,
    pub size: Option<f64>,
    pub bold: Option<bool>,
    pub color: Option<Color>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: None,
            bold: None,
            color: None,
        }
    }

    pub fn size(mut self, points: f64) -> Self {
        self.size = Some(points);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// A paragraph made of one or more runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub align: Option<Align>,
    /// Space after the paragraph, in points.
    pub space_after: Option<f64>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A paragraph holding a single run.
    pub fn from_run(run: Run) -> Self {
        Self::new().run(run)
    }

    pub fn run(mut self, run: Run) -> Self {
        self.runs.push(run);
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = Some(align);
        self
    }

    pub fn space_after(mut self, points: f64) -> Self {
        self.space_after = Some(points);
        self
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// Shape fill. A shape with no fill set inherits the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    Solid(Color),
    None,
}

/// Shape outline. A shape with no outline set inherits the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outline {
    /// Solid line; `width` in EMUs, or the default width when `None`.
    Solid { color: Color, width: Option<i64> },
    None,
}

/// What kind of shape to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// A text box (`txBox="1"`), transparent unless filled.
    TextBox,
    /// A rectangle auto shape.
    Rectangle,
}

/// A shape placed on a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub name: String,
    pub bounds: Bounds,
    pub fill: Option<Fill>,
    pub outline: Option<Outline>,
    pub anchor: Option<Anchor>,
    pub paragraphs: Vec<Paragraph>,
}

impl Shape {
    fn new(kind: ShapeKind, name: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            kind,
            name: name.into(),
            bounds,
            fill: None,
            outline: None,
            anchor: None,
            paragraphs: Vec::new(),
        }
    }

    /// Create a text box.
    pub fn text_box(name: impl Into<String>, bounds: Bounds) -> Self {
        Self::new(ShapeKind::TextBox, name, bounds)
    }

    /// Create a rectangle.
    pub fn rectangle(name: impl Into<String>, bounds: Bounds) -> Self {
        Self::new(ShapeKind::Rectangle, name, bounds)
    }

    pub fn fill(mut self, fill: Fill) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn outline(mut self, outline: Outline) -> Self {
        self.outline = Some(outline);
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn paragraph(mut self, paragraph: Paragraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    /// All paragraph text joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One slide: shapes in z-order (first is at the back).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Slide {
    pub shapes: Vec<Shape>,
}

impl Slide {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Text of every shape that has any, in z-order.
    pub fn text_lines(&self) -> Vec<String> {
        self.shapes
            .iter()
            .map(Shape::text)
            .filter(|t| !t.trim().is_empty())
            .collect()
    }
}

/// A complete deck ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    /// Slide width in EMUs.
    pub width: i64,
    /// Slide height in EMUs.
    pub height: i64,
    pub slides: Vec<Slide>,
    /// Document title stored in the core properties.
    pub title: String,
}

impl Deck {
    pub fn new(width: i64, height: i64) -> Self {
        Self {
            width,
            height,
            slides: Vec::new(),
            title: String::new(),
        }
    }

    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex() {
        assert_eq!(Color(204, 0, 0).hex(), "CC0000");
        assert_eq!(Color(224, 234, 238).hex(), "E0EAEE");
        assert_eq!(Color::WHITE.hex(), "FFFFFF");
    }

    #[test]
    fn test_bounds_below() {
        let b = Bounds::new(10, 20, 30, 40);
        assert_eq!(b.below(5), Bounds::new(10, 65, 30, 40));
    }

    #[test]
    fn test_shape_text() {
        let shape = Shape::text_box("Dates", Bounds::new(0, 0, 1, 1)).paragraph(
            Paragraph::new()
                .run(Run::new("Proposed Dates: ").bold(true))
                .run(Run::new("March 3-5")),
        );
        assert_eq!(shape.text(), "Proposed Dates: March 3-5");
    }

    #[test]
    fn test_slide_text_lines_skip_empty_shapes() {
        let mut slide = Slide::new();
        slide.add_shape(Shape::rectangle("Background", Bounds::new(0, 0, 1, 1)));
        slide.add_shape(
            Shape::text_box("Title", Bounds::new(0, 0, 1, 1))
                .paragraph(Paragraph::from_run(Run::new("Hello"))),
        );
        assert_eq!(slide.text_lines(), vec!["Hello"]);
    }
}
