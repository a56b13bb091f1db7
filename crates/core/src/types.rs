//! Domain types for representing a slide deck's text structure.

use serde::{Deserialize, Serialize};

/// Represents an entire presentation as far as style checking cares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deck {
    /// Original filename (without path).
    pub filename: String,

    /// Slides in presentation order.
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Create a new, empty deck with the given filename.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            slides: Vec::new(),
        }
    }

    /// Add a slide to the deck.
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }
}

/// The format of the source presentation file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PresentationFormat {
    /// Modern PPTX (Office Open XML).
    Pptx,
    /// Legacy PPT (OLE/CFB binary). Detected only so it can be rejected.
    Ppt,
}

impl PresentationFormat {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "pptx" => Some(Self::Pptx),
            "ppt" => Some(Self::Ppt),
            _ => None,
        }
    }

    /// Detect format from file magic bytes.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < 4 {
            return None;
        }

        // PPTX is a ZIP file (PK\x03\x04)
        if bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]) {
            return Some(Self::Pptx);
        }

        // PPT is an OLE/CFB file (D0 CF 11 E0 A1 B1 1A E1)
        if bytes.len() >= 8
            && bytes.starts_with(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1])
        {
            return Some(Self::Ppt);
        }

        None
    }
}

/// Index of a shape inside its slide's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(pub usize);

/// A single slide.
///
/// Shapes are stored in a flat arena and refer to their children by
/// [`ShapeId`], so arbitrarily deep group nesting never needs recursion to
/// walk or drop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Slide {
    /// 1-based slide number.
    pub number: usize,

    /// Container part this slide was read from, e.g. `ppt/slides/slide1.xml`.
    pub part: String,

    shapes: Vec<Shape>,
    roots: Vec<ShapeId>,
}

impl Slide {
    /// Create a new slide with the given number.
    pub fn new(number: usize) -> Self {
        Self {
            number,
            ..Self::default()
        }
    }

    /// Set the container part name.
    pub fn with_part(mut self, part: impl Into<String>) -> Self {
        self.part = part.into();
        self
    }

    /// Add a shape, either at the top level or as the last child of `parent`.
    ///
    /// A parent that is not a group (or does not exist) puts the shape at
    /// the top level instead.
    pub fn add_shape(&mut self, parent: Option<ShapeId>, shape: Shape) -> ShapeId {
        let id = ShapeId(self.shapes.len());
        self.shapes.push(shape);

        match parent.and_then(|p| self.shapes.get_mut(p.0)) {
            Some(group) if group.is_group() => group.children.push(id),
            _ => self.roots.push(id),
        }
        id
    }

    /// Top-level shapes in stored order.
    pub fn roots(&self) -> &[ShapeId] {
        &self.roots
    }

    /// All shapes in the arena, in creation order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.0)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(id.0)
    }

    /// Iterate every run on the slide, regardless of shape nesting.
    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.shapes
            .iter()
            .filter_map(|s| s.text_frame.as_ref())
            .flat_map(|f| f.paragraphs.iter())
            .flat_map(|p| p.runs.iter())
    }

    /// Ids of runs whose color is the alert color.
    pub fn flagged_runs(&self) -> Vec<usize> {
        self.runs()
            .filter(|r| r.is_flagged())
            .map(|r| r.id)
            .collect()
    }
}

/// What kind of element a shape was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Text boxes, placeholders, and geometric shapes.
    AutoShape,
    Picture,
    /// Tables, charts, and other graphic frames.
    GraphicFrame,
    Connector,
    /// A group of nested shapes.
    Group,
}

/// A placeable element on a slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    /// Shape name from the non-visual properties.
    pub name: String,

    pub kind: ShapeKind,

    /// Text content, for leaf shapes that carry a text body.
    pub text_frame: Option<TextFrame>,

    children: Vec<ShapeId>,
}

impl Shape {
    /// Create a shape of the given kind with no text and no children.
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            name: String::new(),
            kind,
            text_frame: None,
            children: Vec::new(),
        }
    }

    /// Create an empty group shape.
    pub fn group() -> Self {
        Self::new(ShapeKind::Group)
    }

    /// Create an auto shape holding the given text frame.
    pub fn text_box(frame: TextFrame) -> Self {
        Self {
            text_frame: Some(frame),
            ..Self::new(ShapeKind::AutoShape)
        }
    }

    pub fn is_group(&self) -> bool {
        self.kind == ShapeKind::Group
    }

    /// Child ids of a group, in stored order. Empty for leaf shapes.
    pub fn children(&self) -> &[ShapeId] {
        &self.children
    }
}

/// Ordered paragraphs of a shape's text body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextFrame {
    pub paragraphs: Vec<Paragraph>,
}

impl TextFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a paragraph to this frame.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }
}

/// An ordered sequence of runs forming one logical block.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a run to this paragraph.
    pub fn add_run(&mut self, run: Run) {
        self.runs.push(run);
    }

    /// Run texts concatenated in order, with nothing inserted between them.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// A styled text span within a paragraph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    /// Ordinal of the run element within its slide part.
    pub id: usize,

    pub text: String,

    /// Latin typeface, if set directly on the run.
    pub font: Option<String>,

    /// Font size in points, if set directly on the run.
    pub size: Option<f64>,

    /// Solid fill color, if set directly on the run.
    pub color: Option<RgbColor>,
}

impl Run {
    /// Create a run with the given ordinal and text and no explicit styling.
    pub fn new(id: usize, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the typeface name.
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Set the font size in points.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Mark this run with the alert color.
    pub fn flag(&mut self) {
        self.color = Some(RgbColor::ALERT);
    }

    pub fn is_flagged(&self) -> bool {
        self.color == Some(RgbColor::ALERT)
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    /// Pure red, used to mark violating runs.
    pub const ALERT: RgbColor = RgbColor(0xFF, 0x00, 0x00);

    /// Parse a six-digit hex value such as `FF0000`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Upper-case six-digit hex value, as written in PresentationML.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}
