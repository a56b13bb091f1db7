//! PPTX file parser implementation.

use crate::xml::{attribute, is_element, is_text_run, local_name, relationship_id, xml_error};
use deckstyle_core::{Deck, Error, Paragraph, Result, RgbColor, Run, Shape, ShapeId, ShapeKind, Slide, TextFrame};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::io::{Read, Seek};
use zip::ZipArchive;

const PRESENTATION_PATH: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PATH: &str = "ppt/_rels/presentation.xml.rels";

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse a PPTX file from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R, filename: &str) -> Result<Deck> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::InputFormat(format!("Failed to open ZIP: {}", e)))?;

        let mut deck = Deck::new(filename);

        let slide_order = self.get_slide_order(&mut archive)?;
        log::debug!("{}: {} slides", filename, slide_order.len());

        for (idx, slide_path) in slide_order.iter().enumerate() {
            let content = read_file_from_archive(&mut archive, slide_path)?;
            let slide = parse_slide_xml(&content, idx + 1, slide_path)?;
            deck.add_slide(slide);
        }

        Ok(deck)
    }

    /// Get the ordered list of slide paths.
    ///
    /// Uses the `sldIdLst` of `presentation.xml`, resolved through its
    /// relationships. Without a slide list, falls back to the numbering of
    /// the slide relationships.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_content = read_file_from_archive(archive, PRESENTATION_RELS_PATH)
            .map_err(|e| Error::InputFormat(format!("Not a presentation: {}", e)))?;
        let relationships = parse_relationships(&rels_content)?;

        let presentation = read_file_from_archive(archive, PRESENTATION_PATH)
            .map_err(|e| Error::InputFormat(format!("Not a presentation: {}", e)))?;
        let listed = parse_slide_id_list(&presentation)?;

        if !listed.is_empty() {
            let mut slides = Vec::with_capacity(listed.len());
            for rid in listed {
                match relationships.iter().find(|r| r.id == rid && r.is_slide()) {
                    Some(rel) => slides.push(resolve_target("ppt", &rel.target)),
                    None => log::warn!("Slide list references unknown relationship {}", rid),
                }
            }
            return Ok(slides);
        }

        let mut slides: Vec<(String, Option<usize>)> = relationships
            .iter()
            .filter(|r| r.is_slide())
            .map(|r| {
                let order_num = extract_slide_number(&r.target).or_else(|| extract_slide_number(&r.id));
                (resolve_target("ppt", &r.target), order_num)
            })
            .collect();

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// One entry of a `.rels` part.
#[derive(Debug, Clone)]
struct Relationship {
    id: String,
    rel_type: String,
    target: String,
}

impl Relationship {
    fn is_slide(&self) -> bool {
        self.rel_type.ends_with("/slide")
    }
}

fn parse_relationships(xml: &str) -> Result<Vec<Relationship>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut relationships = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) if is_element(e, b"Relationship") => {
                relationships.push(Relationship {
                    id: attribute(e, b"Id").unwrap_or_default(),
                    rel_type: attribute(e, b"Type").unwrap_or_default(),
                    target: attribute(e, b"Target").unwrap_or_default(),
                });
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error("Error parsing relationships", e)),
            _ => {}
        }
    }

    Ok(relationships)
}

/// Relationship ids of `p:sldIdLst/p:sldId`, in presentation order.
fn parse_slide_id_list(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut ids = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) if is_element(e, b"sldId") => {
                if let Some(rid) = relationship_id(e) {
                    ids.push(rid);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error("Error parsing presentation.xml", e)),
            _ => {}
        }
    }

    Ok(ids)
}

/// Resolve a relationship target against the directory of its source part.
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Which element kinds become shapes.
fn shape_kind(local: &[u8]) -> Option<ShapeKind> {
    match local {
        b"sp" => Some(ShapeKind::AutoShape),
        b"grpSp" => Some(ShapeKind::Group),
        b"pic" => Some(ShapeKind::Picture),
        b"graphicFrame" => Some(ShapeKind::GraphicFrame),
        b"cxnSp" => Some(ShapeKind::Connector),
        _ => None,
    }
}

/// An open shape element while walking the tree.
#[derive(Debug)]
struct OpenShape {
    id: ShapeId,
    kind: ShapeKind,
    named: bool,
}

/// Streaming builder for one slide's shape arena.
///
/// Group nesting is tracked with an explicit stack. Every `a:r` element in
/// the part advances the run ordinal, including runs that don't end up in
/// the model (tables, alternate content), so ordinals line up with
/// [`crate::PptxAnnotator`].
#[derive(Debug)]
struct SlideBuilder {
    slide: Slide,
    open: Vec<OpenShape>,
    in_tree: bool,
    alternate_depth: usize,
    frame: Option<TextFrame>,
    paragraph: Option<Paragraph>,
    run: Option<Run>,
    run_counter: usize,
    in_properties: bool,
    in_line: bool,
    in_fill: bool,
    in_text: bool,
}

impl SlideBuilder {
    fn new(slide: Slide) -> Self {
        Self {
            slide,
            open: Vec::new(),
            in_tree: false,
            alternate_depth: 0,
            frame: None,
            paragraph: None,
            run: None,
            run_counter: 0,
            in_properties: false,
            in_line: false,
            in_fill: false,
            in_text: false,
        }
    }

    fn collecting_shapes(&self) -> bool {
        self.in_tree && self.alternate_depth == 0
    }

    fn start(&mut self, e: &BytesStart<'_>) {
        let name = e.name();
        let local = local_name(name.as_ref());

        if let Some(kind) = shape_kind(local).filter(|_| self.collecting_shapes()) {
            let parent = self.open.last().map(|o| o.id);
            let id = self.slide.add_shape(parent, Shape::new(kind));
            self.open.push(OpenShape {
                id,
                kind,
                named: false,
            });
            return;
        }

        match local {
            b"spTree" => self.in_tree = true,
            b"AlternateContent" => self.alternate_depth += 1,
            b"txBody" => {
                let is_text_shape = self.open.last().is_some_and(|o| o.kind == ShapeKind::AutoShape);
                if is_text_shape && self.collecting_shapes() && self.frame.is_none() {
                    self.frame = Some(TextFrame::new());
                }
            }
            b"p" if self.frame.is_some() => self.paragraph = Some(Paragraph::new()),
            b"r" if is_text_run(name.as_ref()) => self.begin_run(),
            b"t" if self.run.is_some() => self.in_text = true,
            b"ln" if self.in_properties => self.in_line = true,
            b"solidFill" if self.in_properties && !self.in_line => self.in_fill = true,
            _ => self.properties(e, local),
        }

        if local == b"rPr" && self.run.is_some() {
            self.in_properties = true;
        }
    }

    fn empty(&mut self, e: &BytesStart<'_>) {
        let name = e.name();
        let local = local_name(name.as_ref());

        match local {
            b"p" => {
                if let Some(frame) = self.frame.as_mut() {
                    frame.add_paragraph(Paragraph::new());
                }
            }
            b"r" if is_text_run(name.as_ref()) => {
                self.begin_run();
                self.end_run();
            }
            _ => self.properties(e, local),
        }
    }

    /// Elements that may appear either as start or empty tags.
    fn properties(&mut self, e: &BytesStart<'_>, local: &[u8]) {
        match local {
            b"cNvPr" => {
                let Some(open) = self.open.last_mut().filter(|o| !o.named) else {
                    return;
                };
                open.named = true;
                let id = open.id;
                if let (Some(shape), Some(name)) = (self.slide.shape_mut(id), attribute(e, b"name")) {
                    shape.name = name;
                }
            }
            b"rPr" => {
                if let Some(run) = self.run.as_mut() {
                    run.size = attribute(e, b"sz")
                        .and_then(|sz| sz.parse::<f64>().ok())
                        .map(|hundredths| hundredths / 100.0);
                }
            }
            b"latin" if self.in_properties => {
                if let Some(run) = self.run.as_mut() {
                    run.font = attribute(e, b"typeface");
                }
            }
            b"srgbClr" if self.in_fill => {
                if let Some(run) = self.run.as_mut() {
                    run.color = attribute(e, b"val").and_then(|v| RgbColor::from_hex(&v));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let (true, Some(run)) = (self.in_text, self.run.as_mut()) {
            run.text.push_str(text);
        }
    }

    fn end(&mut self, name: &[u8]) {
        let local = local_name(name);
        if shape_kind(local).is_some() && self.collecting_shapes() {
            self.open.pop();
            return;
        }

        match local {
            b"spTree" => self.in_tree = false,
            b"AlternateContent" => self.alternate_depth = self.alternate_depth.saturating_sub(1),
            b"txBody" => {
                let owner = self.open.last().map(|o| o.id);
                if let (Some(frame), Some(id)) = (self.frame.take(), owner) {
                    if let Some(shape) = self.slide.shape_mut(id) {
                        shape.text_frame = Some(frame);
                    }
                }
            }
            b"p" => {
                if let (Some(paragraph), Some(frame)) = (self.paragraph.take(), self.frame.as_mut()) {
                    frame.add_paragraph(paragraph);
                }
            }
            b"r" if is_text_run(name) => self.end_run(),
            b"rPr" => {
                self.in_properties = false;
                self.in_line = false;
                self.in_fill = false;
            }
            b"ln" => self.in_line = false,
            b"solidFill" => self.in_fill = false,
            b"t" => self.in_text = false,
            _ => {}
        }
    }

    fn begin_run(&mut self) {
        let id = self.run_counter;
        self.run_counter += 1;
        if self.paragraph.is_some() {
            self.run = Some(Run::new(id, ""));
        }
    }

    fn end_run(&mut self) {
        if let (Some(run), Some(paragraph)) = (self.run.take(), self.paragraph.as_mut()) {
            paragraph.add_run(run);
        }
        self.in_text = false;
    }
}

/// Parse one slide part into a [`Slide`].
pub(crate) fn parse_slide_xml(xml: &str, number: usize, part: &str) -> Result<Slide> {
    let mut reader = Reader::from_str(xml);
    let mut builder = SlideBuilder::new(Slide::new(number).with_part(part));

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => builder.start(e),
            Ok(Event::Empty(ref e)) => builder.empty(e),
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default();
                builder.text(&text);
            }
            Ok(Event::CData(ref e)) => builder.text(&String::from_utf8_lossy(e)),
            Ok(Event::End(ref e)) => {
                let name = e.name();
                builder.end(name.as_ref());
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(&format!("Error parsing {}", part), e)),
            _ => {}
        }
    }

    log::debug!(
        "Slide {} ({}): {} shapes, {} run elements",
        number,
        part,
        builder.slide.shapes().len(),
        builder.run_counter
    );

    Ok(builder.slide)
}

/// Read a file from the ZIP archive.
pub(crate) fn read_file_from_archive<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
