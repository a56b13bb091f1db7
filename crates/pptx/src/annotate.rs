//! Writing annotated copies of PPTX files.
//!
//! Every archive entry is copied as-is except the slide parts that contain
//! flagged runs. Those are streamed through quick-xml and each flagged
//! run's `a:rPr` gets its fill replaced by a solid alert-color fill.

use crate::xml::{is_element, is_text_run, local_name, prefix, xml_error};
use deckstyle_core::{Deck, Error, Result, RgbColor};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::collections::{HashMap, HashSet};
use std::io::{Cursor, Read, Seek, Write};
use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

/// Fill elements that may appear as direct children of `a:rPr`.
const FILL_ELEMENTS: &[&[u8]] = &[
    b"noFill",
    b"solidFill",
    b"gradFill",
    b"blipFill",
    b"pattFill",
    b"grpFill",
];

/// Writes annotated PPTX files.
pub struct PptxAnnotator;

impl PptxAnnotator {
    /// Create a new PPTX annotator.
    pub fn new() -> Self {
        Self
    }

    /// Copy `source`, coloring every run flagged in `deck`.
    ///
    /// `deck` must have been read from the same container; slides are
    /// matched by part name and runs by ordinal.
    pub fn annotate<R: Read + Seek>(&self, source: R, deck: &Deck) -> Result<Vec<u8>> {
        let targets: HashMap<&str, HashSet<usize>> = deck
            .slides
            .iter()
            .filter_map(|slide| {
                let runs = slide.flagged_runs();
                (!runs.is_empty()).then(|| (slide.part.as_str(), runs.into_iter().collect()))
            })
            .collect();

        let mut archive = ZipArchive::new(source)
            .map_err(|e| Error::InputFormat(format!("Failed to open ZIP: {}", e)))?;
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let mut rewritten = 0usize;

        for index in 0..archive.len() {
            let mut file = archive
                .by_index(index)
                .map_err(|e| Error::ZipError(format!("Failed to read entry {}: {}", index, e)))?;
            let name = file.name().to_string();
            let options = FileOptions::default()
                .compression_method(file.compression())
                .last_modified_time(file.last_modified());

            if file.is_dir() {
                writer
                    .add_directory(name.as_str(), options)
                    .map_err(|e| Error::ZipError(format!("Failed to write '{}': {}", name, e)))?;
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)
                .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", name, e)))?;

            if let Some(runs) = targets.get(name.as_str()) {
                let xml = String::from_utf8(contents)
                    .map_err(|e| Error::XmlError(format!("'{}' is not UTF-8: {}", name, e)))?;
                log::debug!("Marking {} runs in {}", runs.len(), name);
                contents = mark_runs(&xml, runs)?.into_bytes();
                rewritten += 1;
            }

            writer
                .start_file(name.as_str(), options)
                .map_err(|e| Error::ZipError(format!("Failed to write '{}': {}", name, e)))?;
            writer.write_all(&contents)?;
        }

        if rewritten < targets.len() {
            log::warn!(
                "{} flagged slides were not found in the archive",
                targets.len() - rewritten
            );
        }

        let cursor = writer
            .finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))?;
        Ok(cursor.into_inner())
    }
}

impl Default for PptxAnnotator {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the marker is relative to a run being colored.
#[derive(Debug)]
enum RunState {
    /// Not inside a target run.
    Outside,
    /// Inside a target run, before any child element.
    Pending { prefix: String },
    /// Inside the target run's `rPr`.
    Properties {
        prefix: String,
        /// Nesting below `rPr`; 0 means a direct child.
        depth: usize,
        /// Nesting of a fill element being dropped.
        skip: usize,
        filled: bool,
    },
    /// Target run already has its fill.
    Done,
}

/// Streams slide XML, recoloring the runs whose ordinals are in `targets`.
struct RunMarker<'a> {
    targets: &'a HashSet<usize>,
    counter: usize,
    state: RunState,
    writer: Writer<Vec<u8>>,
}

impl<'a> RunMarker<'a> {
    fn new(targets: &'a HashSet<usize>) -> Self {
        Self {
            targets,
            counter: 0,
            state: RunState::Outside,
            writer: Writer::new(Vec::new()),
        }
    }

    fn write(&mut self, event: &Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| xml_error("Error writing slide", e))
    }

    fn write_fill(&mut self, prefix: &str) -> Result<()> {
        let mut color = BytesStart::new(qualify(prefix, "srgbClr"));
        color.push_attribute(("val", RgbColor::ALERT.to_hex().as_str()));

        self.write(&Event::Start(BytesStart::new(qualify(prefix, "solidFill"))))?;
        self.write(&Event::Empty(color))?;
        self.write(&Event::End(BytesEnd::new(qualify(prefix, "solidFill"))))
    }

    /// A whole `rPr` holding only the alert fill.
    fn write_properties(&mut self, prefix: &str) -> Result<()> {
        self.write(&Event::Start(BytesStart::new(qualify(prefix, "rPr"))))?;
        self.write_fill(prefix)?;
        self.write(&Event::End(BytesEnd::new(qualify(prefix, "rPr"))))
    }

    fn handle(&mut self, event: Event<'_>) -> Result<()> {
        match std::mem::replace(&mut self.state, RunState::Outside) {
            RunState::Outside => {
                match &event {
                    Event::Start(e) if is_text_run(e.name().as_ref()) => {
                        let id = self.counter;
                        self.counter += 1;
                        if self.targets.contains(&id) {
                            self.state = RunState::Pending {
                                prefix: element_prefix(e),
                            };
                        }
                    }
                    Event::Empty(e) if is_text_run(e.name().as_ref()) => self.counter += 1,
                    _ => {}
                }
                self.write(&event)
            }
            RunState::Pending { prefix } => match &event {
                Event::Empty(e) if is_element(e, b"rPr") => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    self.write(&Event::Start(e.clone()))?;
                    self.write_fill(&prefix)?;
                    self.write(&Event::End(BytesEnd::new(name)))?;
                    self.state = RunState::Done;
                    Ok(())
                }
                Event::Start(e) if is_element(e, b"rPr") => {
                    self.write(&event)?;
                    self.state = RunState::Properties {
                        prefix,
                        depth: 0,
                        skip: 0,
                        filled: false,
                    };
                    Ok(())
                }
                Event::Start(_) | Event::Empty(_) => {
                    self.write_properties(&prefix)?;
                    self.write(&event)?;
                    self.state = RunState::Done;
                    Ok(())
                }
                // Run closed without children; nothing to color.
                Event::End(_) => self.write(&event),
                _ => {
                    self.write(&event)?;
                    self.state = RunState::Pending { prefix };
                    Ok(())
                }
            },
            RunState::Properties {
                prefix,
                mut depth,
                mut skip,
                mut filled,
            } => {
                if skip > 0 {
                    match &event {
                        Event::Start(_) => skip += 1,
                        Event::End(_) => skip -= 1,
                        _ => {}
                    }
                } else {
                    match &event {
                        Event::Start(e) | Event::Empty(e) if depth == 0 => {
                            let name = e.name();
                            let local = local_name(name.as_ref());
                            let is_start = matches!(event, Event::Start(_));

                            if FILL_ELEMENTS.iter().any(|fill| *fill == local) {
                                // Existing fill is replaced by ours.
                                if is_start {
                                    skip = 1;
                                }
                            } else {
                                if !filled && local != b"ln" {
                                    self.write_fill(&prefix)?;
                                    filled = true;
                                }
                                self.write(&event)?;
                                if is_start {
                                    depth += 1;
                                }
                            }
                        }
                        Event::Start(_) => {
                            depth += 1;
                            self.write(&event)?;
                        }
                        Event::End(_) if depth > 0 => {
                            depth -= 1;
                            self.write(&event)?;
                        }
                        Event::End(_) => {
                            if !filled {
                                self.write_fill(&prefix)?;
                            }
                            self.write(&event)?;
                            self.state = RunState::Done;
                            return Ok(());
                        }
                        _ => self.write(&event)?,
                    }
                }

                self.state = RunState::Properties {
                    prefix,
                    depth,
                    skip,
                    filled,
                };
                Ok(())
            }
            RunState::Done => {
                let closes_run = matches!(&event, Event::End(e) if is_text_run(e.name().as_ref()));
                if !closes_run {
                    self.state = RunState::Done;
                }
                self.write(&event)
            }
        }
    }

    fn finish(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner())
            .map_err(|e| Error::XmlError(format!("Annotated slide is not UTF-8: {}", e)))
    }
}

fn element_prefix(e: &BytesStart<'_>) -> String {
    let name = e.name();
    prefix(name.as_ref())
        .map(|p| String::from_utf8_lossy(p).into_owned())
        .unwrap_or_default()
}

fn qualify(prefix: &str, local: &str) -> String {
    if prefix.is_empty() {
        local.to_string()
    } else {
        format!("{}:{}", prefix, local)
    }
}

/// Rewrite one slide part so the runs with the given ordinals use the
/// alert color.
pub(crate) fn mark_runs(xml: &str, targets: &HashSet<usize>) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut marker = RunMarker::new(targets);

    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(event) => marker.handle(event)?,
            Err(e) => return Err(xml_error("Error parsing slide", e)),
        }
    }

    marker.finish()
}
