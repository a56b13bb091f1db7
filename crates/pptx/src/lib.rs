//! PPTX (Office Open XML) backend for slide style checking.
//!
//! Reads .pptx files (ZIP archives of XML parts) into a
//! [`deckstyle_core::Deck`] and writes annotated copies back.

pub mod annotate;
pub mod parser;
mod xml;

#[cfg(test)]
mod fixtures;

pub use annotate::PptxAnnotator;
pub use parser::PptxParser;
