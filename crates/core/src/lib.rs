//! Core deck model, shape flattening, and style rule evaluation
//! for slide decks.

pub mod checker;
pub mod error;
pub mod flatten;
pub mod normalize;
pub mod rules;
pub mod types;

pub use checker::{Category, CheckReport, Finding, SlideReport, StyleChecker};
pub use error::{Error, Result};
pub use flatten::{flatten, flatten_from};
pub use normalize::TextNormalizer;
pub use rules::{FontPolicy, PatternRule, RuleSet, RunFlagging};
pub use types::{
    Deck, Paragraph, PresentationFormat, RgbColor, Run, Shape, ShapeId, ShapeKind, Slide,
    TextFrame,
};
