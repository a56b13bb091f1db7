//! Error types for slide style checking.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading rules, reading a deck, or writing
/// an annotated copy.
///
/// Rule evaluation itself never fails; these cover the edges around it.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open or read the input file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The file format is not supported or could not be detected.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// The byte stream is not a valid presentation container.
    #[error("Invalid presentation container: {0}")]
    InputFormat(String),

    /// ZIP archive error.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML parsing or writing error.
    #[error("XML error: {0}")]
    XmlError(String),

    /// A rule could not be compiled (bad regex).
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    /// A rule file could not be decoded.
    #[error("Invalid rule configuration: {0}")]
    ConfigError(String),
}
