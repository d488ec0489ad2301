//! Error types for deck generation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing input or producing a deck.
#[derive(Error, Debug)]
pub enum Error {
    /// The header lines (heading, date, record count) are missing or invalid.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Failed to lay out or serialize the deck.
    #[error("Rendering error: {0}")]
    Render(String),

    /// ZIP archive error (for PPTX).
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML writing or parsing error (for PPTX).
    #[error("XML error: {0}")]
    Xml(String),

    /// Failed to read or write a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error was caused by the caller's input rather than by
    /// deck production.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::MalformedInput(_))
    }
}
