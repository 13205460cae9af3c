//! Error types shared across the slidesmith crates.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching content, synthesizing a deck,
/// or editing one.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read an input file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Bad user input: malformed URL, unsupported document, empty content.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A scraping or generation network call failed or returned non-2xx.
    #[error("Upstream failure: {0}")]
    Upstream(String),

    /// The generation service credential is missing or was rejected.
    #[error("Credential error: {0}")]
    Credential(String),

    /// The generation service returned non-JSON or schema-violating output,
    /// or a document could not be decoded.
    #[error("Malformed content: {0}")]
    Format(String),

    /// An editor operation addressed a slide index that does not exist.
    /// These stem from driver bugs, not user input; callers log and move on.
    #[error("Slide index {index} out of range (deck has {len} slides)")]
    Index { index: usize, len: usize },

    /// An editor operation addressed a field the slide variant does not
    /// have, or supplied a value of the wrong shape for it.
    #[error("Field error: {0}")]
    Field(String),
}
