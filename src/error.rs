//! Error types for body extraction

use thiserror::Error;

/// Errors that can occur while extracting bodies
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Failed to parse the raw message structure
    #[error("Failed to parse message structure: {0}")]
    Structure(String),

    /// Embedded-message extraction was requested but the tree holds no
    /// `message/rfc822` part
    #[error("No embedded message/rfc822 part in tree")]
    MissingEmbeddedPart,

    /// The streaming re-parser surfaced an error mid-stream
    #[error("Embedded message re-parse failed: {0}")]
    Splitter(String),
}

/// Result type for body extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;
