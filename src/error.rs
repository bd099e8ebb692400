use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the data to digest.
#[derive(Error, Debug)]
pub enum DigestError {
    /// The input could not be read to the end.
    #[error("Error reading input: {0}")]
    ReadError(#[from] std::io::Error),
    /// The file could not be opened.
    #[error("Error opening {path:?}: {source}")]
    OpenError {
        /// Path that was passed in.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Errors raised parsing a [Digest](crate::Digest) from text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseDigestError {
    /// The text is not exactly 32 characters long.
    #[error("Invalid digest length: expected 32 hex characters, found {0}")]
    InvalidLength(usize),
    /// The text contains something other than hex digits.
    #[error("Invalid hex digest: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}
