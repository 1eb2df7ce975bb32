//! # Share Code Error Types
//!
//! All errors that can occur while reading share codes or board files.
//!
//! The field codecs and the record layout cannot fail. Everything here comes
//! from the envelope decode path or from the board description loader.

use thiserror::Error;

/// Errors that can occur in the share code system.
#[derive(Error, Debug)]
pub enum ShareCodeError {
    /// The code body is not valid standard base64 (bad character or padding).
    #[error("malformed share code text: {0}")]
    MalformedText(#[from] base64::DecodeError),

    /// The base64 payload is not a valid snappy block.
    #[error("share code payload failed to decompress: {0}")]
    DecompressionFailure(#[source] snap::Error),

    /// The board description could not be parsed.
    #[error("invalid board file: {0}")]
    InvalidBoardFile(#[from] toml::de::Error),

    /// The board description could not be written as TOML.
    #[error("board could not be serialized: {0}")]
    BoardSerialization(#[from] toml::ser::Error),

    /// A board file could not be read from disk.
    #[error("could not read board file: {0}")]
    Io(#[from] std::io::Error),

    /// A coordinate in a board description falls outside its grid.
    #[error("{section} index {index} out of range (limit {limit})")]
    CellOutOfRange {
        /// Which part of the board the index addresses.
        section: &'static str,
        /// The offending index.
        index: usize,
        /// Exclusive upper bound for that section.
        limit: usize,
    },
}

/// Result type for share code operations.
pub type ShareCodeResult<T> = Result<T, ShareCodeError>;
