//! # Share Code Envelope
//!
//! Turns a record into the string players paste, and back.
//!
//! ```text
//! "8" + base64(snappy(record image))
//! ```
//!
//! The compressor is snappy's raw block format and the text encoding is
//! standard padded base64, both exactly as the game client emits them.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{ShareCodeError, ShareCodeResult};
use crate::layout::RECORD_SIZE;
use crate::record::ShareCode;
use crate::VERSION_TAG;

/// Encodes a record as a share code string.
///
/// For a code produced by the game client, `encode(&decode(text)?)` gives
/// back `text` unchanged.
///
/// # Panics
///
/// Panics only if snappy rejects the record image, which cannot happen for
/// an image of [`RECORD_SIZE`] bytes.
#[must_use]
pub fn encode(code: &ShareCode) -> String {
    let image = code.to_bytes();
    let compressed = snap::raw::Encoder::new()
        .compress_vec(&image)
        .expect("record image is far below snappy's block limit");

    let mut text = String::from(VERSION_TAG);
    STANDARD.encode_string(&compressed, &mut text);

    tracing::debug!(compressed = compressed.len(), chars = text.len(), "encoded share code");
    text
}

/// Decodes a share code string.
///
/// A leading version tag is stripped when present; text without it is
/// accepted as an already-stripped body.
///
/// # Errors
///
/// Returns [`ShareCodeError::MalformedText`] when the body is not valid
/// base64 and [`ShareCodeError::DecompressionFailure`] when the payload is not
/// a snappy block.
pub fn decode(text: &str) -> ShareCodeResult<ShareCode> {
    let body = text.strip_prefix(VERSION_TAG).unwrap_or(text);

    let compressed = STANDARD.decode(body)?;
    let image = snap::raw::Decoder::new()
        .decompress_vec(&compressed)
        .map_err(ShareCodeError::DecompressionFailure)?;

    if image.len() == RECORD_SIZE {
        tracing::debug!(compressed = compressed.len(), "decoded share code");
    } else {
        tracing::warn!(
            len = image.len(),
            expected = RECORD_SIZE,
            "share code payload size differs from record size"
        );
    }

    Ok(ShareCode::from_bytes(&image))
}

impl ShareCode {
    /// Encodes this record as a share code string.
    #[must_use]
    pub fn to_code_string(&self) -> String {
        encode(self)
    }

    /// Decodes a share code string.
    ///
    /// # Errors
    ///
    /// See [`decode`].
    pub fn from_code(text: &str) -> ShareCodeResult<Self> {
        decode(text)
    }
}

impl fmt::Display for ShareCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self))
    }
}

impl FromStr for ShareCode {
    type Err = ShareCodeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        decode(text)
    }
}
