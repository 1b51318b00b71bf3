//! Codec for encoding and decoding newline-delimited JSON frames.
//!
//! Wire format:
//! ```text
//! [compact JSON object, UTF-8][0x0D 0x0A]
//! ```
//!
//! The encoder never produces a raw CR or LF inside the JSON text because
//! `serde_json` escapes control characters in strings (`"\r"` becomes the
//! two characters `\` `r`).  An encoded frame therefore contains exactly one
//! delimiter, at its very end.

use std::string::FromUtf8Error;

use thiserror::Error;

use crate::protocol::message::Message;

/// The two-byte end-of-frame marker: carriage return + line feed.
pub const DELIMITER: &[u8; 2] = b"\r\n";

/// Errors that can occur during frame encoding or decoding.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The message could not be serialized to JSON.
    #[error("failed to encode message: {0}")]
    Encode(#[source] serde_json::Error),

    /// The frame text is not a JSON object with string values.
    #[error("frame is not a string-to-string JSON object: {0}")]
    Decode(#[source] serde_json::Error),

    /// The frame bytes are not valid UTF-8.
    #[error("frame is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// A frame that has been split off the stream and decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    /// The raw frame text without the trailing delimiter.
    pub text: String,
    /// The decoded mapping.
    pub message: Message,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes a [`Message`] into a frame: compact JSON followed by `\r\n`.
///
/// # Errors
///
/// Returns [`FrameError::Encode`] if serialization fails.
///
/// # Examples
///
/// ```rust
/// use sockettester_core::{encode_frame, Message};
///
/// let bytes = encode_frame(&Message::single("hmiEvent", "resetPlant")).unwrap();
/// assert_eq!(bytes, b"{\"hmiEvent\":\"resetPlant\"}\r\n");
/// ```
pub fn encode_frame(msg: &Message) -> Result<Vec<u8>, FrameError> {
    let mut buf = serde_json::to_vec(msg).map_err(FrameError::Encode)?;
    buf.extend_from_slice(DELIMITER);
    Ok(buf)
}

/// Decodes the bytes of one frame (delimiter already removed) into its text
/// and [`Message`].
///
/// # Errors
///
/// - [`FrameError::Utf8`] if the bytes are not valid UTF-8.
/// - [`FrameError::Decode`] if the text is not a JSON object whose values are
///   all strings.
///
/// # Examples
///
/// ```rust
/// use sockettester_core::decode_frame;
///
/// let frame = decode_frame(br#"{"a":"b"}"#.to_vec()).unwrap();
/// assert_eq!(frame.text, r#"{"a":"b"}"#);
/// assert_eq!(frame.message.get("a"), Some("b"));
/// ```
pub fn decode_frame(bytes: Vec<u8>) -> Result<DecodedFrame, FrameError> {
    let text = String::from_utf8(bytes)?;
    let message = decode_text(&text)?;
    Ok(DecodedFrame { text, message })
}

/// Decodes frame text into a [`Message`].
///
/// # Errors
///
/// Returns [`FrameError::Decode`] if the text is not a string-to-string
/// JSON object.
pub fn decode_text(text: &str) -> Result<Message, FrameError> {
    serde_json::from_str(text).map_err(FrameError::Decode)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
