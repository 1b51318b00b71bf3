//! # sockettester-core
//!
//! Framing library for the socket tester: how string-to-string messages
//! travel over a raw TCP stream.
//!
//! This crate has zero dependencies on sockets, async runtimes, or the
//! console.  It only turns messages into bytes and bytes back into messages.
//!
//! # Wire format (for beginners)
//!
//! Every message is a compact JSON object followed by the two bytes `\r\n`:
//!
//! ```text
//! {"hmiEvent":"resetPlant"}\r\n{"hmiEvent":"manualSelected"}\r\n
//! ```
//!
//! TCP is a *stream*: the receiver may get half a frame in one read and two
//! and a half frames in the next.  [`FrameBuffer`] accumulates bytes across
//! reads and hands out complete frames, split at the first `\r\n`.
//!
//! - **`protocol::message`** – the [`Message`] type.
//! - **`protocol::codec`** – [`encode_frame`] and [`decode_frame`].
//! - **`protocol::buffer`** – the [`FrameBuffer`] reassembly buffer.

pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `sockettester_core::Message` instead of the full module path.
pub use protocol::buffer::FrameBuffer;
pub use protocol::codec::{decode_frame, encode_frame, DecodedFrame, FrameError, DELIMITER};
pub use protocol::message::Message;
