//! Protocol module containing the message type, the frame codec, and the
//! reassembly buffer.

pub mod buffer;
pub mod codec;
pub mod message;

pub use buffer::FrameBuffer;
pub use codec::{decode_frame, encode_frame, DecodedFrame, FrameError, DELIMITER};
pub use message::Message;
