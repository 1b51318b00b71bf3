//! Domain layer for sockettester-client.
//!
//! Plain types describing *what* a session does: which peer to contact,
//! which messages to send, and what to do with a frame that fails to decode.
//!
//! # What does NOT belong here?
//!
//! - Any `tokio`, `TcpStream`, or console types
//! - Command-line parsing (that is done in `main.rs`)

pub mod config;
pub mod script;

// Re-export the most commonly needed types at the domain module boundary
// so callers can write `domain::TesterConfig` instead of the longer path.
pub use config::{DecodeErrorPolicy, TesterConfig};
pub use script::{MessageScript, ScriptError};
