//! Infrastructure layer for sockettester-client.
//!
//! The only layer that touches sockets.
//!
//! # Responsibilities
//!
//! - Resolving the peer's host name (first address only)
//! - Opening the TCP connection and splitting it into read/write halves
//! - Spawning the sender and receiver tasks and joining them
//!
//! # What does NOT belong here?
//!
//! - Framing and decoding (that is `sockettester-core`)
//! - The send/receive loops themselves (that is the application layer)
//! - Configuration parsing (that is done in `main.rs`)

pub mod connection;
pub mod session;

// Re-export the primary entry points so `main.rs` can call them concisely.
pub use connection::{resolve_peer, PeerConnection};
pub use session::{run_connection, run_session, SessionReport};
