//! sockettester-client library crate.
//!
//! A diagnostic client that connects to a service speaking newline-delimited
//! JSON over raw TCP, sends it a script of messages, and prints every frame
//! the service sends back until it closes the connection.
//!
//! # Architecture
//!
//! ```text
//! [sockettester-client]
//!   ├── domain/           Pure types: TesterConfig, MessageScript
//!   ├── application/      Sender and Receiver loops over any AsyncWrite/AsyncRead
//!   └── infrastructure/
//!         ├── connection/ Host resolution and TCP connect
//!         └── session/    Spawns sender + receiver over the split stream
//! ```
//!
//! # Layer rules
//!
//! - `domain` does no network I/O (it may read a script file from disk).
//! - `application` is generic over `tokio::io` traits, so it can be tested
//!   with scripted mock streams instead of sockets.
//! - `infrastructure` is the only layer that touches `TcpStream`.

/// Domain layer: configuration and message scripts.
pub mod domain;

/// Application layer: the sender and receiver loops.
pub mod application;

/// Infrastructure layer: TCP connection and session orchestration.
pub mod infrastructure;

/// Error type shared by all layers.
pub mod error;

pub use error::TesterError;
