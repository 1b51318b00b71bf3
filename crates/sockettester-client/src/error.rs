//! Error type for the socket tester.
//!
//! Every variant is fatal: it propagates to `main` and ends the process.  A
//! peer closing the connection is *not* an error; the receiver reports it
//! and returns `Ok`.

use std::net::SocketAddr;

use sockettester_core::FrameError;
use thiserror::Error;

/// Errors that end a tester session.
#[derive(Debug, Error)]
pub enum TesterError {
    /// The resolver failed to look up the host name.
    #[error("failed to resolve host '{host}': {source}")]
    Resolution {
        host: String,
        #[source]
        source: std::io::Error,
    },

    /// The resolver succeeded but returned no addresses.
    #[error("host '{host}' resolved to no addresses")]
    NoAddress { host: String },

    /// The TCP connection could not be established.
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// A message could not be encoded into a frame.
    #[error("failed to encode outgoing message: {0}")]
    Encode(#[source] FrameError),

    /// Writing a frame to the connection failed.
    #[error("failed to send frame: {0}")]
    Transmission(#[source] std::io::Error),

    /// Reading from the connection failed.
    #[error("failed to read from peer: {0}")]
    Receive(#[source] std::io::Error),

    /// A received frame could not be decoded and the policy is to abort.
    #[error("failed to decode frame {frame:?}: {source}")]
    Decode {
        frame: String,
        #[source]
        source: FrameError,
    },

    /// Writing to the operator console failed.
    #[error("failed to write report: {0}")]
    Report(#[source] std::io::Error),

    /// The sender or receiver task panicked or was cancelled.
    #[error("session task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
