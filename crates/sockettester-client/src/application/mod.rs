//! Application layer for sockettester-client.
//!
//! The two halves of a session, written against the `tokio::io` traits so
//! they run unchanged over a TCP stream half or a scripted mock stream.
//!
//! # Responsibilities
//!
//! - Sending the message script as frames ([`sender`])
//! - Reassembling, decoding and reporting received frames ([`receiver`])
//! - Presenting frames to the operator ([`reporter`])
//!
//! # What does NOT belong here?
//!
//! - Resolving host names or opening sockets (that is infrastructure)
//! - Tokio task spawning (that happens in the infrastructure layer)

pub mod receiver;
pub mod reporter;
pub mod sender;

pub use receiver::{receive_frames, ReceiveSummary};
pub use reporter::{ConsoleReporter, MemoryReporter, ReportEvent, Reporter};
pub use sender::send_script;
