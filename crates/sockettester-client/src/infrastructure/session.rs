//! One tester session: connect, then send and receive concurrently.
//!
//! This module is responsible for:
//!
//! 1. Opening the TCP connection to the configured peer.
//! 2. Running two concurrent tasks over the split stream:
//!    - **Sender**: writes the message script to the write half.
//!    - **Receiver**: reads, reassembles and reports frames from the read half.
//! 3. Keeping the write half open until the receiver is done, so the peer
//!    never sees a half-close caused by the tester.
//! 4. Returning when the peer closes the connection or a fatal error occurs.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{receive_frames, send_script, ReceiveSummary, Reporter};
use crate::domain::TesterConfig;
use crate::error::TesterError;
use crate::infrastructure::connection::PeerConnection;

/// Outcome of a session that ended with the peer disconnecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    /// The address the session was connected to.
    pub peer_addr: SocketAddr,
    /// Frames written by the sender.  If the peer disconnected before the
    /// sender finished, the frames flushed up to that point.
    pub frames_sent: usize,
    /// What the receiver saw.
    pub summary: ReceiveSummary,
}

/// Connects to `config.host:config.port` and runs a session over it.
///
/// # Errors
///
/// Any [`TesterError`]: resolution and connect failures, a failed write, a
/// failed read, a decode failure under the abort policy, or a task failure.
pub async fn run_session<P>(config: TesterConfig, reporter: P) -> Result<SessionReport, TesterError>
where
    P: Reporter + Send + 'static,
{
    let conn = PeerConnection::connect(&config.host, config.port).await?;
    info!("connected to {}:{} ({})", config.host, config.port, conn.peer_addr);
    run_connection(conn, config, reporter).await
}

/// Runs the sender and receiver over an established connection.
///
/// # Errors
///
/// Same as [`run_session`], minus the connect errors.
pub async fn run_connection<P>(
    conn: PeerConnection,
    config: TesterConfig,
    mut reporter: P,
) -> Result<SessionReport, TesterError>
where
    P: Reporter + Send + 'static,
{
    let PeerConnection {
        peer_addr,
        mut read_half,
        mut write_half,
    } = conn;
    let policy = config.decode_policy;
    let script = config.script;

    // ── Sender task ────────────────────────────────────────────────────────────
    //
    // Hands the write half back when done so it can be kept alive below.
    let progress = Arc::new(AtomicUsize::new(0));
    let sender_progress = Arc::clone(&progress);
    let mut sender = tokio::spawn(async move {
        let sent = send_script(&mut write_half, &script, &sender_progress).await?;
        Ok::<_, TesterError>((sent, write_half))
    });

    // ── Receiver task ──────────────────────────────────────────────────────────
    let mut receiver =
        tokio::spawn(async move { receive_frames(&mut read_half, &mut reporter, policy).await });

    // Whichever finishes first decides what happens to the other.  `biased`
    // checks the sender first when both are ready at once.
    let (frames_sent, _write_half) = tokio::select! {
        biased;

        sent = &mut sender => match sent.map_err(TesterError::from).and_then(|r| r) {
            Ok(sent) => sent,
            Err(e) => {
                receiver.abort();
                return Err(e);
            }
        },
        received = &mut receiver => {
            if !sender.is_finished() {
                debug!("receiver finished before the sender; cancelling sender");
            }
            sender.abort();
            let summary = received??;
            let frames_sent = progress.load(Ordering::Acquire);
            return Ok(SessionReport { peer_addr, frames_sent, summary });
        }
    };
    info!("sent {frames_sent} frames to {peer_addr}");

    // `_write_half` stays alive until the receiver has seen the peer close.
    let summary = receiver.await??;

    Ok(SessionReport {
        peer_addr,
        frames_sent,
        summary,
    })
}
