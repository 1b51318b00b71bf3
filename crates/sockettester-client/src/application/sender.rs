//! Sends a [`MessageScript`] as frames.
//!
//! Each message is encoded, written in full, and flushed before the next one
//! starts.  No acknowledgement is awaited between sends.

use std::sync::atomic::{AtomicUsize, Ordering};

use sockettester_core::encode_frame;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::domain::MessageScript;
use crate::error::TesterError;

/// Writes every message of `script` to `writer`, in order.
///
/// If the script has an interval, the sender sleeps that long between two
/// consecutive frames (not before the first or after the last).  The writer
/// is left open: closing it would half-close the TCP connection and some
/// peers treat that as a disconnect.
///
/// `progress` is incremented after each frame is flushed, so a caller that
/// cancels the sender part way through can still tell how much went out.
/// Returns the number of frames written.
///
/// # Errors
///
/// - [`TesterError::Encode`] if a message cannot be serialized.
/// - [`TesterError::Transmission`] if a write or flush fails.
pub async fn send_script<W>(
    writer: &mut W,
    script: &MessageScript,
    progress: &AtomicUsize,
) -> Result<usize, TesterError>
where
    W: AsyncWrite + Unpin,
{
    let total = script.messages().len();

    for (index, msg) in script.messages().iter().enumerate() {
        if index > 0 && !script.interval().is_zero() {
            tokio::time::sleep(script.interval()).await;
        }

        let frame = encode_frame(msg).map_err(TesterError::Encode)?;

        // `write_all` keeps writing until the transport has accepted the whole
        // frame, even if the OS only takes part of it per call.
        writer
            .write_all(&frame)
            .await
            .map_err(TesterError::Transmission)?;
        writer.flush().await.map_err(TesterError::Transmission)?;
        progress.fetch_add(1, Ordering::Release);

        debug!("sent frame {}/{total}: {msg}", index + 1);
    }

    Ok(total)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
