//! Receives, reassembles and reports frames until the peer disconnects.
//!
//! # Receiver states
//!
//! ```text
//!            non-empty read / frame reported
//!                 ┌──────────────┐
//!                 ▼              │
//!          ┌───────────────┐─────┘
//!          │ AWAITING_DATA │
//!          └───────────────┘
//!                 │ zero-length read
//!                 ▼
//!          ┌───────────────┐
//!          │ DISCONNECTED  │  (terminal)
//!          └───────────────┘
//! ```
//!
//! Every complete frame already in the buffer is handled *before* the next
//! read is issued, so frames that arrive together are reported without
//! waiting for more bytes.

use sockettester_core::protocol::codec::decode_text;
use sockettester_core::{DecodedFrame, FrameBuffer, FrameError};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, info, trace, warn};

use crate::application::reporter::Reporter;
use crate::domain::DecodeErrorPolicy;
use crate::error::TesterError;

/// Size of the scratch buffer for each individual `read()` call.
const READ_CHUNK: usize = 4096;

/// What a receiver loop saw before the peer disconnected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReceiveSummary {
    /// Frames decoded and reported.
    pub frames: usize,
    /// Frames that failed to decode and were skipped.
    pub skipped: usize,
    /// Bytes of a trailing partial frame dropped at disconnect.
    pub discarded_bytes: usize,
}

/// Reads frames from `reader` and reports them until a zero-length read.
///
/// The peer closing the connection is the normal way for this loop to end:
/// the reporter's `disconnected` is called exactly once and the summary is
/// returned.  A trailing partial frame is never decoded.
///
/// # Errors
///
/// - [`TesterError::Receive`] if a read fails.
/// - [`TesterError::Decode`] if a frame fails to decode and `policy` is
///   [`DecodeErrorPolicy::Abort`].
/// - [`TesterError::Report`] if the reporter fails to write.
pub async fn receive_frames<R, P>(
    reader: &mut R,
    reporter: &mut P,
    policy: DecodeErrorPolicy,
) -> Result<ReceiveSummary, TesterError>
where
    R: AsyncRead + Unpin,
    P: Reporter + ?Sized,
{
    // Streaming receive buffer — accumulates bytes across multiple read() calls.
    let mut buffer = FrameBuffer::with_capacity(READ_CHUNK);
    let mut read_tmp = vec![0u8; READ_CHUNK];
    let mut summary = ReceiveSummary::default();

    loop {
        while let Some(frame) = buffer.next_frame() {
            handle_frame(frame, reporter, policy, &mut summary)?;
        }

        let n = reader
            .read(&mut read_tmp)
            .await
            .map_err(TesterError::Receive)?;

        if n == 0 {
            summary.discarded_bytes = buffer.clear();
            if summary.discarded_bytes > 0 {
                debug!(
                    "discarding {} bytes of an incomplete frame",
                    summary.discarded_bytes
                );
            }
            info!(
                frames = summary.frames,
                skipped = summary.skipped,
                "peer closed the connection"
            );
            reporter.disconnected().map_err(TesterError::Report)?;
            return Ok(summary);
        }

        trace!("read {n} bytes");
        buffer.extend(&read_tmp[..n]);
    }
}

/// Decodes one frame and passes it to the reporter according to `policy`.
fn handle_frame<P>(
    frame: Vec<u8>,
    reporter: &mut P,
    policy: DecodeErrorPolicy,
    summary: &mut ReceiveSummary,
) -> Result<(), TesterError>
where
    P: Reporter + ?Sized,
{
    let text = match String::from_utf8(frame) {
        Ok(text) => text,
        Err(e) => {
            let text = String::from_utf8_lossy(e.as_bytes()).into_owned();
            return reject_frame(text, FrameError::Utf8(e), reporter, policy, summary);
        }
    };

    match decode_text(&text) {
        Ok(message) => {
            debug!("received frame: {message}");
            reporter
                .frame_received(&DecodedFrame { text, message })
                .map_err(TesterError::Report)?;
            summary.frames += 1;
            Ok(())
        }
        Err(error) => reject_frame(text, error, reporter, policy, summary),
    }
}

fn reject_frame<P>(
    text: String,
    error: FrameError,
    reporter: &mut P,
    policy: DecodeErrorPolicy,
    summary: &mut ReceiveSummary,
) -> Result<(), TesterError>
where
    P: Reporter + ?Sized,
{
    reporter
        .frame_rejected(&text, &error)
        .map_err(TesterError::Report)?;

    match policy {
        DecodeErrorPolicy::Skip => {
            warn!("skipping undecodable frame {text:?}: {error}");
            summary.skipped += 1;
            Ok(())
        }
        DecodeErrorPolicy::Abort => Err(TesterError::Decode {
            frame: text,
            source: error,
        }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
