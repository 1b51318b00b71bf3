//! Operator-facing output of the receiver.
//!
//! The receiver never prints directly; it calls a [`Reporter`].  The binary
//! uses [`ConsoleReporter`] over stdout, which produces exactly:
//!
//! ```text
//! Received: {"hmiEvent":"resetPlant"}\r\n
//! Socket disconnected\r\n
//! ```
//!
//! Tests use [`MemoryReporter`], which records every call so assertions can
//! inspect exactly what was reported and in what order.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use sockettester_core::{DecodedFrame, FrameError};

/// Receives the events of a receiver loop.
pub trait Reporter {
    /// A frame arrived and decoded into a message.
    fn frame_received(&mut self, frame: &DecodedFrame) -> io::Result<()>;

    /// A frame arrived but could not be decoded.  `text` is the frame as
    /// (lossy) UTF-8 without its delimiter.
    fn frame_rejected(&mut self, text: &str, error: &FrameError) -> io::Result<()>;

    /// The peer closed the connection.  Called at most once per session.
    fn disconnected(&mut self) -> io::Result<()>;
}

// ── Console ───────────────────────────────────────────────────────────────────

/// Writes the operator console lines to any [`Write`] sink.
///
/// Undecodable frames are printed like any other frame, so the operator sees
/// everything the peer sent; the decode error itself goes to the log.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    /// A reporter writing to the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, line: &str) -> io::Result<()> {
        self.out.write_all(line.as_bytes())?;
        self.out.write_all(b"\r\n")?;
        self.out.flush()
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn frame_received(&mut self, frame: &DecodedFrame) -> io::Result<()> {
        self.line(&format!("Received: {}", frame.text))
    }

    fn frame_rejected(&mut self, text: &str, _error: &FrameError) -> io::Result<()> {
        self.line(&format!("Received: {text}"))
    }

    fn disconnected(&mut self) -> io::Result<()> {
        self.line("Socket disconnected")
    }
}

// ── In-memory recording ───────────────────────────────────────────────────────

/// One recorded reporter call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Frame(DecodedFrame),
    Rejected(String),
    Disconnected,
}

/// A reporter that records every call in memory.
///
/// Clones share the same event list, so a test can hand one clone to a
/// spawned session and keep another to inspect afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryReporter {
    events: Arc<Mutex<Vec<ReportEvent>>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of the events recorded so far.
    pub fn events(&self) -> Vec<ReportEvent> {
        self.lock().clone()
    }

    /// Texts of the successfully decoded frames, in arrival order.
    pub fn frame_texts(&self) -> Vec<String> {
        self.lock()
            .iter()
            .filter_map(|e| match e {
                ReportEvent::Frame(f) => Some(f.text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of disconnect notifications recorded.
    pub fn disconnect_count(&self) -> usize {
        self.lock()
            .iter()
            .filter(|e| matches!(e, ReportEvent::Disconnected))
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ReportEvent>> {
        // A poisoned lock only means another test thread panicked mid-push;
        // the recorded events are still usable.
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push(&self, event: ReportEvent) {
        self.lock().push(event);
    }
}

impl Reporter for MemoryReporter {
    fn frame_received(&mut self, frame: &DecodedFrame) -> io::Result<()> {
        self.push(ReportEvent::Frame(frame.clone()));
        Ok(())
    }

    fn frame_rejected(&mut self, text: &str, _error: &FrameError) -> io::Result<()> {
        self.push(ReportEvent::Rejected(text.to_string()));
        Ok(())
    }

    fn disconnected(&mut self) -> io::Result<()> {
        self.push(ReportEvent::Disconnected);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
