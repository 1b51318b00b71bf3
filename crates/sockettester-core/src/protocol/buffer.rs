//! Streaming reassembly of frames from a TCP byte stream.
//!
//! TCP gives no guarantee that one `read()` returns exactly one frame:
//!
//! - It may return fewer bytes than a full frame (partial read).
//! - It may return bytes from several frames at once (coalesced reads).
//!
//! [`FrameBuffer`] accumulates bytes across reads and splits them at the
//! *first* `\r\n`, so the caller sees the same sequence of frames however the
//! transport chose to chunk the stream.

use tracing::trace;

use crate::protocol::codec::DELIMITER;

/// Accumulating receive buffer that yields complete frames.
///
/// # Examples
///
/// ```rust
/// use sockettester_core::FrameBuffer;
///
/// let mut buf = FrameBuffer::new();
/// buf.extend(b"{\"a\":\"b\"}\r\n{\"c\":");
/// assert_eq!(buf.next_frame().as_deref(), Some(&b"{\"a\":\"b\"}"[..]));
/// assert_eq!(buf.next_frame(), None);
///
/// buf.extend(b"\"d\"}\r\n");
/// assert_eq!(buf.next_frame().as_deref(), Some(&b"{\"c\":\"d\"}"[..]));
/// ```
#[derive(Debug, Default)]
pub struct FrameBuffer {
    /// Bytes received but not yet handed out as a frame.
    buf: Vec<u8>,
    /// Prefix of `buf` already known to contain no delimiter.
    ///
    /// Lets repeated partial reads avoid rescanning the same bytes.  Always
    /// leaves room for a delimiter whose first byte was the last byte seen.
    scanned: usize,
}

impl FrameBuffer {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Creates an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
            scanned: 0,
        }
    }

    /// Appends newly received bytes.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Removes and returns the next complete frame, without its delimiter.
    ///
    /// Returns `None` when the buffer holds no delimiter yet; the bytes stay
    /// buffered until more data arrives.
    pub fn next_frame(&mut self) -> Option<Vec<u8>> {
        let pos = match find_delimiter(&self.buf[self.scanned..]) {
            Some(offset) => self.scanned + offset,
            None => {
                // Keep the last byte unscanned: it may be the CR of a
                // delimiter whose LF has not arrived yet.
                self.scanned = self.buf.len().saturating_sub(DELIMITER.len() - 1);
                return None;
            }
        };

        // `drain(..end)` shifts the remainder to the front of the buffer, which
        // is O(n) but fine for the small frames this protocol carries.
        let mut frame: Vec<u8> = self.buf.drain(..pos + DELIMITER.len()).collect();
        frame.truncate(pos);
        self.scanned = 0;

        trace!(
            frame_len = frame.len(),
            remaining = self.buf.len(),
            "split frame"
        );
        Some(frame)
    }

    /// Number of buffered bytes not yet returned as a frame.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing is buffered.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discards all buffered bytes, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.buf.len();
        self.buf.clear();
        self.scanned = 0;
        dropped
    }
}

/// Returns the index of the first `\r\n` in `haystack`.
fn find_delimiter(haystack: &[u8]) -> Option<usize> {
    haystack.windows(DELIMITER.len()).position(|w| w == DELIMITER)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_has_no_frame() {
        let mut buf = FrameBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.next_frame(), None);
    }

    #[test]
    fn test_partial_frame_stays_buffered() {
        // Arrange: a frame without its delimiter
        let mut buf = FrameBuffer::new();
        buf.extend(br#"{"a":"b"}"#);

        // Act / Assert
        assert_eq!(buf.next_frame(), None);
        assert_eq!(buf.len(), 9);
    }

    #[test]
    fn test_single_frame_is_returned_without_delimiter() {
        let mut buf = FrameBuffer::new();
        buf.extend(b"{\"a\":\"b\"}\r\n");

        assert_eq!(buf.next_frame(), Some(br#"{"a":"b"}"#.to_vec()));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_two_frames_in_one_chunk_split_at_first_delimiter() {
        // Arrange: two complete frames coalesced into one read
        let mut buf = FrameBuffer::new();
        buf.extend(b"{\"a\":\"b\"}\r\n{\"c\":\"d\"}\r\n");

        // Act
        let first = buf.next_frame().unwrap();
        let second = buf.next_frame().unwrap();

        // Assert: the first frame does not contain any part of the second
        assert_eq!(first, br#"{"a":"b"}"#.to_vec());
        assert_eq!(second, br#"{"c":"d"}"#.to_vec());
        assert_eq!(buf.next_frame(), None);
    }

    #[test]
    fn test_delimiter_split_across_reads() {
        // Arrange: CR arrives in one read, LF in the next
        let mut buf = FrameBuffer::new();
        buf.extend(b"{\"a\":\"b\"}\r");
        assert_eq!(buf.next_frame(), None);

        // Act
        buf.extend(b"\n");

        // Assert
        assert_eq!(buf.next_frame(), Some(br#"{"a":"b"}"#.to_vec()));
    }

    #[test]
    fn test_lone_cr_or_lf_is_not_a_delimiter() {
        let mut buf = FrameBuffer::new();
        buf.extend(b"abc\ndef\rghi");
        assert_eq!(buf.next_frame(), None);

        buf.extend(b"\r\n");
        assert_eq!(buf.next_frame(), Some(b"abc\ndef\rghi".to_vec()));
    }

    #[test]
    fn test_empty_frame_between_delimiters() {
        let mut buf = FrameBuffer::new();
        buf.extend(b"\r\n{}\r\n");
        assert_eq!(buf.next_frame(), Some(Vec::new()));
        assert_eq!(buf.next_frame(), Some(b"{}".to_vec()));
    }

    #[test]
    fn test_remainder_is_kept_after_split() {
        let mut buf = FrameBuffer::new();
        buf.extend(b"{}\r\n{\"par");

        assert_eq!(buf.next_frame(), Some(b"{}".to_vec()));

        // Exactly the bytes after the delimiter remain, none of it consumed
        assert_eq!(buf.buf, b"{\"par".to_vec());
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.next_frame(), None);
    }

    #[test]
    fn test_byte_by_byte_feed_yields_same_frames() {
        // Arrange
        let stream = b"{\"a\":\"b\"}\r\n{\"c\":\"d\"}\r\n";
        let mut buf = FrameBuffer::new();
        let mut frames = Vec::new();

        // Act: one byte per "read", draining after each
        for byte in stream.iter() {
            buf.extend(std::slice::from_ref(byte));
            while let Some(frame) = buf.next_frame() {
                frames.push(frame);
            }
        }

        // Assert
        assert_eq!(
            frames,
            vec![br#"{"a":"b"}"#.to_vec(), br#"{"c":"d"}"#.to_vec()]
        );
    }

    #[test]
    fn test_clear_reports_dropped_bytes() {
        let mut buf = FrameBuffer::new();
        buf.extend(b"partial");
        assert_eq!(buf.clear(), 7);
        assert!(buf.is_empty());
    }
}
