//! Integration tests for the sockettester-core framing codec.
//!
//! These tests push encoded frames through [`FrameBuffer`] with many
//! different chunkings and check that the receiving side always sees the same
//! frames, in the same order, with the same contents.

use sockettester_core::{decode_frame, encode_frame, FrameBuffer, Message};

/// Encodes `messages` back to back into one byte stream.
fn encode_all(messages: &[Message]) -> Vec<u8> {
    messages
        .iter()
        .flat_map(|m| encode_frame(m).expect("encode must succeed"))
        .collect()
}

/// Feeds `stream` into a fresh buffer `chunk` bytes at a time and decodes
/// every complete frame as soon as it is available.
fn reassemble(stream: &[u8], chunk: usize) -> Vec<Message> {
    let mut buf = FrameBuffer::new();
    let mut out = Vec::new();
    for piece in stream.chunks(chunk) {
        buf.extend(piece);
        while let Some(frame) = buf.next_frame() {
            out.push(decode_frame(frame).expect("decode must succeed").message);
        }
    }
    assert!(buf.is_empty(), "no bytes may be left over");
    out
}

fn hmi_sequence() -> Vec<Message> {
    vec![
        Message::single("hmiEvent", "resetPlant"),
        Message::single("hmiEvent", "manualSelected"),
        Message::single("hmiEvent", "recipeSelected"),
    ]
}

#[test]
fn test_roundtrip_single_entry_message() {
    let original = Message::single("hmiEvent", "resetPlant");
    let bytes = encode_frame(&original).unwrap();

    let decoded = reassemble(&bytes, bytes.len());

    assert_eq!(decoded, vec![original]);
}

#[test]
fn test_roundtrip_multi_entry_message() {
    let original: Message = [
        ("hmiEvent", "startManualPhases"),
        ("me", "ME_BASES"),
        ("numSrv", "1"),
    ]
    .into_iter()
    .collect();

    let decoded = reassemble(&encode_all(&[original.clone()]), 4096);

    assert_eq!(decoded, vec![original]);
}

#[test]
fn test_roundtrip_values_with_delimiter_characters_and_unicode() {
    let original: Message = [("text", "first\r\nsecond"), ("name", "Übergabe ✓")]
        .into_iter()
        .collect();

    let decoded = reassemble(&encode_all(&[original.clone()]), 1);

    assert_eq!(decoded, vec![original]);
}

#[test]
fn test_chunking_invariance_for_every_chunk_size() {
    // Arrange
    let messages = hmi_sequence();
    let stream = encode_all(&messages);

    // Act / Assert: every chunk size from 1 byte to the whole stream
    for chunk in 1..=stream.len() {
        assert_eq!(
            reassemble(&stream, chunk),
            messages,
            "chunk size {chunk} changed the frame sequence"
        );
    }
}

#[test]
fn test_multibyte_utf8_split_across_chunks_decodes() {
    // A two-byte 'é' will be cut in half by 1-byte chunks; framing works on
    // bytes, so the character is reassembled before decoding.
    let original = Message::single("café", "crème");
    assert_eq!(
        reassemble(&encode_all(&[original.clone()]), 1),
        vec![original]
    );
}

#[test]
fn test_frame_text_matches_serialized_message() {
    let mut buf = FrameBuffer::new();
    buf.extend(&encode_all(&hmi_sequence()));

    let texts: Vec<String> = std::iter::from_fn(|| buf.next_frame())
        .map(|f| decode_frame(f).unwrap().text)
        .collect();

    assert_eq!(
        texts,
        vec![
            r#"{"hmiEvent":"resetPlant"}"#,
            r#"{"hmiEvent":"manualSelected"}"#,
            r#"{"hmiEvent":"recipeSelected"}"#,
        ]
    );
}
