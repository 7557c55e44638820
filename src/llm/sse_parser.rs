// ABOUTME: Line-buffering SSE decoder for streaming AI gateway responses
// ABOUTME: Handles partial lines across TCP chunk boundaries and multiple events per chunk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 NutriCoach

//! # SSE Stream Decoder
//!
//! The AI gateway streams completions as newline-delimited Server-Sent Events
//! (`data: {json}\n\n`). TCP gives no alignment between network chunks and
//! event boundaries, so a chunk may carry several events, or an event may be
//! split mid-JSON across two chunks.
//!
//! [`SseLineBuffer`] solves both: raw bytes accumulate in an internal buffer
//! and only complete lines (terminated by `\n`) are decoded, so a partial
//! trailing line (including a split multi-byte UTF-8 sequence) stays buffered
//! until more bytes arrive.
//!
//! Framing rules, per the SSE contract as the gateway uses it:
//! - trailing `\r` is stripped,
//! - blank lines (event separators) and comment lines (leading `:`) are
//!   skipped,
//! - lines without a `data: ` prefix are ignored,
//! - the literal payload `[DONE]` terminates the stream.

use std::mem;

/// A decoded SSE event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// A `data:` payload with the prefix stripped
    Data(String),
    /// The `[DONE]` termination signal
    Done,
}

/// Line-buffering SSE decoder that tolerates arbitrary chunk boundaries
#[derive(Debug, Default)]
pub struct SseLineBuffer {
    buffer: Vec<u8>,
}

impl SseLineBuffer {
    /// Create an empty decoder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one complete line into an event, if it carries one
    fn decode_line(raw: &[u8]) -> Option<SseEvent> {
        let line = String::from_utf8_lossy(raw);
        let line = line.strip_suffix('\r').unwrap_or(&line);

        if line.trim().is_empty() || line.starts_with(':') {
            return None;
        }

        let payload = line.strip_prefix("data: ")?.trim();
        if payload.is_empty() {
            return None;
        }
        if payload == "[DONE]" {
            return Some(SseEvent::Done);
        }
        Some(SseEvent::Data(payload.to_owned()))
    }

    /// Feed raw bytes, returning every event completed by this chunk
    ///
    /// Any trailing partial line remains buffered for the next call.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(bytes);

        let mut events = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let rest = self.buffer.split_off(newline + 1);
            let line = mem::replace(&mut self.buffer, rest);
            if let Some(event) = Self::decode_line(&line[..newline]) {
                events.push(event);
            }
        }
        events
    }

    /// Drain the buffer when the byte stream ends
    ///
    /// A final event without a trailing newline is still decoded.
    pub fn flush(&mut self) -> Option<SseEvent> {
        let remaining = mem::take(&mut self.buffer);
        Self::decode_line(&remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_chunk_yields_data_then_done() {
        let mut parser = SseLineBuffer::new();
        let events = parser.feed(
            b"data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n\ndata: [DONE]\n\n",
        );
        assert_eq!(
            events,
            vec![
                SseEvent::Data("{\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}".to_owned()),
                SseEvent::Done,
            ]
        );
        assert_eq!(parser.flush(), None);
    }

    #[test]
    fn split_across_chunks_yields_identical_events() {
        let full = b"data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n\ndata: [DONE]\n\n";
        // Split at every possible byte boundary
        for split in 1..full.len() {
            let mut parser = SseLineBuffer::new();
            let mut events = parser.feed(&full[..split]);
            events.extend(parser.feed(&full[split..]));
            assert_eq!(
                events,
                vec![
                    SseEvent::Data(
                        "{\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}".to_owned()
                    ),
                    SseEvent::Done,
                ],
                "split at byte {split}"
            );
        }
    }

    #[test]
    fn comment_and_blank_lines_are_skipped() {
        let mut parser = SseLineBuffer::new();
        let events = parser.feed(b": keep-alive\n\n\ndata: {\"x\":1}\n");
        assert_eq!(events, vec![SseEvent::Data("{\"x\":1}".to_owned())]);
    }

    #[test]
    fn non_data_fields_are_ignored() {
        let mut parser = SseLineBuffer::new();
        let events = parser.feed(b"event: message\nid: 42\nretry: 100\ndata: {\"x\":1}\n");
        assert_eq!(events, vec![SseEvent::Data("{\"x\":1}".to_owned())]);
    }

    #[test]
    fn carriage_returns_are_stripped() {
        let mut parser = SseLineBuffer::new();
        let events = parser.feed(b"data: {\"x\":1}\r\ndata: [DONE]\r\n");
        assert_eq!(
            events,
            vec![SseEvent::Data("{\"x\":1}".to_owned()), SseEvent::Done]
        );
    }

    #[test]
    fn flush_recovers_unterminated_final_line() {
        let mut parser = SseLineBuffer::new();
        assert!(parser.feed(b"data: [DONE]").is_empty());
        assert_eq!(parser.flush(), Some(SseEvent::Done));
    }

    #[test]
    fn multibyte_utf8_survives_chunk_boundaries() {
        let full = "data: {\"delta\":\"café ☕\"}\n".as_bytes();
        let expected = vec![SseEvent::Data("{\"delta\":\"café ☕\"}".to_owned())];
        // Splits inside a multi-byte sequence must not corrupt the payload
        for split in 1..full.len() {
            let mut parser = SseLineBuffer::new();
            let mut events = parser.feed(&full[..split]);
            events.extend(parser.feed(&full[split..]));
            assert_eq!(events, expected, "split at byte {split}");
        }
    }
}
