//! Cooperative drives: pull sources, suspension on starved input, and the
//! bounded-memory guarantee under tiny buffers.

use alloc::{vec, vec::Vec};
use core::convert::Infallible;

use super::utils::{base64_literal, ScriptedSource, ReadPlan};
use crate::{
    FlushSink, OutputBuffer, TokenWriter, ValueSource, VecSink, WriteOutcome, WriteState,
    WriterOptions, flush_all, write_value, write_value_with,
};

#[test]
fn pull_source_single_read() {
    let data: Vec<u8> = (0u8..100).collect();
    let mut source = ScriptedSource::fixed_segments(data.clone(), 100);
    let options = WriterOptions::default();
    let mut out = OutputBuffer::new(&options);
    let mut tokens = TokenWriter::new();
    let mut state = WriteState::new(&mut out, &mut tokens, &options);

    let outcome = write_value(&mut ValueSource::Stream(&mut source), &mut state).unwrap();
    assert_eq!(outcome, WriteOutcome::Complete);
    assert_eq!(out.take(), base64_literal(&data).as_bytes());
}

/// One-byte segments are the worst case for the trailing carry; the output
/// must be identical to the contiguous encoding.
#[test]
fn pull_source_one_byte_segments() {
    let data: Vec<u8> = (0u8..50).collect();
    let mut source = ScriptedSource::fixed_segments(data.clone(), 1);
    let options = WriterOptions::default();
    let mut out = OutputBuffer::new(&options);
    let mut tokens = TokenWriter::new();
    let mut state = WriteState::new(&mut out, &mut tokens, &options);

    let outcome = write_value(&mut ValueSource::Stream(&mut source), &mut state).unwrap();
    assert_eq!(outcome, WriteOutcome::Complete);
    assert_eq!(out.take(), base64_literal(&data).as_bytes());
}

/// A starved source suspends the write with `Pending`; retrying the same
/// call once input arrives completes it, with the frame carried across the
/// suspension.
#[test]
fn starved_source_suspends_and_resumes() {
    let data = vec![0xde, 0xad, 0xbe, 0xef, 0x42];
    let mut source = ScriptedSource::new(
        data.clone(),
        vec![
            ReadPlan::Segments(vec![2]),
            ReadPlan::Stall,
            ReadPlan::Segments(vec![2, 1]),
        ],
    );
    let options = WriterOptions::default();
    let mut out = OutputBuffer::new(&options);
    let mut tokens = TokenWriter::new();
    let mut state = WriteState::new(&mut out, &mut tokens, &options);
    let mut sink = VecSink::default();

    let first = write_value_with(&mut ValueSource::Stream(&mut source), &mut state, &mut sink)
        .unwrap();
    assert_eq!(first, WriteOutcome::Pending);
    assert!(state.in_flight());

    let second = write_value_with(&mut ValueSource::Stream(&mut source), &mut state, &mut sink)
        .unwrap();
    assert_eq!(second, WriteOutcome::Complete);
    assert!(!state.in_flight());

    flush_all(&mut state, &mut sink).unwrap();
    assert_eq!(sink.0, base64_literal(&data).as_bytes());
}

/// A sink that records the largest flush it ever receives.
#[derive(Default)]
struct MeteredSink {
    bytes: Vec<u8>,
    largest_flush: usize,
}

impl FlushSink for MeteredSink {
    type Error = Infallible;

    fn flush(&mut self, bytes: &[u8]) -> Result<(), Infallible> {
        self.largest_flush = self.largest_flush.max(bytes.len());
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }
}

/// Writing a few hundred kilobytes through a 64-byte buffer: auxiliary state
/// stays O(1), which shows up as every flush staying near the soft capacity
/// no matter how large the value gets.
#[test]
fn bounded_memory_for_large_binary() {
    let data: Vec<u8> = (0..300_000u32).map(|i| (i % 251) as u8).collect();
    let mut source = ScriptedSource::fixed_segments(data.clone(), 7);
    let options = WriterOptions {
        buffer_capacity: 64,
        flush_threshold: 16,
        ..WriterOptions::default()
    };
    let mut out = OutputBuffer::new(&options);
    let mut tokens = TokenWriter::new();
    let mut state = WriteState::new(&mut out, &mut tokens, &options);
    let mut sink = MeteredSink::default();

    let outcome = write_value_with(&mut ValueSource::Stream(&mut source), &mut state, &mut sink)
        .unwrap();
    assert_eq!(outcome, WriteOutcome::Complete);
    flush_all(&mut state, &mut sink).unwrap();

    assert_eq!(sink.bytes, base64_literal(&data).as_bytes());
    // Soft capacity plus at most one growth quantum of slack.
    assert!(
        sink.largest_flush <= 192,
        "flush of {} bytes breaks the bounded-memory invariant",
        sink.largest_flush
    );
}

/// Same bound for a large string with periodic escapes.
#[test]
fn bounded_memory_for_large_text() {
    let value = "0123456789\"\\\nöé".repeat(10_000);
    let mut sink = MeteredSink::default();
    let options = WriterOptions {
        buffer_capacity: 64,
        flush_threshold: 16,
        ..WriterOptions::default()
    };
    let mut out = OutputBuffer::new(&options);
    let mut tokens = TokenWriter::new();
    let mut state = WriteState::new(&mut out, &mut tokens, &options);

    let outcome =
        write_value_with(&mut ValueSource::Text(&value), &mut state, &mut sink).unwrap();
    assert_eq!(outcome, WriteOutcome::Complete);
    flush_all(&mut state, &mut sink).unwrap();

    assert_eq!(super::utils::unquote(&sink.bytes), value);
    assert!(sink.largest_flush <= 192, "flush of {}", sink.largest_flush);
}
