//! Shared helpers for writer tests: oracle encoders, one-shot and
//! cooperative drivers, and a scripted pull source.

use alloc::{string::String, vec, vec::Vec};

use base64::Engine as _;

use crate::{
    OutputBuffer, PullByteSource, ReadBatch, TokenWriter, ValueSource, VecSink, WriteOutcome,
    WriteState, WriterOptions, flush_all, flush_if_full, push_segments, write_value,
    write_value_with,
};

/// Oracle: the expected wire form of a binary value.
pub fn base64_literal(data: &[u8]) -> String {
    let mut s = String::from("\"");
    s.push_str(&base64::engine::general_purpose::STANDARD.encode(data));
    s.push('"');
    s
}

/// Decodes a JSON string literal back to its text, using serde_json as the
/// unescaping oracle.
pub fn unquote(output: &[u8]) -> String {
    serde_json::from_slice(output).expect("writer must emit a valid JSON string literal")
}

/// Writes one value synchronously (growing buffer, no flushes) and returns
/// the raw output bytes.
pub fn write_oneshot(mut source: ValueSource<'_>, options: &WriterOptions) -> Vec<u8> {
    let mut out = OutputBuffer::new(options);
    let mut tokens = TokenWriter::new();
    let mut state = WriteState::new(&mut out, &mut tokens, options);
    let outcome = write_value(&mut source, &mut state).unwrap();
    assert_eq!(outcome, WriteOutcome::Complete);
    out.take()
}

/// Writes one value cooperatively through a buffer of `capacity` bytes and
/// returns the concatenation of all flushed output.
pub fn write_cooperative(mut source: ValueSource<'_>, capacity: usize) -> Vec<u8> {
    let options = WriterOptions {
        buffer_capacity: capacity,
        flush_threshold: capacity.min(WriterOptions::default().flush_threshold),
        ..WriterOptions::default()
    };
    let mut out = OutputBuffer::new(&options);
    let mut tokens = TokenWriter::new();
    let mut state = WriteState::new(&mut out, &mut tokens, &options);
    let mut sink = VecSink::default();
    let outcome = write_value_with(&mut source, &mut state, &mut sink).unwrap();
    assert_eq!(outcome, WriteOutcome::Complete);
    flush_all(&mut state, &mut sink).unwrap();
    sink.0
}

/// Delivers `data` through the push adapter, split at `splits`, flushing on
/// backpressure, and returns the concatenated output.
pub fn write_pushed(data: &[u8], splits: &[usize], capacity: usize) -> Vec<u8> {
    let options = WriterOptions {
        buffer_capacity: capacity,
        flush_threshold: capacity.min(WriterOptions::default().flush_threshold),
        ..WriterOptions::default()
    };
    let mut out = OutputBuffer::new(&options);
    let mut tokens = TokenWriter::new();
    let mut state = WriteState::new(&mut out, &mut tokens, &options);
    let mut sink = VecSink::default();

    let segments = crate::chunk_utils::produce_segments(data, splits);
    state.begin_value();
    let mut done = false;
    if segments.is_empty() {
        done = push_segments(&[], true, &mut state).done;
    }
    for (i, segment) in segments.iter().enumerate() {
        let is_last = i == segments.len() - 1;
        let mut offset = 0;
        loop {
            let progress = push_segments(&[&segment[offset..]], is_last, &mut state);
            offset += progress.consumed;
            if progress.done {
                done = true;
                break;
            }
            if offset == segment.len() {
                break;
            }
            // Unconsumed remainder: free capacity, then redeliver.
            flush_if_full(&mut state, &mut sink).unwrap();
        }
    }
    assert!(done, "final segment must complete the value");
    state.pop(true);
    flush_all(&mut state, &mut sink).unwrap();
    sink.0
}

/// One planned `try_read` result of a [`ScriptedSource`].
pub enum ReadPlan {
    /// Deliver the next bytes split into segments of these sizes.
    Segments(Vec<usize>),
    /// Report "no input available" once.
    Stall,
}

/// A pull source that follows a script of reads and honors partial
/// consumption by redelivering unacknowledged bytes.
pub struct ScriptedSource {
    data: Vec<u8>,
    pos: usize,
    plan: Vec<ReadPlan>,
    next_read: usize,
}

impl ScriptedSource {
    pub fn new(data: Vec<u8>, plan: Vec<ReadPlan>) -> Self {
        Self {
            data,
            pos: 0,
            plan,
            next_read: 0,
        }
    }

    /// A source that delivers everything in fixed-size segments, one read.
    pub fn fixed_segments(data: Vec<u8>, segment_len: usize) -> Self {
        let len = data.len();
        let mut sizes = Vec::new();
        let mut covered = 0;
        while covered < len {
            let take = segment_len.min(len - covered);
            sizes.push(take);
            covered += take;
        }
        Self::new(data, vec![ReadPlan::Segments(sizes)])
    }
}

impl PullByteSource for ScriptedSource {
    fn try_read(&mut self) -> Option<ReadBatch<'_>> {
        let plan = self.plan.get(self.next_read);
        self.next_read += 1;
        let rest = &self.data[self.pos..];
        match plan {
            Some(ReadPlan::Stall) => None,
            Some(ReadPlan::Segments(sizes)) => {
                let mut segments = Vec::new();
                let mut offset = 0;
                for &size in sizes {
                    let end = (offset + size).min(rest.len());
                    if end > offset {
                        segments.push(&rest[offset..end]);
                        offset = end;
                    }
                }
                let completed = self.pos + offset >= self.data.len();
                Some(ReadBatch::new(segments, completed))
            }
            // Script exhausted: deliver whatever is left as one final
            // segment (redelivery after partial consumption lands here).
            None => {
                let segments = if rest.is_empty() {
                    Vec::new()
                } else {
                    vec![rest]
                };
                Some(ReadBatch::new(segments, true))
            }
        }
    }

    fn advance_to(&mut self, consumed: usize, examined: usize) {
        assert!(examined >= consumed);
        self.pos += consumed;
        assert!(self.pos <= self.data.len());
    }
}
