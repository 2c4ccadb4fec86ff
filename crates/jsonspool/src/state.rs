//! Write state: frame stack, per-value resumption records, and shared
//! buffers.
//!
//! The chunk writers themselves are stateless, reentrant functions; all
//! mutable progress for an in-flight value lives in its [`Frame`]. The state
//! borrows the output buffer and token writer (it owns no data path of its
//! own) and owns the frame stack plus a pooled escape scratch buffer that is
//! reused across chunks.

use alloc::vec::Vec;

use crate::{options::WriterOptions, output::OutputBuffer, token::TokenWriter};

/// Lifecycle of one in-flight value.
///
/// Transitions are monotonic: `NotStarted → HeaderEmitted → Streaming →
/// Done`, with `Streaming` repeating once per chunk. Re-entering a `Done`
/// frame is a defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Progress {
    /// No bytes of this value have been emitted yet.
    NotStarted,
    /// The opening quote has been written; no payload yet.
    HeaderEmitted,
    /// Payload chunks are being emitted.
    Streaming,
    /// The closing quote has been written. Terminal.
    Done,
}

/// 0–2 raw bytes awaiting a complete Base64 group, carried between calls.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TrailingBytes {
    buf: [u8; 2],
    len: u8,
}

impl TrailingBytes {
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn len(&self) -> usize {
        usize::from(self.len)
    }

    pub(crate) fn as_slice(&self) -> &[u8] {
        &self.buf[..usize::from(self.len)]
    }

    /// Appends `bytes`, which must keep the total at two or fewer.
    pub(crate) fn extend(&mut self, bytes: &[u8]) {
        debug_assert!(
            self.len() + bytes.len() <= 2,
            "trailing carry must stay within one Base64 group"
        );
        self.buf[usize::from(self.len)..usize::from(self.len) + bytes.len()]
            .copy_from_slice(bytes);
        self.len += bytes.len() as u8;
    }

    pub(crate) fn clear(&mut self) {
        self.len = 0;
    }
}

/// Per-value resumption record.
///
/// Pushed when a large-value write begins, mutated once per chunk, popped
/// when the value completes or is abandoned. The byte source itself is not
/// held here — its lifecycle belongs to the adapter driving the write — so
/// an abandoned frame is always safe to discard.
#[derive(Debug)]
pub struct Frame {
    /// Where this value is in its lifecycle.
    pub progress: Progress,
    /// Source bytes (or, for pull/push values, cumulative stream bytes)
    /// already consumed. Meaningful while `progress` is `Streaming`.
    pub resume_offset: usize,
    pub(crate) trailing: TrailingBytes,
}

impl Frame {
    fn new() -> Self {
        Self {
            progress: Progress::NotStarted,
            resume_offset: 0,
            trailing: TrailingBytes::default(),
        }
    }

    /// Advances the lifecycle, asserting monotonicity.
    pub(crate) fn advance_to(&mut self, progress: Progress) {
        debug_assert!(
            progress >= self.progress,
            "value progress must be monotonic"
        );
        debug_assert!(
            self.progress != Progress::Done,
            "a Done frame must not be revisited"
        );
        self.progress = progress;
    }
}

/// Aggregates the output buffer, token writer, escaping policy, and the
/// stack of resumption frames for values currently being streamed.
#[derive(Debug)]
pub struct WriteState<'a> {
    pub(crate) out: &'a mut OutputBuffer,
    pub(crate) tokens: &'a mut TokenWriter,
    pub(crate) options: &'a WriterOptions,
    frames: Vec<Frame>,
    /// Pooled escape scratch, borrowed by the string writer for one chunk at
    /// a time and always handed back (cleared, allocation kept).
    pub(crate) scratch: Vec<u8>,
}

impl<'a> WriteState<'a> {
    /// Creates a write state borrowing `out` and `tokens`.
    pub fn new(
        out: &'a mut OutputBuffer,
        tokens: &'a mut TokenWriter,
        options: &'a WriterOptions,
    ) -> Self {
        Self {
            out,
            tokens,
            options,
            frames: Vec::new(),
            scratch: Vec::new(),
        }
    }

    /// Remaining writable bytes before the buffer must grow or be flushed.
    #[must_use]
    pub fn free_capacity(&self) -> usize {
        self.out.free_capacity()
    }

    /// Whether free capacity has dropped below the minimum working
    /// threshold.
    ///
    /// The threshold is sized so that one atomic encode unit can always
    /// proceed without triggering buffer growth.
    #[must_use]
    pub fn should_flush(&self) -> bool {
        self.free_capacity() < self.options.flush_threshold
    }

    /// Begins a large-value write by pushing a fresh frame.
    pub fn begin_value(&mut self) {
        self.frames.push(Frame::new());
    }

    /// Pops the top frame.
    ///
    /// `pop(true)` finalizes a completed value and asserts it reached
    /// `Done`; `pop(false)` discards a frame whose value write is being
    /// abandoned.
    pub fn pop(&mut self, committed: bool) {
        let frame = self.frames.pop();
        debug_assert!(frame.is_some(), "pop on an empty frame stack");
        if committed {
            debug_assert!(
                frame.is_none_or(|f| f.progress == Progress::Done),
                "committed pop requires a Done frame"
            );
        }
    }

    /// The frame of the value currently being written.
    pub fn top_frame(&mut self) -> &mut Frame {
        self.frames.last_mut().expect("no value write in progress")
    }

    /// Whether any value write is in flight.
    #[must_use]
    pub fn in_flight(&self) -> bool {
        !self.frames.is_empty()
    }

    /// The borrowed output buffer, for inspection by the driving caller.
    #[must_use]
    pub fn output(&self) -> &OutputBuffer {
        self.out
    }

    /// Commits any buffered syntax tokens to the output buffer so raw bytes
    /// can safely be written after them.
    pub fn flush_tokens(&mut self) {
        self.tokens.flush(self.out);
    }

    /// Writes a single raw byte (quote) through reserve/commit.
    pub(crate) fn put_byte(&mut self, byte: u8) {
        self.out.reserve(1)[0] = byte;
        self.out.commit(1);
    }

    /// Copies `bytes` into the output buffer as one atomic unit.
    pub(crate) fn put_slice(&mut self, bytes: &[u8]) {
        self.out.reserve(bytes.len())[..bytes.len()].copy_from_slice(bytes);
        self.out.commit(bytes.len());
    }
}
