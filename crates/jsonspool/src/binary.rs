//! Incremental Base64 writer for binary values, with pull- and push-style
//! source adapters.
//!
//! The encode core is [`write_segment`]: it completes any trailing 3-byte
//! group carried from the previous call, encodes as many whole groups as the
//! chunk/buffer budget allows, and stashes 0–2 leftover bytes back into the
//! frame. Both adapters drive this single core; they differ only in how the
//! next segment arrives and how consumption is acknowledged.
//!
//! Consumption is reported back to the caller, so a segment the budget could
//! not swallow is simply redelivered after a flush — the core never buffers
//! more than the two-byte trailing carry.

use alloc::vec::Vec;
use core::cmp;

use crate::{
    base64,
    state::{Progress, WriteState},
};

/// Outcome of one [`write_segment`] call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SegmentStep {
    /// Source bytes consumed from the segment (possibly zero).
    pub consumed: usize,
    /// Whether the value is complete (closing quote written).
    pub done: bool,
}

/// Encodes one segment of a binary value, resuming from the top frame.
///
/// Returns how many of `bytes` were consumed and whether the value
/// completed. When `consumed < bytes.len()`, the chunk/buffer budget was
/// exhausted; the caller frees capacity and redelivers the remainder.
pub(crate) fn write_segment(
    bytes: &[u8],
    is_final: bool,
    state: &mut WriteState<'_>,
) -> SegmentStep {
    let progress = state.top_frame().progress;
    debug_assert!(progress != Progress::Done, "value already completed");

    if progress == Progress::NotStarted {
        state.flush_tokens();
        state.put_byte(b'"');
        state.top_frame().advance_to(Progress::HeaderEmitted);
    }

    let mut consumed = 0;

    // Complete the trailing carry first: it must pair with the head of this
    // segment before any whole-group encoding can happen.
    let trailing_len = state.top_frame().trailing.len();
    if trailing_len > 0 {
        if trailing_len + bytes.len() >= 3 {
            let need = 3 - trailing_len;
            let mut group = [0u8; 3];
            group[..trailing_len].copy_from_slice(state.top_frame().trailing.as_slice());
            group[trailing_len..].copy_from_slice(&bytes[..need]);
            let dst = state.out.reserve(4);
            let (_, written) = base64::encode_groups(&group, dst);
            debug_assert_eq!(written, 4);
            state.out.commit(4);
            state.top_frame().trailing.clear();
            consumed = need;
        } else if is_final {
            // Not enough for a whole group and no more input is coming:
            // encode carry plus remainder as the padded final group.
            let mut tail = [0u8; 2];
            let total = trailing_len + bytes.len();
            tail[..trailing_len].copy_from_slice(state.top_frame().trailing.as_slice());
            tail[trailing_len..total].copy_from_slice(bytes);
            let dst = state.out.reserve(4);
            let written = base64::encode_final(&tail[..total], dst);
            state.out.commit(written);
            state.top_frame().trailing.clear();
            return finish(bytes.len(), state);
        } else {
            state.top_frame().trailing.extend(bytes);
            let frame = state.top_frame();
            frame.resume_offset += bytes.len();
            frame.advance_to(Progress::Streaming);
            // No output was produced; more input is needed.
            return SegmentStep {
                consumed: bytes.len(),
                done: false,
            };
        }
    }

    // Whole 3-byte groups, bounded by the chunk budget and free capacity but
    // never less than one group: a single group is the atomic unit the
    // buffer may grow for, which keeps the grow-only driver progressing.
    let rest = &bytes[consumed..];
    let budget_out = cmp::min(
        state.options.chunk_size,
        cmp::max(state.free_capacity(), 4),
    );
    let mut groups = cmp::min(rest.len() / 3, budget_out / 4);
    if rest.len() >= 3 {
        groups = cmp::max(groups, 1);
    }
    if groups > 0 {
        let in_len = groups * 3;
        let out_len = groups * 4;
        let dst = state.out.reserve(out_len);
        let (c, w) = base64::encode_groups(&rest[..in_len], &mut dst[..out_len]);
        debug_assert_eq!((c, w), (in_len, out_len));
        state.out.commit(out_len);
        consumed += in_len;
    }

    let remaining = bytes.len() - consumed;
    if remaining > 2 {
        // Budget exhausted mid-segment; report partial consumption.
        let frame = state.top_frame();
        frame.resume_offset += consumed;
        frame.advance_to(Progress::Streaming);
        return SegmentStep {
            consumed,
            done: false,
        };
    }

    if is_final {
        if remaining > 0 {
            let dst = state.out.reserve(4);
            let written = base64::encode_final(&bytes[consumed..], dst);
            state.out.commit(written);
            consumed = bytes.len();
        }
        finish(consumed, state)
    } else {
        if remaining > 0 {
            state.top_frame().trailing.extend(&bytes[consumed..]);
            consumed = bytes.len();
        }
        let frame = state.top_frame();
        frame.resume_offset += consumed;
        frame.advance_to(Progress::Streaming);
        SegmentStep {
            consumed,
            done: false,
        }
    }
}

/// Writes the closing quote and marks the value done.
fn finish(consumed: usize, state: &mut WriteState<'_>) -> SegmentStep {
    {
        let frame = state.top_frame();
        frame.resume_offset += consumed;
        frame.advance_to(Progress::Streaming);
    }
    state.put_byte(b'"');
    state.top_frame().advance_to(Progress::Done);
    SegmentStep {
        consumed,
        done: true,
    }
}

// ---------------------------------------------------------------------------
// Source adapters
// ---------------------------------------------------------------------------

/// One read result from a pull-style byte source: one or more contiguous
/// memory segments plus a completion flag.
#[derive(Debug)]
pub struct ReadBatch<'src> {
    segments: Vec<&'src [u8]>,
    is_completed: bool,
}

impl<'src> ReadBatch<'src> {
    /// Builds a read result from `segments`; `is_completed` marks the end of
    /// the stream.
    #[must_use]
    pub fn new(segments: Vec<&'src [u8]>, is_completed: bool) -> Self {
        Self {
            segments,
            is_completed,
        }
    }

    /// The segments of this read, in delivery order.
    #[must_use]
    pub fn segments(&self) -> &[&'src [u8]] {
        &self.segments
    }

    /// Whether no further bytes will follow this read.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.is_completed
    }
}

/// A pull-style byte source: the writer asks for the next read result and
/// acknowledges how much of it was used versus merely inspected.
///
/// Bytes past the consumed position are redelivered on the next
/// [`try_read`], which is how backpressure from a full output buffer reaches
/// the source.
///
/// [`try_read`]: PullByteSource::try_read
pub trait PullByteSource {
    /// Returns the next read result, or `None` when no input is currently
    /// available (the stream may still be incomplete).
    fn try_read(&mut self) -> Option<ReadBatch<'_>>;

    /// Acknowledges `consumed` bytes as used and `examined` bytes as
    /// inspected, both relative to the start of the last read result.
    fn advance_to(&mut self, consumed: usize, examined: usize);
}

/// Progress of a pull-driven value write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullProgress {
    /// The value is complete.
    Done,
    /// The source has no input available right now; retry (or abort) later.
    NeedInput,
    /// The output buffer should be flushed before continuing.
    NeedCapacity,
}

/// Cumulative acknowledgment for one delivery of segments.
#[derive(Debug, Clone, Copy)]
pub struct SegmentProgress {
    /// Bytes consumed across the delivered segments.
    pub consumed: usize,
    /// Bytes examined; equal to `consumed` here, since the writer never
    /// inspects bytes it cannot consume. Unconsumed bytes are expected to be
    /// redelivered.
    pub examined: usize,
    /// Whether the value is complete.
    pub done: bool,
}

/// Drives the encode core over the segments of one read result.
///
/// Shared by the pull and push adapters; the carry/quote logic lives only in
/// [`write_segment`].
fn drive_segments(
    segments: &[&[u8]],
    is_completed: bool,
    state: &mut WriteState<'_>,
) -> SegmentProgress {
    let mut consumed = 0;
    let mut done = false;

    if segments.is_empty() {
        if is_completed {
            done = write_segment(&[], true, state).done;
        }
    } else {
        for (i, segment) in segments.iter().enumerate() {
            let is_final = is_completed && i == segments.len() - 1;
            let step = write_segment(segment, is_final, state);
            consumed += step.consumed;
            if step.done {
                done = true;
                break;
            }
            if step.consumed < segment.len() {
                // Out of budget; the rest of this read will be redelivered.
                break;
            }
        }
    }

    SegmentProgress {
        consumed,
        examined: consumed,
        done,
    }
}

/// Pull adapter: reads from `source` and encodes until the value completes,
/// the source runs dry, or the buffer wants a flush.
pub(crate) fn write_from_pull<S: PullByteSource + ?Sized>(
    source: &mut S,
    state: &mut WriteState<'_>,
) -> PullProgress {
    loop {
        let step = {
            let Some(batch) = source.try_read() else {
                return PullProgress::NeedInput;
            };
            drive_segments(batch.segments(), batch.is_completed(), state)
        };
        source.advance_to(step.consumed, step.examined);
        if step.done {
            return PullProgress::Done;
        }
        if state.should_flush() {
            return PullProgress::NeedCapacity;
        }
        if step.consumed == 0 {
            // The read made no progress and the buffer has room: the source
            // delivered nothing usable yet.
            return PullProgress::NeedInput;
        }
    }
}

/// Push adapter: the caller delivers segments and the writer acknowledges
/// how much it used.
///
/// The caller is expected to redeliver unconsumed bytes on the next call
/// (after freeing buffer capacity), exactly as a pipe-style transport would.
/// A frame must be open via [`WriteState::begin_value`]; when `done` is
/// reported, finish with [`WriteState::pop`]`(true)`.
pub fn push_segments(
    segments: &[&[u8]],
    is_completed: bool,
    state: &mut WriteState<'_>,
) -> SegmentProgress {
    drive_segments(segments, is_completed, state)
}
