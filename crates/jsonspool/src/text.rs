//! Incremental escape + transcode writer for character data.
//!
//! One call encodes one bounded chunk of the value. The chunk budget is
//! derived from the buffer's free capacity divided by the worst-case escape
//! expansion, so a chunk either fits without growth or is the single atomic
//! unit the buffer is allowed to grow for. Chunk boundaries are clamped to
//! whole-character boundaries; an escape sequence is never split because each
//! chunk's escaped form is committed as one unit.

use core::cmp;

use crate::{
    escape,
    state::{Progress, WriteState},
};

/// Writes the next chunk of `value`, resuming from the top frame's offset.
///
/// Returns `true` when the value is complete (closing quote written) and
/// `false` when the caller must free buffer space before retrying. Stateless:
/// all progress lives in the frame.
pub(crate) fn write_next_chunk(value: &str, state: &mut WriteState<'_>) -> bool {
    let (progress, resume) = {
        let frame = state.top_frame();
        (frame.progress, frame.resume_offset)
    };
    debug_assert!(progress != Progress::Done, "value already completed");

    if progress == Progress::NotStarted {
        // Syntax tokens staged so far must land before our raw quote byte.
        state.flush_tokens();
        state.put_byte(b'"');
        state.top_frame().advance_to(Progress::HeaderEmitted);
    }

    // At least one character per call, so the synchronous (grow-only) driver
    // always makes progress; the rounded-up boundary is that atomic unit.
    let budget = cmp::min(
        state.options.chunk_size,
        cmp::max(state.free_capacity() / escape::MAX_EXPANSION, 1),
    );
    let end = escape::ceil_char_boundary(value, cmp::min(resume + budget, value.len()));
    let chunk = &value[resume..end];

    if !chunk.is_empty() {
        match escape::first_escape(chunk, state.options.escape_non_ascii) {
            // Fast path: nothing to escape, copy the chunk through whole.
            None => state.put_slice(chunk.as_bytes()),
            Some(k) => {
                // Escape into the pooled scratch, then commit in one unit.
                // The scratch is worst-case sized by `escape_into`, so the
                // transform always consumes the whole chunk.
                let mut scratch = core::mem::take(&mut state.scratch);
                scratch.clear();
                scratch.extend_from_slice(&chunk.as_bytes()[..k]);
                escape::escape_into(&mut scratch, &chunk[k..], state.options.escape_non_ascii);
                state.put_slice(&scratch);
                scratch.clear();
                state.scratch = scratch;
            }
        }
    }

    {
        let frame = state.top_frame();
        frame.resume_offset = end;
        frame.advance_to(Progress::Streaming);
    }

    if end == value.len() {
        state.put_byte(b'"');
        state.top_frame().advance_to(Progress::Done);
        true
    } else {
        false
    }
}
