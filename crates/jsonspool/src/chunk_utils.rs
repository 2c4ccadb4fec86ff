//! Helpers for splitting payloads into chunks and segments, used to exercise
//! the writer under arbitrary delivery patterns.

use alloc::vec::Vec;

/// Split `payload` into approximately equal-sized chunks without
/// breaking UTF-8 code points.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &str, parts: usize) -> Vec<&str> {
    assert!(parts > 0);
    let len = payload.len();
    let chunk_size = len.div_ceil(parts);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < len {
        let mut end = core::cmp::min(start + chunk_size, len);
        while end < len && !payload.is_char_boundary(end) {
            end += 1;
        }
        chunks.push(&payload[start..end]);
        start = end;
    }
    chunks
}

/// Split `payload` into byte segments at the given split points.
///
/// Out-of-range or unsorted split points are clamped; empty segments are
/// dropped. An empty `splits` yields the whole payload as one segment.
#[must_use]
pub fn produce_segments<'a>(payload: &'a [u8], splits: &[usize]) -> Vec<&'a [u8]> {
    let mut segments = Vec::new();
    let mut start = 0;
    for &split in splits {
        let end = split.clamp(start, payload.len());
        if end > start {
            segments.push(&payload[start..end]);
            start = end;
        }
    }
    if start < payload.len() {
        segments.push(&payload[start..]);
    }
    segments
}
