//! Write drivers: synchronous and cooperative loops over the chunk writers.
//!
//! A value's shape selects its chunk writer through a small closed tagged
//! variant ([`ValueSource`]); the writers themselves are stateless, so the
//! same loop drives a value whether it arrives as an in-memory slice or a
//! pull-based stream. The cooperative driver's only suspension point is
//! [`FlushSink::flush`] — all chunking work is synchronous CPU work, and an
//! async transport can wrap the same loop around an awaited flush.

use alloc::vec::Vec;
use core::convert::Infallible;

use crate::{
    binary::{self, PullByteSource, PullProgress},
    error::WriteError,
    state::WriteState,
    text,
};

/// Shape of a value to be written; selects the chunk writer.
pub enum ValueSource<'v> {
    /// JSON `null`.
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// An integer scalar.
    Int(i64),
    /// A floating-point scalar; must be finite.
    Float(f64),
    /// An in-memory character sequence of unbounded length.
    Text(&'v str),
    /// An in-memory byte sequence, Base64-encoded on the wire.
    Bytes(&'v [u8]),
    /// A pull-style byte source delivering segments of unpredictable size.
    Stream(&'v mut dyn PullByteSource),
}

impl core::fmt::Debug for ValueSource<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Null => f.write_str("Null"),
            Self::Bool(v) => f.debug_tuple("Bool").field(v).finish(),
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Text(v) => f.debug_tuple("Text").field(v).finish(),
            Self::Bytes(v) => f.debug_tuple("Bytes").field(v).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Result of driving a value write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The value was written completely.
    Complete,
    /// A streamed source ran out of input before completing; the frame stays
    /// on the stack and the same call can be retried when input arrives.
    Pending,
}

/// Destination for flushed output bytes: the transport boundary.
///
/// Flushing is the system's sole suspension point; implementations may
/// block, and async drivers wrap this call in their own awaited flush.
pub trait FlushSink {
    /// Error reported by the transport.
    type Error;

    /// Receives all currently committed output bytes.
    fn flush(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}

/// A [`FlushSink`] that accumulates flushed bytes in memory. Handy for tests
/// and for callers that just want the concatenated output.
#[derive(Debug, Default)]
pub struct VecSink(
    /// All bytes flushed so far, in order.
    pub Vec<u8>,
);

impl FlushSink for VecSink {
    type Error = Infallible;

    fn flush(&mut self, bytes: &[u8]) -> Result<(), Infallible> {
        self.0.extend_from_slice(bytes);
        Ok(())
    }
}

/// Writes `source` synchronously, letting the output buffer grow as needed.
///
/// No flushing occurs; this is the simple path for callers that drain the
/// buffer themselves afterwards. Streamed sources may still report
/// [`WriteOutcome::Pending`] when they run dry.
///
/// # Errors
///
/// Returns [`WriteError::NonFiniteNumber`] for a non-finite float.
pub fn write_value(
    source: &mut ValueSource<'_>,
    state: &mut WriteState<'_>,
) -> Result<WriteOutcome, WriteError<Infallible>> {
    match source {
        ValueSource::Null => state.tokens.write_null(),
        ValueSource::Bool(v) => state.tokens.write_bool(*v),
        ValueSource::Int(v) => state.tokens.write_i64(*v),
        ValueSource::Float(v) => {
            if !v.is_finite() {
                return Err(WriteError::NonFiniteNumber(*v));
            }
            state.tokens.write_f64(*v);
        }
        ValueSource::Text(s) => {
            state.begin_value();
            while !text::write_next_chunk(s, state) {}
            state.pop(true);
        }
        ValueSource::Bytes(b) => {
            state.begin_value();
            let mut offset = 0;
            loop {
                let step = binary::write_segment(&b[offset..], true, state);
                offset += step.consumed;
                if step.done {
                    break;
                }
            }
            state.pop(true);
        }
        ValueSource::Stream(src) => {
            if !state.in_flight() {
                state.begin_value();
            }
            loop {
                match binary::write_from_pull(&mut **src, state) {
                    PullProgress::Done => break,
                    // No flushing in the synchronous driver; the buffer
                    // grows and we keep encoding.
                    PullProgress::NeedCapacity => {}
                    PullProgress::NeedInput => return Ok(WriteOutcome::Pending),
                }
            }
            state.pop(true);
        }
    }
    Ok(WriteOutcome::Complete)
}

/// Writes `source` cooperatively: encode until the buffer wants a flush,
/// flush to `sink`, resume — repeated until the value completes.
///
/// # Errors
///
/// Returns [`WriteError::Flush`] when the sink fails and
/// [`WriteError::NonFiniteNumber`] for a non-finite float.
pub fn write_value_with<K: FlushSink>(
    source: &mut ValueSource<'_>,
    state: &mut WriteState<'_>,
    sink: &mut K,
) -> Result<WriteOutcome, WriteError<K::Error>> {
    match source {
        ValueSource::Null => state.tokens.write_null(),
        ValueSource::Bool(v) => state.tokens.write_bool(*v),
        ValueSource::Int(v) => state.tokens.write_i64(*v),
        ValueSource::Float(v) => {
            if !v.is_finite() {
                return Err(WriteError::NonFiniteNumber(*v));
            }
            state.tokens.write_f64(*v);
        }
        ValueSource::Text(s) => {
            state.begin_value();
            while !text::write_next_chunk(s, state) {
                flush_if_full(state, sink)?;
            }
            state.pop(true);
        }
        ValueSource::Bytes(b) => {
            state.begin_value();
            let mut offset = 0;
            loop {
                let step = binary::write_segment(&b[offset..], true, state);
                offset += step.consumed;
                if step.done {
                    break;
                }
                flush_if_full(state, sink)?;
            }
            state.pop(true);
        }
        ValueSource::Stream(src) => {
            if !state.in_flight() {
                state.begin_value();
            }
            loop {
                match binary::write_from_pull(&mut **src, state) {
                    PullProgress::Done => break,
                    PullProgress::NeedCapacity => drain(state, sink)?,
                    PullProgress::NeedInput => return Ok(WriteOutcome::Pending),
                }
            }
            state.pop(true);
        }
    }
    Ok(WriteOutcome::Complete)
}

/// Flushes committed output bytes to `sink` when free capacity is below the
/// working threshold.
///
/// # Errors
///
/// Propagates the sink's error as [`WriteError::Flush`].
pub fn flush_if_full<K: FlushSink>(
    state: &mut WriteState<'_>,
    sink: &mut K,
) -> Result<(), WriteError<K::Error>> {
    if state.should_flush() {
        drain(state, sink)?;
    }
    Ok(())
}

/// Flushes any staged tokens and all committed output bytes to `sink`.
///
/// # Errors
///
/// Propagates the sink's error as [`WriteError::Flush`].
pub fn flush_all<K: FlushSink>(
    state: &mut WriteState<'_>,
    sink: &mut K,
) -> Result<(), WriteError<K::Error>> {
    state.flush_tokens();
    drain(state, sink)
}

fn drain<K: FlushSink>(
    state: &mut WriteState<'_>,
    sink: &mut K,
) -> Result<(), WriteError<K::Error>> {
    sink.flush(state.out.as_slice()).map_err(WriteError::Flush)?;
    state.out.clear();
    Ok(())
}

/// Extensibility seam for values that serialize themselves.
///
/// Hooks participate in the chunked pipeline only if they can suspend and
/// resume; single-shot hooks are rejected up front rather than risking a
/// torn write.
pub trait RawValueHook {
    /// Whether this hook supports suspend/resume write loops.
    fn supports_resumable(&self) -> bool {
        false
    }

    /// Writes the value's complete raw representation through `state`.
    fn write_raw(&mut self, state: &mut WriteState<'_>);
}

/// Invokes a segmented write against a custom value hook.
///
/// # Errors
///
/// Returns [`WriteError::ResumableNotSupported`] if the hook only supports
/// single-shot completion — an extensibility misuse, not a data error.
pub fn write_hooked_value<H: RawValueHook + ?Sized>(
    hook: &mut H,
    state: &mut WriteState<'_>,
) -> Result<(), WriteError<Infallible>> {
    if !hook.supports_resumable() {
        return Err(WriteError::ResumableNotSupported(core::any::type_name::<H>()));
    }
    state.flush_tokens();
    hook.write_raw(state);
    Ok(())
}
