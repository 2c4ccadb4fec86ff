//! A resumable, chunked JSON value writer.
//!
//! `jsonspool` streams arbitrarily large text and binary values into a JSON
//! byte stream through a bounded-capacity output buffer. A value never has to
//! be materialized in memory: the writer encodes one bounded chunk at a time,
//! and when the buffer runs out of headroom it hands control back to the
//! caller so the buffer can be flushed to a transport, then resumes exactly
//! where it left off.
//!
//! The crate is sans-io: all encoding work is synchronous CPU work, and the
//! only operation that may wait is the caller-supplied [`FlushSink`]. Both a
//! blocking driver and an async wrapper can be built on the same loop.
//!
//! # Example
//!
//! ```rust
//! use jsonspool::{
//!     OutputBuffer, TokenWriter, ValueSource, WriteState, WriterOptions, write_value,
//! };
//!
//! let options = WriterOptions::default();
//! let mut out = OutputBuffer::new(&options);
//! let mut tokens = TokenWriter::new();
//! let mut state = WriteState::new(&mut out, &mut tokens, &options);
//!
//! write_value(&mut ValueSource::Text("hello"), &mut state).unwrap();
//! assert_eq!(out.as_slice(), b"\"hello\"");
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod base64;
mod binary;
mod error;
mod escape;
mod options;
mod output;
mod state;
mod text;
mod token;
mod writer;

pub mod chunk_utils;

#[cfg(test)]
mod tests;

pub use binary::{PullByteSource, PullProgress, ReadBatch, SegmentProgress, push_segments};
pub use error::WriteError;
pub use options::WriterOptions;
pub use output::OutputBuffer;
pub use state::{Frame, Progress, WriteState};
pub use token::TokenWriter;
pub use writer::{
    FlushSink, RawValueHook, ValueSource, VecSink, WriteOutcome, flush_all, flush_if_full,
    write_hooked_value, write_value, write_value_with,
};
