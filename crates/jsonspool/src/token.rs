//! Structured token writer: JSON syntax and non-segmented scalar values.
//!
//! The token writer stages syntax bytes (punctuation, property names, scalar
//! literals) in a small internal buffer instead of committing them to the
//! output buffer immediately. The chunk writers call [`TokenWriter::flush`]
//! before emitting raw bytes, which guarantees everything staged so far lands
//! in the output buffer first and ordering is preserved.
//!
//! The writer emits exactly the tokens it is asked for; sequencing commas and
//! colons correctly is the caller's responsibility, as with any token-level
//! emitter.

use alloc::{string::ToString, vec::Vec};

use crate::{escape, output::OutputBuffer};

/// Emits JSON syntax tokens and scalar literals into a staging buffer.
#[derive(Debug, Default)]
pub struct TokenWriter {
    staged: Vec<u8>,
}

impl TokenWriter {
    /// Creates an empty token writer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits all staged bytes to `out` and clears the stage.
    pub fn flush(&mut self, out: &mut OutputBuffer) {
        if self.staged.is_empty() {
            return;
        }
        let n = self.staged.len();
        out.reserve(n)[..n].copy_from_slice(&self.staged);
        out.commit(n);
        self.staged.clear();
    }

    /// `{`
    pub fn begin_object(&mut self) {
        self.staged.push(b'{');
    }

    /// `}`
    pub fn end_object(&mut self) {
        self.staged.push(b'}');
    }

    /// `[`
    pub fn begin_array(&mut self) {
        self.staged.push(b'[');
    }

    /// `]`
    pub fn end_array(&mut self) {
        self.staged.push(b']');
    }

    /// `,`
    pub fn separator(&mut self) {
        self.staged.push(b',');
    }

    /// Writes `"name":`.
    pub fn property_name(&mut self, name: &str) {
        self.write_quoted(name, false);
        self.staged.push(b':');
    }

    /// `null`
    pub fn write_null(&mut self) {
        self.staged.extend_from_slice(b"null");
    }

    /// `true` / `false`
    pub fn write_bool(&mut self, value: bool) {
        let literal: &[u8] = if value { b"true" } else { b"false" };
        self.staged.extend_from_slice(literal);
    }

    /// An integer literal.
    pub fn write_i64(&mut self, value: i64) {
        self.staged.extend_from_slice(value.to_string().as_bytes());
    }

    /// A finite floating-point literal.
    ///
    /// The caller must reject non-finite values; this writer only formats.
    pub fn write_f64(&mut self, value: f64) {
        debug_assert!(value.is_finite(), "non-finite numbers are not JSON");
        self.staged.extend_from_slice(value.to_string().as_bytes());
    }

    /// A complete (non-segmented) string literal, quotes included.
    ///
    /// Large strings belong in the chunked string writer; this is the
    /// single-shot path for short values and property names.
    pub fn write_string(&mut self, value: &str) {
        self.write_quoted(value, false);
    }

    fn write_quoted(&mut self, value: &str, escape_non_ascii: bool) {
        self.staged.push(b'"');
        match escape::first_escape(value, escape_non_ascii) {
            None => self.staged.extend_from_slice(value.as_bytes()),
            Some(k) => {
                self.staged.extend_from_slice(&value.as_bytes()[..k]);
                escape::escape_into(&mut self.staged, &value[k..], escape_non_ascii);
            }
        }
        self.staged.push(b'"');
    }

    /// Number of staged, uncommitted bytes.
    #[must_use]
    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }
}
