/// Configuration options for the chunked value writer.
///
/// These options control how much of a large value is encoded per chunk, when
/// the cooperative driver asks for a flush, and how aggressively string
/// content is escaped. Structural behavior (frame bookkeeping, Base64
/// grouping, quote placement) is not configurable.
#[derive(Debug, Clone, Copy)]
pub struct WriterOptions {
    /// Upper bound, in source bytes, on how much of a value one chunk-writer
    /// call will consume.
    ///
    /// Smaller values hand control back to the driver more often; larger
    /// values amortize per-call overhead. The effective chunk size is further
    /// reduced by the buffer's free capacity so that one chunk's worst-case
    /// expansion always fits.
    ///
    /// # Default
    ///
    /// `2048`
    pub chunk_size: usize,

    /// Minimum free capacity, in bytes, below which [`should_flush`] reports
    /// `true`.
    ///
    /// This must be large enough that one atomic encode unit (one quote byte,
    /// one Base64 group, or one worst-case escaped character) proceeds
    /// without forcing the buffer to grow.
    ///
    /// [`should_flush`]: crate::WriteState::should_flush
    ///
    /// # Default
    ///
    /// `32`
    pub flush_threshold: usize,

    /// Soft capacity, in bytes, of a new [`OutputBuffer`].
    ///
    /// The buffer may exceed this by at most one atomic encode unit; it never
    /// grows to hold a whole value.
    ///
    /// [`OutputBuffer`]: crate::OutputBuffer
    ///
    /// # Default
    ///
    /// `4096`
    pub buffer_capacity: usize,

    /// Whether to escape all non-ASCII characters as `\uXXXX` sequences
    /// (surrogate pairs for supplementary-plane characters).
    ///
    /// When `false`, only the characters JSON requires to be escaped are
    /// escaped, and other characters are emitted as UTF-8.
    ///
    /// # Default
    ///
    /// `false`
    pub escape_non_ascii: bool,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            chunk_size: 2048,
            flush_threshold: 32,
            buffer_capacity: 4096,
            escape_non_ascii: false,
        }
    }
}
