use thiserror::Error;

/// Errors surfaced by the write drivers.
///
/// `E` is the flush sink's error type; the synchronous driver, which never
/// flushes, uses [`core::convert::Infallible`]. Encode-step primitives are
/// deliberately absent here: they either complete or indicate a sizing defect
/// in scratch/destination allocation, which is a debug assertion rather than
/// a recoverable error. Backpressure from a byte source is likewise not an
/// error; it is reported as "not done" by the drivers.
#[derive(Error, Debug, PartialEq)]
pub enum WriteError<E> {
    /// Flushing the output buffer to the transport sink failed.
    #[error("flush failed: {0}")]
    Flush(E),

    /// A segmented/resumable write was invoked against a collaborator that
    /// only supports single-shot completion.
    #[error("resumable writes are not supported by {0}")]
    ResumableNotSupported(&'static str),

    /// A non-finite number has no JSON representation.
    #[error("non-finite number {0} has no JSON representation")]
    NonFiniteNumber(f64),
}
