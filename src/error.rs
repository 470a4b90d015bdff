//! Error types for container operations.

use thiserror::Error;

/// Defines errors surfaced by [`RleVec`](crate::RleVec) and [`AttrRow`](crate::AttrRow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RleError {
    /// An index lay outside the logical sequence, or a replacement range was
    /// inverted after clamping.
    #[error("position {position} out of range (length {length})")]
    OutOfRange {
        /// The offending logical index.
        position: u64,
        /// The logical length of the sequence at the time of the call.
        length: u64,
    },
    /// A grow-resize was requested on an empty container, which has no
    /// trailing value to replicate.
    #[error("cannot extend an empty sequence")]
    EmptyExtend,
}
