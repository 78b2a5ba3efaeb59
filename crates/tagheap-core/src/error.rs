//! Error types for the tagheap allocator.
//!
//! Two kinds of failure exist. Running out of space is an ordinary,
//! recoverable result ([`ArenaError`]). A broken tag chain is a
//! bookkeeping defect ([`InvariantViolation`]) and is treated as fatal
//! by the arena's self-check.

use std::error::Error;
use std::fmt;

/// Errors returned by allocator operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// No free block is large enough for the request.
    ///
    /// The arena is left untouched and remains usable for smaller requests.
    OutOfSpace {
        /// Number of payload bytes requested (saturated on overflow).
        requested: usize,
        /// Largest free payload at the time of the request.
        largest_free: usize,
    },
    /// A request for zero elements.
    ZeroSizedRequest,
    /// The arena could not be constructed with the given parameters.
    InvalidConfig {
        /// Why the configuration was rejected.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfSpace {
                requested,
                largest_free,
            } => {
                write!(
                    f,
                    "out of space: requested {requested} bytes, largest free block {largest_free} bytes"
                )
            }
            Self::ZeroSizedRequest => write!(f, "zero-sized allocation request"),
            Self::InvalidConfig { reason } => write!(f, "invalid arena config: {reason}"),
        }
    }
}

impl Error for ArenaError {}

/// A structural defect found while walking the tag chain.
///
/// Offsets are byte offsets of leading tags unless noted otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A block's leading and trailing tags disagree.
    TagMismatch {
        /// Offset of the block's leading tag.
        offset: usize,
        /// Raw value of the leading tag.
        leading: i32,
        /// Raw value of the trailing tag.
        trailing: i32,
    },
    /// A block claims more bytes than remain in the buffer.
    Overrun {
        /// Offset of the block's leading tag.
        offset: usize,
        /// Raw value of the offending tag.
        tag: i32,
        /// Buffer capacity in bytes.
        capacity: usize,
    },
    /// Fewer than a tag word's bytes remain where a block should start.
    Truncated {
        /// Offset where the next leading tag was expected.
        offset: usize,
        /// Buffer capacity in bytes.
        capacity: usize,
    },
    /// Two neighbouring blocks are both free.
    AdjacentFree {
        /// Offset of the left block's leading tag.
        left: usize,
        /// Offset of the right block's leading tag.
        right: usize,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TagMismatch {
                offset,
                leading,
                trailing,
            } => {
                write!(
                    f,
                    "tag mismatch in block at {offset}: leading {leading}, trailing {trailing}"
                )
            }
            Self::Overrun {
                offset,
                tag,
                capacity,
            } => {
                write!(
                    f,
                    "block at {offset} with tag {tag} overruns capacity {capacity}"
                )
            }
            Self::Truncated { offset, capacity } => {
                write!(
                    f,
                    "no room for a leading tag at {offset} in capacity {capacity}"
                )
            }
            Self::AdjacentFree { left, right } => {
                write!(f, "adjacent free blocks at {left} and {right}")
            }
        }
    }
}

impl Error for InvariantViolation {}
