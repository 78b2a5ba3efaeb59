//! The allocation strategy seam consumed by containers.

use crate::error::ArenaError;
use crate::location::Location;

/// A pluggable allocation strategy working in units of a fixed element size.
///
/// Callers ask for storage for `count` elements and receive a payload
/// [`Location`]; they are responsible for handing it back exactly once
/// via [`deallocate`](RawAllocator::deallocate). Implementations never
/// grow beyond their fixed capacity.
pub trait RawAllocator {
    /// Reserve storage for `count` elements.
    ///
    /// Fails without changing any state when no free block is large
    /// enough.
    fn allocate(&mut self, count: usize) -> Result<Location, ArenaError>;

    /// Release storage previously returned by [`allocate`](RawAllocator::allocate).
    ///
    /// The size is recovered from the allocator's own bookkeeping.
    /// Passing a location that is not currently allocated is a contract
    /// violation and may panic.
    fn deallocate(&mut self, location: Location);

    /// Byte size of one element.
    fn element_size(&self) -> usize;

    /// Total capacity of the backing buffer in bytes.
    fn capacity(&self) -> usize;

    /// Total payload bytes currently available across all free blocks.
    fn free_bytes(&self) -> usize;
}
