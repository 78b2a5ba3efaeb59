//! Payload locations handed out by an allocator.

use std::fmt;

/// Byte offset of an allocation's payload within its arena.
///
/// A `Location` is what `allocate` returns and what `deallocate` takes
/// back. It is an offset, not an address: resolving it always goes
/// through the owning arena's bounds-checked accessors.
///
/// Locations are only meaningful for the arena that produced them.
/// Passing a location to a different arena, or deallocating it twice,
/// violates the caller contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct Location(usize);

impl Location {
    /// Wrap a raw payload offset.
    pub const fn new(offset: usize) -> Self {
        Self(offset)
    }

    /// The payload's byte offset from the start of the arena.
    pub const fn offset(self) -> usize {
        self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

impl From<Location> for usize {
    fn from(loc: Location) -> Self {
        loc.0
    }
}
