//! Typed element pointers.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use tagheap_core::{Element, Location};

/// A typed reference to one element slot inside an allocation.
///
/// A pointer remembers the allocation it came from (`base`) and an
/// element index within it, so element access can be bounds-checked
/// against the allocation's block. Any pointer derived from an
/// allocation, not only its base, identifies that allocation for
/// deallocation.
pub struct Pointer<T> {
    base: Location,
    index: usize,
    _element: PhantomData<fn() -> T>,
}

impl<T> Pointer<T> {
    pub(crate) fn new(base: Location) -> Self {
        Self {
            base,
            index: 0,
            _element: PhantomData,
        }
    }

    /// Payload location of the allocation this pointer belongs to.
    pub fn base(&self) -> Location {
        self.base
    }

    /// Element index within the allocation.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Pointer `count` elements further along the same allocation.
    ///
    /// No bounds check happens here; access through an out-of-range
    /// pointer panics. The index saturates at `usize::MAX`, which is out
    /// of range for every allocation.
    #[must_use]
    pub fn add(self, count: usize) -> Self {
        Self {
            index: self.index.saturating_add(count),
            ..self
        }
    }
}

impl<T: Element> Pointer<T> {
    /// Byte location of the element this pointer addresses.
    ///
    /// # Panics
    ///
    /// Panics if the byte offset does not fit in `usize`.
    pub fn location(&self) -> Location {
        let offset = self
            .index
            .checked_mul(T::SIZE)
            .and_then(|bytes| self.base.offset().checked_add(bytes));
        match offset {
            Some(offset) => Location::new(offset),
            None => panic!("{self:?}: element offset overflows"),
        }
    }
}

impl<T> Clone for Pointer<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Pointer<T> {}

impl<T> PartialEq for Pointer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base && self.index == other.index
    }
}

impl<T> Eq for Pointer<T> {}

impl<T> Hash for Pointer<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.base.hash(state);
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for Pointer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pointer")
            .field("base", &self.base)
            .field("index", &self.index)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_advances_index_not_base() {
        let p = Pointer::<u32>::new(Location::new(4));
        let q = p.add(3);
        assert_eq!(q.base(), Location::new(4));
        assert_eq!(q.index(), 3);
        assert_eq!(q.location(), Location::new(16));
        assert_ne!(p, q);
        assert_eq!(q.add(0), q);
    }

    #[test]
    fn add_saturates_instead_of_wrapping() {
        let p = Pointer::<u32>::new(Location::new(4)).add(usize::MAX - 1);
        assert_eq!(p.add(5).index(), usize::MAX);
    }

    #[test]
    #[should_panic(expected = "element offset overflows")]
    fn location_of_far_index_panics() {
        let p = Pointer::<u32>::new(Location::new(4)).add(1usize << 62);
        let _ = p.location();
    }

    #[test]
    fn pointers_are_copy_regardless_of_element() {
        let p = Pointer::<String>::new(Location::new(8));
        let q = p;
        assert_eq!(p, q);
    }
}
