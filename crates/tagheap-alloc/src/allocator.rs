//! The typed allocator a container holds.
//!
//! Each [`Allocator`] owns its own [`TagArena`]. Equality between two
//! allocators of the same type is unconditionally `true`, following the
//! container convention that any instance may release memory obtained
//! from any other. With one arena per instance that only holds if memory
//! is never actually released through a different instance; doing so is
//! a contract violation.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Range;

use tagheap_arena::{ArenaConfig, SelfCheck, TagArena, TAG_SIZE};
use tagheap_core::{ArenaError, Element};
use tracing::trace;

use crate::pointer::Pointer;

/// Allocates storage for elements of `T` from `N` bytes of inline memory.
pub struct Allocator<T, const N: usize> {
    arena: TagArena<N>,
    _element: PhantomData<fn() -> T>,
}

impl<T: Element, const N: usize> Allocator<T, N> {
    /// Create an allocator with the default self-check policy.
    pub fn new() -> Result<Self, ArenaError> {
        Self::with_self_check(SelfCheck::default())
    }

    /// Create an allocator with an explicit self-check policy.
    pub fn with_self_check(self_check: SelfCheck) -> Result<Self, ArenaError> {
        let config = ArenaConfig::new(T::SIZE).with_self_check(self_check);
        Ok(Self {
            arena: TagArena::new(config)?,
            _element: PhantomData,
        })
    }

    /// Reserve storage for `count` elements of `T`.
    pub fn allocate(&mut self, count: usize) -> Result<Pointer<T>, ArenaError> {
        let base = self.arena.allocate(count)?;
        trace!(element = type_name::<T>(), count, %base, "typed allocation");
        Ok(Pointer::new(base))
    }

    /// Release the allocation `pointer` belongs to.
    ///
    /// The element count is recovered from the arena's tags. Values still
    /// stored in the allocation are discarded without being destroyed.
    ///
    /// # Panics
    ///
    /// Panics if the allocation has already been released.
    pub fn deallocate(&mut self, pointer: Pointer<T>) {
        self.arena.deallocate(pointer.base());
    }

    /// Store `value` in the slot `pointer` addresses.
    ///
    /// # Panics
    ///
    /// Panics if the allocation is not live or the slot lies outside it.
    pub fn construct(&mut self, pointer: Pointer<T>, value: T) {
        value.encode(self.slot_mut(pointer));
    }

    /// Move the value out of the slot `pointer` addresses.
    ///
    /// The slot keeps its bytes; it should be constructed again before
    /// being read.
    ///
    /// # Panics
    ///
    /// Panics if the allocation is not live or the slot lies outside it.
    pub fn destroy(&mut self, pointer: Pointer<T>) -> T {
        T::decode(self.slot(pointer))
    }

    /// Read a copy of the value in the slot `pointer` addresses.
    ///
    /// # Panics
    ///
    /// Panics if the allocation is not live or the slot lies outside it.
    pub fn read(&self, pointer: Pointer<T>) -> T {
        T::decode(self.slot(pointer))
    }

    /// Number of `T` slots the allocation behind `pointer` can hold.
    ///
    /// May exceed the requested count when the block was handed out whole.
    /// Returns `None` if the allocation is not live.
    pub fn slots(&self, pointer: Pointer<T>) -> Option<usize> {
        self.arena
            .payload(pointer.base())
            .map(|payload| payload.len() / T::SIZE)
    }

    /// Largest element count a single request can ever satisfy.
    ///
    /// A free block must exceed the request by a tag pair, so on a fresh
    /// arena this is `(N - 4 * TAG_SIZE) / size_of(T)`.
    pub fn max_size(&self) -> usize {
        N.saturating_sub(4 * TAG_SIZE) / T::SIZE
    }

    /// The underlying arena.
    pub fn arena(&self) -> &TagArena<N> {
        &self.arena
    }

    fn slot(&self, pointer: Pointer<T>) -> &[u8] {
        let Some(payload) = self.arena.payload(pointer.base()) else {
            panic!("{pointer:?}: allocation is not live");
        };
        let slots = payload.len() / T::SIZE;
        match slot_range::<T>(pointer).and_then(|range| payload.get(range)) {
            Some(slot) => slot,
            None => panic!("{pointer:?}: index out of bounds for {slots} slots"),
        }
    }

    fn slot_mut(&mut self, pointer: Pointer<T>) -> &mut [u8] {
        let Some(payload) = self.arena.payload_mut(pointer.base()) else {
            panic!("{pointer:?}: allocation is not live");
        };
        let slots = payload.len() / T::SIZE;
        match slot_range::<T>(pointer).and_then(move |range| payload.get_mut(range)) {
            Some(slot) => slot,
            None => panic!("{pointer:?}: index out of bounds for {slots} slots"),
        }
    }
}

/// Byte range of the slot `pointer` addresses, relative to the payload.
/// `None` when the range is not representable.
fn slot_range<T: Element>(pointer: Pointer<T>) -> Option<Range<usize>> {
    let start = pointer.index().checked_mul(T::SIZE)?;
    let end = start.checked_add(T::SIZE)?;
    Some(start..end)
}

impl<T, const N: usize> PartialEq for Allocator<T, N> {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl<T, const N: usize> Eq for Allocator<T, N> {}

impl<T, const N: usize> Clone for Allocator<T, N> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            _element: PhantomData,
        }
    }
}

impl<T, const N: usize> fmt::Debug for Allocator<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Allocator")
            .field("element", &type_name::<T>())
            .field("arena", &self.arena)
            .finish()
    }
}
