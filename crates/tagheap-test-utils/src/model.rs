//! A reference model of live allocations.
//!
//! [`ModelHeap`] sits beside an allocator under test and records every
//! location it hands out, in allocation order. Scripts of [`Op`]s pick
//! victims by index into that record, so a script replays identically
//! against any allocator.

use indexmap::IndexMap;
use tagheap_core::{ArenaError, Location, RawAllocator};

/// One scripted step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// Allocate this many elements.
    Alloc(usize),
    /// Free the live allocation at this index (modulo the live count).
    Free(usize),
}

/// What a step did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Allocated(Location),
    Rejected(ArenaError),
    Freed(Location),
    /// A `Free` with nothing live.
    Idle,
}

/// Live allocations keyed by location, valued by requested byte count.
#[derive(Clone, Debug, Default)]
pub struct ModelHeap {
    live: IndexMap<Location, usize>,
}

impl ModelHeap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one step to `alloc` and record its effect.
    ///
    /// # Panics
    ///
    /// Panics if the allocator returns a location that is already live.
    pub fn apply<A: RawAllocator + ?Sized>(&mut self, alloc: &mut A, op: Op) -> Outcome {
        match op {
            Op::Alloc(count) => match alloc.allocate(count) {
                Ok(location) => {
                    let bytes = count * alloc.element_size();
                    if self.live.insert(location, bytes).is_some() {
                        panic!("allocator returned live location {location} twice");
                    }
                    Outcome::Allocated(location)
                }
                Err(err) => Outcome::Rejected(err),
            },
            Op::Free(pick) => {
                if self.live.is_empty() {
                    return Outcome::Idle;
                }
                let index = pick % self.live.len();
                match self.live.swap_remove_index(index) {
                    Some((location, _)) => {
                        alloc.deallocate(location);
                        Outcome::Freed(location)
                    }
                    None => Outcome::Idle,
                }
            }
        }
    }

    /// Apply every step in order.
    pub fn run<A: RawAllocator + ?Sized>(&mut self, alloc: &mut A, ops: &[Op]) -> Vec<Outcome> {
        ops.iter().map(|&op| self.apply(alloc, op)).collect()
    }

    /// Free one specific live allocation. Returns `false` if it is not live.
    pub fn free<A: RawAllocator + ?Sized>(&mut self, alloc: &mut A, location: Location) -> bool {
        if self.live.swap_remove(&location).is_none() {
            return false;
        }
        alloc.deallocate(location);
        true
    }

    /// Free everything still live, oldest first.
    pub fn release_all<A: RawAllocator + ?Sized>(&mut self, alloc: &mut A) {
        for (location, _) in self.live.drain(..) {
            alloc.deallocate(location);
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Sum of requested bytes over live allocations.
    pub fn live_bytes(&self) -> usize {
        self.live.values().sum()
    }

    pub fn locations(&self) -> impl Iterator<Item = Location> + '_ {
        self.live.keys().copied()
    }

    /// Whether the requested byte ranges of live allocations are disjoint.
    pub fn is_disjoint(&self) -> bool {
        let mut spans: Vec<(usize, usize)> = self
            .live
            .iter()
            .map(|(loc, &bytes)| (loc.offset(), loc.offset() + bytes))
            .collect();
        spans.sort_unstable();
        spans.windows(2).all(|pair| pair[0].1 <= pair[1].0)
    }
}

/// A deterministic churn pattern.
///
/// Each round allocates one block per entry of `sizes`, then frees every
/// other live allocation, leaving a growing set of holes for first-fit to
/// reuse.
pub fn churn_script(rounds: usize, sizes: &[usize]) -> Vec<Op> {
    let mut ops = Vec::with_capacity(rounds * sizes.len() * 2);
    for round in 0..rounds {
        ops.extend(sizes.iter().map(|&count| Op::Alloc(count)));
        ops.extend((0..sizes.len()).map(|i| Op::Free(round + 2 * i)));
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bump allocator that never frees; enough to exercise the model.
    struct Bump {
        next: usize,
        capacity: usize,
        freed: Vec<Location>,
    }

    impl RawAllocator for Bump {
        fn allocate(&mut self, count: usize) -> Result<Location, ArenaError> {
            if self.next + count > self.capacity {
                return Err(ArenaError::OutOfSpace {
                    requested: count,
                    largest_free: self.capacity - self.next,
                });
            }
            let loc = Location::new(self.next);
            self.next += count;
            Ok(loc)
        }

        fn deallocate(&mut self, location: Location) {
            self.freed.push(location);
        }

        fn element_size(&self) -> usize {
            1
        }

        fn capacity(&self) -> usize {
            self.capacity
        }

        fn free_bytes(&self) -> usize {
            self.capacity - self.next
        }
    }

    fn bump(capacity: usize) -> Bump {
        Bump {
            next: 0,
            capacity,
            freed: Vec::new(),
        }
    }

    #[test]
    fn records_allocations_in_order() {
        let mut heap = ModelHeap::new();
        let mut alloc = bump(100);
        heap.run(&mut alloc, &[Op::Alloc(10), Op::Alloc(5)]);
        let locs: Vec<_> = heap.locations().collect();
        assert_eq!(locs, vec![Location::new(0), Location::new(10)]);
        assert_eq!(heap.live_bytes(), 15);
        assert!(heap.is_disjoint());
    }

    #[test]
    fn free_picks_modulo_live_count() {
        let mut heap = ModelHeap::new();
        let mut alloc = bump(100);
        let out = heap.run(&mut alloc, &[Op::Alloc(1), Op::Alloc(1), Op::Free(3)]);
        assert_eq!(out[2], Outcome::Freed(Location::new(1)));
        assert_eq!(alloc.freed, vec![Location::new(1)]);
        assert_eq!(heap.live_count(), 1);
    }

    #[test]
    fn free_with_nothing_live_is_idle() {
        let mut heap = ModelHeap::new();
        let mut alloc = bump(10);
        assert_eq!(heap.apply(&mut alloc, Op::Free(0)), Outcome::Idle);
    }

    #[test]
    fn rejection_is_recorded_not_tracked() {
        let mut heap = ModelHeap::new();
        let mut alloc = bump(4);
        let out = heap.apply(&mut alloc, Op::Alloc(8));
        assert!(matches!(out, Outcome::Rejected(ArenaError::OutOfSpace { .. })));
        assert_eq!(heap.live_count(), 0);
    }

    #[test]
    fn free_by_location() {
        let mut heap = ModelHeap::new();
        let mut alloc = bump(10);
        heap.run(&mut alloc, &[Op::Alloc(2), Op::Alloc(3)]);
        assert!(heap.free(&mut alloc, Location::new(2)));
        assert!(!heap.free(&mut alloc, Location::new(2)));
        assert_eq!(alloc.freed, vec![Location::new(2)]);
    }

    #[test]
    fn release_all_empties_model() {
        let mut heap = ModelHeap::new();
        let mut alloc = bump(10);
        heap.run(&mut alloc, &[Op::Alloc(2), Op::Alloc(3)]);
        heap.release_all(&mut alloc);
        assert_eq!(heap.live_count(), 0);
        assert_eq!(alloc.freed.len(), 2);
    }

    #[test]
    fn churn_script_shape() {
        let ops = churn_script(2, &[1, 2]);
        assert_eq!(
            ops,
            vec![
                Op::Alloc(1),
                Op::Alloc(2),
                Op::Free(0),
                Op::Free(2),
                Op::Alloc(1),
                Op::Alloc(2),
                Op::Free(1),
                Op::Free(3),
            ]
        );
    }
}
