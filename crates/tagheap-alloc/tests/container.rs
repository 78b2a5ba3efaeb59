//! Integration test: a growable container backed by the typed allocator.
//!
//! `FixedVec` grows the way a standard vector does: allocate a larger
//! block, move elements across with construct/destroy, release the old
//! block. The arena must stay consistent throughout and be fully
//! reclaimed when the container is emptied.

use tagheap_alloc::{Allocator, ArenaError, Element, Pointer, SelfCheck};
use tagheap_test_utils::{assert_consistent, assert_layout};

struct FixedVec<T: Element, const N: usize> {
    alloc: Allocator<T, N>,
    buf: Option<Pointer<T>>,
    len: usize,
    cap: usize,
}

impl<T: Element, const N: usize> FixedVec<T, N> {
    fn new() -> Self {
        Self {
            alloc: Allocator::with_self_check(SelfCheck::Always).unwrap(),
            buf: None,
            len: 0,
            cap: 0,
        }
    }

    fn push(&mut self, value: T) -> Result<(), ArenaError> {
        if self.len == self.cap {
            self.grow()?;
        }
        let buf = self.buf.expect("grown buffer");
        self.alloc.construct(buf.add(self.len), value);
        self.len += 1;
        Ok(())
    }

    fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let buf = self.buf?;
        Some(self.alloc.destroy(buf.add(self.len)))
    }

    fn get(&self, index: usize) -> Option<T> {
        if index >= self.len {
            return None;
        }
        Some(self.alloc.read(self.buf?.add(index)))
    }

    fn grow(&mut self) -> Result<(), ArenaError> {
        let wanted = (self.cap * 2).max(1);
        let next = self.alloc.allocate(wanted)?;
        if let Some(old) = self.buf {
            for i in 0..self.len {
                let value = self.alloc.destroy(old.add(i));
                self.alloc.construct(next.add(i), value);
            }
            self.alloc.deallocate(old);
        }
        self.cap = self.alloc.slots(next).unwrap_or(wanted);
        self.buf = Some(next);
        Ok(())
    }

    fn clear(&mut self) {
        while self.pop().is_some() {}
        if let Some(buf) = self.buf.take() {
            self.alloc.deallocate(buf);
        }
        self.cap = 0;
    }
}

#[test]
fn push_and_read_back() {
    let mut v: FixedVec<u32, 1024> = FixedVec::new();
    for i in 0..40 {
        v.push(i * i).unwrap();
    }
    for i in 0..40 {
        assert_eq!(v.get(i as usize), Some(i * i));
    }
    assert_eq!(v.get(40), None);
    assert_consistent(v.alloc.arena());
}

#[test]
fn growth_stops_at_capacity_without_corruption() {
    let mut v: FixedVec<u64, 256> = FixedVec::new();
    let mut pushed = 0u64;
    let err = loop {
        match v.push(pushed) {
            Ok(()) => pushed += 1,
            Err(err) => break err,
        }
    };
    assert!(matches!(err, ArenaError::OutOfSpace { .. }));
    assert_consistent(v.alloc.arena());
    for i in 0..pushed {
        assert_eq!(v.get(i as usize), Some(i));
    }
}

#[test]
fn pop_returns_values_in_reverse() {
    let mut v: FixedVec<i16, 128> = FixedVec::new();
    for x in [3, -1, 4, -1, 5] {
        v.push(x).unwrap();
    }
    let popped: Vec<i16> = std::iter::from_fn(|| v.pop()).collect();
    assert_eq!(popped, vec![5, -1, 4, -1, 3]);
}

#[test]
fn clear_reclaims_whole_arena() {
    let mut v: FixedVec<f32, 512> = FixedVec::new();
    for i in 0..30 {
        v.push(i as f32 * 0.5).unwrap();
    }
    v.clear();
    assert_layout(v.alloc.arena(), &[504]);
}

#[test]
fn two_containers_use_independent_arenas() {
    let mut a: FixedVec<u8, 64> = FixedVec::new();
    let mut b: FixedVec<u8, 64> = FixedVec::new();
    a.push(1).unwrap();
    b.push(2).unwrap();
    assert_eq!(a.alloc, b.alloc);
    assert_eq!(a.get(0), Some(1));
    assert_eq!(b.get(0), Some(2));
}
