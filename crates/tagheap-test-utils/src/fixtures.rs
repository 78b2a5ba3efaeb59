//! Reusable arena fixtures and layout assertions.

use tagheap_arena::{ArenaConfig, SelfCheck, TagArena};

/// An arena that validates itself after every mutation, in any build.
pub fn strict_arena<const N: usize>(elem_size: usize) -> TagArena<N> {
    let config = ArenaConfig::new(elem_size).with_self_check(SelfCheck::Always);
    match TagArena::new(config) {
        Ok(arena) => arena,
        Err(err) => panic!("strict_arena::<{N}>({elem_size}): {err}"),
    }
}

/// Raw leading-tag values of every block, left to right.
pub fn tags<const N: usize>(arena: &TagArena<N>) -> Vec<i32> {
    arena.blocks().map(|b| b.tag.raw()).collect()
}

/// Assert the block chain matches `expected` raw tag values.
#[track_caller]
pub fn assert_layout<const N: usize>(arena: &TagArena<N>, expected: &[i32]) {
    let actual = tags(arena);
    assert_eq!(
        actual,
        expected,
        "unexpected layout: {}",
        arena.layout()
    );
}

/// Assert every structural invariant holds and all bytes are accounted for.
#[track_caller]
pub fn assert_consistent<const N: usize>(arena: &TagArena<N>) {
    if let Err(violation) = arena.check_invariants() {
        panic!("{violation}: {}", arena.layout());
    }
    let stats = arena.stats();
    assert_eq!(
        stats.accounted_bytes(),
        N,
        "blocks do not tile the arena: {}",
        arena.layout()
    );
}
