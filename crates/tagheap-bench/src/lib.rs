//! Benchmark workloads for the tagheap allocator.
//!
//! - [`fragmenting_workload`]: mixed sizes with interleaved frees, the
//!   shape that exercises first-fit search and both coalescing directions.
//! - [`prefilled_arena`]: an arena with many small live blocks, so a
//!   search has to walk a long chain before it finds room.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use tagheap_arena::{ArenaConfig, SelfCheck, TagArena};
use tagheap_core::Location;

/// Capacity used by the reference benchmarks: 64 KiB.
pub const REFERENCE_CAPACITY: usize = 64 * 1024;

/// Element counts cycled through by [`fragmenting_workload`].
pub const WORKLOAD_COUNTS: [usize; 6] = [1, 7, 3, 16, 2, 9];

/// An arena with self-checks disabled so benchmarks time only the
/// allocator itself.
pub fn bench_arena<const N: usize>(elem_size: usize) -> TagArena<N> {
    let config = ArenaConfig::new(elem_size).with_self_check(SelfCheck::Never);
    match TagArena::new(config) {
        Ok(arena) => arena,
        Err(err) => panic!("bench arena of {N} bytes: {err}"),
    }
}

/// Fill an arena with `blocks` single-element allocations, then free
/// every other one. Returns the arena and the locations still live.
pub fn prefilled_arena<const N: usize>(
    elem_size: usize,
    blocks: usize,
) -> (TagArena<N>, Vec<Location>) {
    let mut arena = bench_arena::<N>(elem_size);
    let mut live = Vec::with_capacity(blocks);
    for _ in 0..blocks {
        match arena.allocate(1) {
            Ok(loc) => live.push(loc),
            Err(_) => break,
        }
    }
    let mut kept = Vec::with_capacity(live.len() / 2 + 1);
    for (i, loc) in live.into_iter().enumerate() {
        if i % 2 == 0 {
            arena.deallocate(loc);
        } else {
            kept.push(loc);
        }
    }
    (arena, kept)
}

/// Run `rounds` of allocate-all / free-alternate cycles, then release
/// everything. Even rounds free the live allocations at even positions,
/// odd rounds those at odd positions. Returns the number of successful
/// allocations.
pub fn fragmenting_workload<const N: usize>(arena: &mut TagArena<N>, rounds: usize) -> usize {
    let mut live: Vec<Location> = Vec::new();
    let mut allocated = 0;
    for round in 0..rounds {
        for &count in &WORKLOAD_COUNTS {
            if let Ok(loc) = arena.allocate(count) {
                live.push(loc);
                allocated += 1;
            }
        }
        let mut position = 0;
        live.retain(|&loc| {
            let keep = position % 2 != round % 2;
            position += 1;
            if !keep {
                arena.deallocate(loc);
            }
            keep
        });
    }
    for loc in live {
        arena.deallocate(loc);
    }
    allocated
}
