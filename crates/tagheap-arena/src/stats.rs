//! Occupancy statistics.

use crate::block::BlockInfo;
use crate::tag::TAG_SIZE;

/// A point-in-time summary of an arena's blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Buffer capacity in bytes.
    pub capacity: usize,
    /// Number of free blocks.
    pub free_blocks: usize,
    /// Number of in-use blocks.
    pub used_blocks: usize,
    /// Sum of free payload bytes.
    pub free_bytes: usize,
    /// Sum of in-use payload bytes, including whole-block slack.
    pub used_bytes: usize,
    /// Largest single free payload.
    pub largest_free: usize,
}

impl ArenaStats {
    pub(crate) fn from_blocks(blocks: impl Iterator<Item = BlockInfo>, capacity: usize) -> Self {
        let mut stats = Self {
            capacity,
            ..Self::default()
        };
        for block in blocks {
            if block.is_free() {
                stats.free_blocks += 1;
                stats.free_bytes += block.payload_len();
                stats.largest_free = stats.largest_free.max(block.payload_len());
            } else {
                stats.used_blocks += 1;
                stats.used_bytes += block.payload_len();
            }
        }
        stats
    }

    /// Total number of blocks.
    pub fn blocks(&self) -> usize {
        self.free_blocks + self.used_blocks
    }

    /// Bytes spent on tags.
    pub fn tag_bytes(&self) -> usize {
        self.blocks() * 2 * TAG_SIZE
    }

    /// Bytes accounted for by all blocks. Equals `capacity` on a
    /// consistent arena.
    pub fn accounted_bytes(&self) -> usize {
        self.free_bytes + self.used_bytes + self.tag_bytes()
    }

    /// Share of free payload not in the largest free block, in `[0, 1]`.
    ///
    /// Zero when there is at most one free block.
    pub fn fragmentation(&self) -> f64 {
        if self.free_bytes == 0 {
            return 0.0;
        }
        1.0 - self.largest_free as f64 / self.free_bytes as f64
    }
}

#[cfg(test)]
mod tests {
    use crate::{ArenaConfig, TagArena};

    #[test]
    fn fresh_arena_stats() {
        let arena = TagArena::<64>::new(ArenaConfig::new(4)).unwrap();
        let stats = arena.stats();
        assert_eq!(stats.blocks(), 1);
        assert_eq!(stats.free_bytes, 56);
        assert_eq!(stats.largest_free, 56);
        assert_eq!(stats.accounted_bytes(), 64);
        assert_eq!(stats.fragmentation(), 0.0);
    }

    #[test]
    fn stats_track_holes() {
        let mut arena = TagArena::<64>::new(ArenaConfig::new(4)).unwrap();
        let a = arena.allocate(2).unwrap();
        let _b = arena.allocate(1).unwrap();
        arena.deallocate(a);
        // [8][-4][28]
        let stats = arena.stats();
        assert_eq!(stats.free_blocks, 2);
        assert_eq!(stats.used_blocks, 1);
        assert_eq!(stats.free_bytes, 36);
        assert_eq!(stats.used_bytes, 4);
        assert_eq!(stats.largest_free, 28);
        assert_eq!(stats.tag_bytes(), 24);
        assert_eq!(stats.accounted_bytes(), 64);
        assert!((stats.fragmentation() - 8.0 / 36.0).abs() < 1e-12);
    }

    #[test]
    fn full_arena_has_no_fragmentation() {
        let mut arena = TagArena::<24>::new(ArenaConfig::new(4)).unwrap();
        let _a = arena.allocate(2).unwrap();
        let stats = arena.stats();
        assert_eq!(stats.free_bytes, 0);
        assert_eq!(stats.fragmentation(), 0.0);
    }
}
