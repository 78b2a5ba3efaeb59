//! The boundary-tag arena.
//!
//! [`TagArena`] owns a fixed inline byte buffer and interprets it as a
//! contiguous chain of blocks. Every block is `[tag][payload][tag]`,
//! with both tags equal; the chain tiles the buffer exactly from offset
//! 0 to `N`. There is no side table: all bookkeeping lives in the tags.
//!
//! Allocation is first-fit from offset 0. A qualifying free block is
//! split when the leftover can still hold one element plus its own tag
//! pair; otherwise it is handed out whole. Deallocation flips the tag
//! pair back to free and immediately merges with free neighbours, so two
//! free blocks are never adjacent between operations.

use std::fmt;
use std::ops::Range;

use tagheap_core::{ArenaError, InvariantViolation, Location, RawAllocator};
use tracing::{debug, trace};

use crate::block::{BlockInfo, BlockMap, Blocks};
use crate::config::ArenaConfig;
use crate::layout::Layout;
use crate::stats::ArenaStats;
use crate::tag::{Tag, TAG_SIZE};

/// A fixed-capacity first-fit allocator over `N` bytes of inline storage.
///
/// The arena never asks the system for memory; its whole state is the
/// `[u8; N]` buffer it carries. It is single-threaded by construction:
/// every mutating operation takes `&mut self`.
#[derive(Clone)]
pub struct TagArena<const N: usize> {
    bytes: [u8; N],
    config: ArenaConfig,
}

impl<const N: usize> TagArena<N> {
    /// Create an arena holding one free block that spans the whole buffer.
    ///
    /// Fails if the config is invalid for a capacity of `N` bytes.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate(N)?;
        let mut arena = Self {
            bytes: [0; N],
            config,
        };
        let whole = Tag::free(N - 2 * TAG_SIZE);
        arena.put(0, whole);
        arena.put(N - TAG_SIZE, whole);
        arena.self_check();
        Ok(arena)
    }

    /// Shorthand for [`TagArena::new`] with default settings and the
    /// given element size.
    pub fn with_elem_size(elem_size: usize) -> Result<Self, ArenaError> {
        Self::new(ArenaConfig::new(elem_size))
    }

    /// Buffer capacity in bytes.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// The arena's configuration.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Reserve storage for `count` elements.
    ///
    /// Scans blocks from offset 0 and takes the first free block whose
    /// payload is at least the requested bytes plus one tag pair. On
    /// failure no byte of the arena changes.
    pub fn allocate(&mut self, count: usize) -> Result<Location, ArenaError> {
        if count == 0 {
            return Err(ArenaError::ZeroSizedRequest);
        }
        let elem_size = self.config.elem_size;
        let requested = count.saturating_mul(elem_size);
        let needed = count
            .checked_mul(elem_size)
            .and_then(|bytes| bytes.checked_add(2 * TAG_SIZE));

        let mut largest_free = 0;
        if let Some(needed) = needed {
            let mut offset = 0;
            while offset < N {
                let tag = self.tag(offset);
                if tag.is_free() {
                    let payload = tag.payload_len();
                    if payload >= needed {
                        // A leftover of exactly one minimal block is still split off.
                        let location = if payload - requested >= self.config.min_block() {
                            self.split(offset, payload, requested)
                        } else {
                            self.take_whole(offset, tag)
                        };
                        self.self_check();
                        return Ok(location);
                    }
                    largest_free = largest_free.max(payload);
                }
                offset += tag.block_len();
            }
        } else {
            largest_free = self.stats().largest_free;
        }

        debug!(requested, largest_free, capacity = N, "arena out of space");
        Err(ArenaError::OutOfSpace {
            requested,
            largest_free,
        })
    }

    /// Release the block whose payload starts at `location`.
    ///
    /// Merges the freed block with a free left neighbour and a free right
    /// neighbour, in that order.
    ///
    /// # Panics
    ///
    /// Panics if the block at `location` is not in use (for example, a
    /// double free) or if `location` lies outside the arena. Other
    /// locations not returned by [`allocate`](Self::allocate) are a
    /// contract violation with unspecified results; the self-check, when
    /// enabled, turns the resulting corruption into a panic.
    pub fn deallocate(&mut self, location: Location) {
        let Some(mut lead) = location.offset().checked_sub(TAG_SIZE) else {
            panic!("deallocate {location}: no leading tag before offset");
        };
        let tag = self.tag(lead);
        assert!(
            tag.is_in_use(),
            "deallocate {location}: block is not in use (tag {tag})"
        );
        let freed = tag.toggled();
        let trail = lead + TAG_SIZE + freed.payload_len();
        debug_assert_eq!(
            self.tag(trail),
            tag,
            "trailing tag of block at {lead} disagrees with leading tag"
        );
        self.put(lead, freed);
        self.put(trail, freed);

        let mut merges = 0u8;
        if lead > 0 {
            let left_trail = lead - TAG_SIZE;
            if self.tag(left_trail).is_free() {
                lead = self.coalesce(left_trail, lead);
                merges += 1;
            }
        }
        let right_lead = trail + TAG_SIZE;
        if right_lead < N && self.tag(right_lead).is_free() {
            self.coalesce(trail, right_lead);
            merges += 1;
        }

        trace!(
            offset = location.offset(),
            bytes = freed.payload_len(),
            merged_block = lead,
            merges,
            "deallocated block"
        );
        self.self_check();
    }

    /// Walk the chain and confirm every block's leading and trailing tags
    /// agree and that the blocks tile the buffer exactly.
    pub fn validate(&self) -> bool {
        self.walk(false).is_ok()
    }

    /// Like [`validate`](Self::validate), additionally rejecting adjacent
    /// free blocks, and reporting the first defect found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.walk(true)
    }

    /// Read the tag word at any byte offset.
    ///
    /// Offsets that are not block boundaries yield whatever payload
    /// bytes happen to sit there.
    pub fn tag_at(&self, offset: usize) -> Option<Tag> {
        Tag::read(&self.bytes, offset)
    }

    /// Iterate over the block chain from offset 0.
    pub fn blocks(&self) -> Blocks<'_> {
        Blocks::new(&self.bytes)
    }

    /// Collect the block chain.
    pub fn block_map(&self) -> BlockMap {
        self.blocks().collect()
    }

    /// Occupancy summary.
    pub fn stats(&self) -> ArenaStats {
        ArenaStats::from_blocks(self.blocks(), N)
    }

    /// Payload bytes currently available across all free blocks.
    pub fn free_bytes(&self) -> usize {
        self.blocks()
            .filter(BlockInfo::is_free)
            .map(|b| b.payload_len())
            .sum()
    }

    /// Printable rendering of the chain, one `.` per payload byte.
    pub fn layout(&self) -> Layout<'_> {
        Layout::new(&self.bytes)
    }

    /// The full payload of the in-use block starting at `location`.
    ///
    /// Returns `None` if `location` does not follow an in-use tag.
    pub fn payload(&self, location: Location) -> Option<&[u8]> {
        let range = self.live_range(location)?;
        self.bytes.get(range)
    }

    /// Mutable access to the payload of the in-use block at `location`.
    pub fn payload_mut(&mut self, location: Location) -> Option<&mut [u8]> {
        let range = self.live_range(location)?;
        self.bytes.get_mut(range)
    }

    fn live_range(&self, location: Location) -> Option<Range<usize>> {
        let lead = location.offset().checked_sub(TAG_SIZE)?;
        let tag = self.tag_at(lead)?;
        if !tag.is_in_use() {
            return None;
        }
        let start = location.offset();
        Some(start..start + tag.payload_len())
    }

    /// Carve `requested` bytes off the low end of the free block at
    /// `offset`, leaving the rest as a new free block.
    fn split(&mut self, offset: usize, payload: usize, requested: usize) -> Location {
        let used = Tag::in_use(requested);
        self.put(offset, used);
        self.put(offset + TAG_SIZE + requested, used);

        let rest_lead = offset + used.block_len();
        let rest = Tag::free(payload - requested - 2 * TAG_SIZE);
        self.put(rest_lead, rest);
        self.put(rest_lead + TAG_SIZE + rest.payload_len(), rest);

        trace!(
            offset = offset + TAG_SIZE,
            bytes = requested,
            remainder = rest.payload_len(),
            "allocated split block"
        );
        Location::new(offset + TAG_SIZE)
    }

    /// Mark the whole free block at `offset` in use without resizing it.
    fn take_whole(&mut self, offset: usize, tag: Tag) -> Location {
        let used = tag.toggled();
        self.put(offset, used);
        self.put(offset + TAG_SIZE + used.payload_len(), used);
        trace!(
            offset = offset + TAG_SIZE,
            bytes = used.payload_len(),
            "allocated whole block"
        );
        Location::new(offset + TAG_SIZE)
    }

    /// Merge two adjacent free blocks, given the left block's trailing tag
    /// and the right block's leading tag. Returns the merged block's
    /// leading-tag offset.
    fn coalesce(&mut self, left_trail: usize, right_lead: usize) -> usize {
        let left = self.tag(left_trail);
        let right = self.tag(right_lead);
        debug_assert!(left.is_free() && right.is_free());
        debug_assert_eq!(left_trail + TAG_SIZE, right_lead);

        let merged = Tag::free(left.payload_len() + right.payload_len() + 2 * TAG_SIZE);
        let lead = left_trail - TAG_SIZE - left.payload_len();
        let trail = right_lead + TAG_SIZE + right.payload_len();
        debug_assert_eq!(trail, lead + TAG_SIZE + merged.payload_len());

        self.put(lead, merged);
        self.put(trail, merged);
        lead
    }

    fn walk(&self, reject_adjacent_free: bool) -> Result<(), InvariantViolation> {
        let mut offset = 0;
        let mut prev_free = None;
        while offset < N {
            let Some(leading) = self.tag_at(offset) else {
                return Err(InvariantViolation::Truncated {
                    offset,
                    capacity: N,
                });
            };
            let block = BlockInfo {
                offset,
                tag: leading,
            };
            if block.end() > N {
                return Err(InvariantViolation::Overrun {
                    offset,
                    tag: leading.raw(),
                    capacity: N,
                });
            }
            let trailing = self.tag(block.trailing_offset());
            if trailing != leading {
                return Err(InvariantViolation::TagMismatch {
                    offset,
                    leading: leading.raw(),
                    trailing: trailing.raw(),
                });
            }
            if reject_adjacent_free && leading.is_free() {
                if let Some(left) = prev_free {
                    return Err(InvariantViolation::AdjacentFree {
                        left,
                        right: offset,
                    });
                }
            }
            prev_free = leading.is_free().then_some(offset);
            offset = block.end();
        }
        Ok(())
    }

    fn self_check(&self) {
        if !self.config.self_check.enabled() {
            return;
        }
        if let Err(violation) = self.check_invariants() {
            panic!("arena invariant violated: {violation}\n{}", self.layout());
        }
    }

    fn tag(&self, offset: usize) -> Tag {
        match self.tag_at(offset) {
            Some(tag) => tag,
            None => panic!("tag read at {offset} outside arena of {N} bytes"),
        }
    }

    fn put(&mut self, offset: usize, tag: Tag) {
        let written = tag.write(&mut self.bytes, offset);
        assert!(written, "tag write at {offset} outside arena of {N} bytes");
    }
}

impl<const N: usize> RawAllocator for TagArena<N> {
    fn allocate(&mut self, count: usize) -> Result<Location, ArenaError> {
        TagArena::allocate(self, count)
    }

    fn deallocate(&mut self, location: Location) {
        TagArena::deallocate(self, location);
    }

    fn element_size(&self) -> usize {
        self.config.elem_size
    }

    fn capacity(&self) -> usize {
        N
    }

    fn free_bytes(&self) -> usize {
        TagArena::free_bytes(self)
    }
}

impl<const N: usize> fmt::Debug for TagArena<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagArena")
            .field("capacity", &N)
            .field("config", &self.config)
            .field("blocks", &self.block_map())
            .finish()
    }
}
