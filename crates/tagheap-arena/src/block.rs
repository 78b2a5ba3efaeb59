//! Read-only views of the block chain.
//!
//! [`Blocks`] walks the chain left to right the same way the allocator
//! does, yielding a [`BlockInfo`] per block. It stops early rather than
//! panicking if it meets a tag that runs off the end of the buffer, so
//! it is safe to use on a corrupted arena.

use smallvec::SmallVec;
use tagheap_core::Location;

use crate::tag::{Tag, TAG_SIZE};

/// One block of the chain, as seen through its leading tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockInfo {
    /// Offset of the leading tag.
    pub offset: usize,
    /// The leading tag.
    pub tag: Tag,
}

impl BlockInfo {
    /// Whether the block is free.
    pub fn is_free(&self) -> bool {
        self.tag.is_free()
    }

    /// Payload length in bytes.
    pub fn payload_len(&self) -> usize {
        self.tag.payload_len()
    }

    /// Location of the first payload byte.
    pub fn payload(&self) -> Location {
        Location::new(self.offset + TAG_SIZE)
    }

    /// Offset of the trailing tag.
    pub fn trailing_offset(&self) -> usize {
        self.offset + TAG_SIZE + self.tag.payload_len()
    }

    /// Offset one past the trailing tag (the next block's leading tag).
    pub fn end(&self) -> usize {
        self.offset + self.tag.block_len()
    }
}

/// A snapshot of the whole chain. Small arenas stay on the stack.
pub type BlockMap = SmallVec<[BlockInfo; 8]>;

/// Iterator over the blocks of an arena buffer.
pub struct Blocks<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Blocks<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }
}

impl Iterator for Blocks<'_> {
    type Item = BlockInfo;

    fn next(&mut self) -> Option<BlockInfo> {
        if self.offset >= self.bytes.len() {
            return None;
        }
        let tag = Tag::read(self.bytes, self.offset)?;
        let block = BlockInfo {
            offset: self.offset,
            tag,
        };
        if block.end() > self.bytes.len() {
            self.offset = self.bytes.len();
            return None;
        }
        self.offset = block.end();
        Some(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(tags: &[i32], capacity: usize) -> Vec<u8> {
        let mut bytes = vec![0u8; capacity];
        let mut offset = 0;
        for &raw in tags {
            let tag = Tag::from_raw(raw);
            assert!(tag.write(&mut bytes, offset));
            assert!(tag.write(&mut bytes, offset + TAG_SIZE + tag.payload_len()));
            offset += tag.block_len();
        }
        bytes
    }

    #[test]
    fn walks_every_block_in_order() {
        let bytes = chain(&[-4, 4, -8], 40);
        let blocks: Vec<_> = Blocks::new(&bytes).collect();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].offset, 0);
        assert_eq!(blocks[1].offset, 12);
        assert_eq!(blocks[2].offset, 24);
        assert!(blocks[1].is_free());
        assert_eq!(blocks[2].payload(), Location::new(28));
        assert_eq!(blocks[2].end(), 40);
    }

    #[test]
    fn trailing_offset_points_at_last_word() {
        let block = BlockInfo {
            offset: 12,
            tag: Tag::in_use(8),
        };
        assert_eq!(block.trailing_offset(), 24);
        assert_eq!(block.end(), 28);
    }

    #[test]
    fn stops_at_overrunning_tag() {
        let mut bytes = vec![0u8; 24];
        assert!(Tag::free(100).write(&mut bytes, 0));
        assert_eq!(Blocks::new(&bytes).count(), 0);
    }
}
