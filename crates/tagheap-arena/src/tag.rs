//! Boundary tags: the sign-encoded words that delimit every block.
//!
//! A tag is an `i32` stored in native byte order. Its magnitude is the
//! payload length of the block it delimits; its sign is the status
//! (non-negative = free, negative = in use). Every block carries the
//! same tag at both ends.

use std::fmt;
use std::mem::size_of;

/// Width of a tag word in bytes.
pub const TAG_SIZE: usize = size_of::<i32>();

/// A block's status and payload length packed into one signed word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tag(i32);

impl Tag {
    /// Tag for a free block with `payload` bytes.
    ///
    /// Callers guarantee `payload <= i32::MAX`; the arena enforces this
    /// by bounding its capacity at construction.
    pub fn free(payload: usize) -> Self {
        debug_assert!(payload <= i32::MAX as usize);
        Self(payload as i32)
    }

    /// Tag for an in-use block with `payload` bytes.
    pub fn in_use(payload: usize) -> Self {
        debug_assert!(payload <= i32::MAX as usize);
        Self(-(payload as i32))
    }

    /// Wrap a raw tag word.
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// The raw tag word.
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Whether the block is free.
    pub const fn is_free(self) -> bool {
        self.0 >= 0
    }

    /// Whether the block is in use.
    pub const fn is_in_use(self) -> bool {
        self.0 < 0
    }

    /// Payload length in bytes.
    pub const fn payload_len(self) -> usize {
        self.0.unsigned_abs() as usize
    }

    /// Total block length: payload plus both tags.
    pub const fn block_len(self) -> usize {
        self.payload_len() + 2 * TAG_SIZE
    }

    /// Same payload length, opposite status.
    pub const fn toggled(self) -> Self {
        Self(-self.0)
    }

    /// Decode the tag stored at `offset` in `bytes`.
    ///
    /// Returns `None` if the word would extend past the buffer.
    pub fn read(bytes: &[u8], offset: usize) -> Option<Self> {
        let word = bytes.get(offset..offset.checked_add(TAG_SIZE)?)?;
        let mut raw = [0u8; TAG_SIZE];
        raw.copy_from_slice(word);
        Some(Self(i32::from_ne_bytes(raw)))
    }

    /// Encode this tag at `offset` in `bytes`.
    ///
    /// Returns `false`, leaving the buffer untouched, if the word would
    /// extend past the buffer.
    #[must_use]
    pub fn write(self, bytes: &mut [u8], offset: usize) -> bool {
        let Some(end) = offset.checked_add(TAG_SIZE) else {
            return false;
        };
        match bytes.get_mut(offset..end) {
            Some(word) => {
                word.copy_from_slice(&self.0.to_ne_bytes());
                true
            }
            None => false,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_encodes_status() {
        assert!(Tag::free(16).is_free());
        assert!(Tag::in_use(16).is_in_use());
        assert_eq!(Tag::in_use(16).raw(), -16);
        assert_eq!(Tag::in_use(16).payload_len(), 16);
    }

    #[test]
    fn zero_payload_reads_as_free() {
        assert!(Tag::from_raw(0).is_free());
        assert_eq!(Tag::free(0).block_len(), 2 * TAG_SIZE);
    }

    #[test]
    fn toggle_flips_status_only() {
        let t = Tag::free(12).toggled();
        assert_eq!(t, Tag::in_use(12));
        assert_eq!(t.toggled(), Tag::free(12));
    }

    #[test]
    fn write_then_read_at_offset() {
        let mut buf = [0u8; 12];
        assert!(Tag::in_use(4).write(&mut buf, 8));
        assert_eq!(Tag::read(&buf, 8), Some(Tag::in_use(4)));
        assert_eq!(&buf[..8], &[0u8; 8]);
    }

    #[test]
    fn out_of_bounds_access_is_rejected() {
        let mut buf = [0u8; 6];
        assert_eq!(Tag::read(&buf, 3), None);
        assert_eq!(Tag::read(&buf, usize::MAX), None);
        assert!(!Tag::free(1).write(&mut buf, 4));
        assert_eq!(buf, [0u8; 6]);
    }
}
