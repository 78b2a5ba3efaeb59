//! Human-readable rendering of the block chain.
//!
//! Each block prints as `[lead][....][trail]` with one `.` per payload
//! byte, blocks concatenated left to right. Printing the trailing tag as
//! stored (rather than echoing the leading one) makes a mismatched pair
//! visible at a glance.

use std::fmt;

use crate::block::Blocks;
use crate::tag::Tag;

/// Borrowed view of an arena that renders its layout via `Display`.
pub struct Layout<'a> {
    bytes: &'a [u8],
}

impl<'a> Layout<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }
}

impl fmt::Display for Layout<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in Blocks::new(self.bytes) {
            write!(f, "[{}][{:.<width$}]", block.tag, "", width = block.payload_len())?;
            match Tag::read(self.bytes, block.trailing_offset()) {
                Some(trail) => write!(f, "[{trail}]")?,
                None => f.write_str("[?]")?,
            }
        }
        Ok(())
    }
}
