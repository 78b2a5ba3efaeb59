//! Boundary-tag first-fit arena over a fixed inline byte buffer.
//!
//! The arena never allocates from the system. A [`TagArena`] carries
//! its `N`-byte buffer inline and keeps all bookkeeping inside it as
//! sign-encoded boundary tags.
//!
//! # Layout
//!
//! ```text
//! offset 0                                                       N
//! ├─[-8][ payload 8 ][-8]─[20][ free 20 ][20]─[-4][ p 4 ][-4]────┤
//!   in use                 free                 in use
//! ```
//!
//! - A block is a leading tag, `|tag|` payload bytes, and a trailing tag
//!   equal to the leading one.
//! - Non-negative tags are free, negative tags are in use.
//! - Blocks tile the buffer with no gaps; no two free blocks touch.
//!
//! # Operations
//!
//! - **Allocate:** first-fit scan from offset 0; split when the remainder
//!   holds at least one element plus a tag pair, else take the block whole.
//! - **Deallocate:** flip the tag pair to free, then merge with a free left
//!   neighbour and a free right neighbour.
//! - **Validate:** O(n) walk confirming every tag pair matches. Runs after
//!   each mutation according to [`SelfCheck`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod block;
pub mod config;
pub mod layout;
pub mod stats;
pub mod tag;

// Public re-exports for the primary API surface.
pub use arena::TagArena;
pub use block::{BlockInfo, BlockMap, Blocks};
pub use config::{ArenaConfig, SelfCheck};
pub use layout::Layout;
pub use stats::ArenaStats;
pub use tag::{Tag, TAG_SIZE};
pub use tagheap_core::{ArenaError, InvariantViolation, Location, RawAllocator};
