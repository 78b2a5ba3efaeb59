//! Tagheap: a fixed-capacity boundary-tag allocator.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! tagheap sub-crates. For most users, adding `tagheap` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tagheap::prelude::*;
//!
//! // 256 bytes of inline storage handing out u32 slots.
//! let mut alloc: Allocator<u32, 256> = Allocator::new().unwrap();
//!
//! let p = alloc.allocate(4).unwrap();
//! for i in 0..4 {
//!     alloc.construct(p.add(i), i as u32 * 3);
//! }
//! assert_eq!(alloc.read(p.add(2)), 6);
//!
//! alloc.deallocate(p);
//! assert!(alloc.arena().validate());
//! assert_eq!(alloc.arena().stats().blocks(), 1);
//! ```
//!
//! The raw arena is available directly when element typing is not wanted:
//!
//! ```rust
//! use tagheap::prelude::*;
//!
//! let mut arena: TagArena<64> = TagArena::with_elem_size(4).unwrap();
//! let a = arena.allocate(2).unwrap();
//! let b = arena.allocate(3).unwrap();
//! arena.deallocate(a);
//! arena.deallocate(b);
//! assert_eq!(arena.stats().blocks(), 1);
//! assert_eq!(arena.free_bytes(), 56);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tagheap-core` | `Location`, errors, `Element`, `RawAllocator` |
//! | [`arena`] | `tagheap-arena` | `TagArena`, tags, block walking, stats, layout |
//! | [`alloc`] | `tagheap-alloc` | Typed `Allocator` and `Pointer` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and errors (`tagheap-core`).
///
/// Contains [`types::Location`], the error enums, the [`types::Element`]
/// codec trait, and the [`types::RawAllocator`] seam.
pub use tagheap_core as types;

/// Boundary-tag arena (`tagheap-arena`).
///
/// [`arena::TagArena`] owns the bytes and performs first-fit allocation,
/// eager coalescing, and validation.
pub use tagheap_arena as arena;

/// Typed allocator adapter (`tagheap-alloc`).
///
/// [`alloc::Allocator`] is what a container holds.
pub use tagheap_alloc as alloc;

/// Common imports for typical tagheap usage.
///
/// ```rust
/// use tagheap::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use tagheap_core::{ArenaError, Element, InvariantViolation, Location, RawAllocator};

    // Arena
    pub use tagheap_arena::{ArenaConfig, ArenaStats, SelfCheck, TagArena};

    // Typed adapter
    pub use tagheap_alloc::{Allocator, Pointer};
}
