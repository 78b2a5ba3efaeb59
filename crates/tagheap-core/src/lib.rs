//! Core types and traits for the tagheap fixed-capacity allocator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the arena and the typed adapter: payload
//! locations, error types, the element byte codec, and the
//! [`RawAllocator`] trait that generic containers program against.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod element;
pub mod error;
pub mod location;
pub mod traits;

pub use element::Element;
pub use error::{ArenaError, InvariantViolation};
pub use location::Location;
pub use traits::RawAllocator;
