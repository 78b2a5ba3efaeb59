//! Typed allocator adapter over a tagheap arena.
//!
//! [`Allocator<T, N>`](Allocator) is what a container holds: it sizes
//! requests in elements of `T`, hands out typed [`Pointer`]s, and moves
//! values in and out of arena payloads through the [`Element`] codec.
//! All block bookkeeping is delegated to [`TagArena`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod allocator;
pub mod pointer;

pub use allocator::Allocator;
pub use pointer::Pointer;
pub use tagheap_arena::{SelfCheck, TagArena};
pub use tagheap_core::{ArenaError, Element};
