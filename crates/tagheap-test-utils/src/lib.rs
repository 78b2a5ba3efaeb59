//! Test utilities and reference models for tagheap development.
//!
//! Provides layout assertions for [`TagArena`](tagheap_arena::TagArena)
//! ([`fixtures`]) and a [`ModelHeap`] that drives any
//! [`RawAllocator`](tagheap_core::RawAllocator) through scripted
//! operations while tracking which allocations are live.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod model;

pub use fixtures::{assert_consistent, assert_layout, strict_arena, tags};
pub use model::{churn_script, ModelHeap, Op, Outcome};
