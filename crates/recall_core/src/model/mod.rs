//! Domain model for memorized passages and their review state.
//!
//! # Responsibility
//! - Define the value types shared by scheduling, storage and callers.
//! - Validate passage ranges against section reference data.
//!
//! # Invariants
//! - Every review item is identified by a stable `ReviewItemId`.
//! - A passage range is only constructed after validation.

pub mod catalog;
pub mod passage;
pub mod review_item;
