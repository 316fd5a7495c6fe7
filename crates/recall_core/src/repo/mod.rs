//! Storage collaborator for review item collections.
//!
//! # Responsibility
//! - Define the `load_all` / `save_all` / `delete` contract.
//! - Provide SQLite and in-memory implementations.
//!
//! # Invariants
//! - Stores hold whole collections; the engine never calls them directly.

pub mod review_item_repo;
