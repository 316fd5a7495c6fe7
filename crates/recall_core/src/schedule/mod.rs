//! Spaced-review scheduling engine.
//!
//! # Responsibility
//! - Compute intervals and review dates from a fixed policy.
//! - Advance single items and classify whole collections.
//!
//! # Invariants
//! - The engine owns no state; every call maps caller values to new values.
//! - No function reads the wall clock; `today` is always a parameter.

pub mod lifecycle;
pub mod policy;
pub mod review_set;
