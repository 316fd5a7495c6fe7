//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store snapshots through the scheduling engine.
//! - Keep CLI and other front ends decoupled from storage details.

pub mod review_service;
