//! Domain model for the tag collection hierarchy.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Keep normalization helpers next to the types they protect.
//!
//! # Invariants
//! - Every entity is identified by a stable uuid.
//! - Tag lists are ordered and case-insensitively unique per owner.

pub mod collection;
pub mod tag;
