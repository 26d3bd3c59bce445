//! Use-case services over the collection store.
//!
//! # Responsibility
//! - Translate shell actions into validated collection mutations.
//! - Keep persistence and selection maintenance out of the UI layer.

pub mod collection_service;
