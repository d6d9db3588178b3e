//! Franchise domain model.
//!
//! # Responsibility
//! - Define the franchise/branch/product document persisted as one unit.
//! - Define inbound request shapes and their validation rules.
//!
//! # Invariants
//! - Every name in the tree is non-blank.
//! - Product stock is never negative.

pub mod franchise;
pub mod request;
pub mod validation;
