//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the document-store contract consumed by services.
//! - Isolate SQLite and JSON encoding details from business orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Franchise::validate()` before persistence.
//! - A franchise document is always written and read as a whole.

pub mod franchise_repo;
