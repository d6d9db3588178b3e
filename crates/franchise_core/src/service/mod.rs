//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into franchise-level operations.
//! - Keep the HTTP layer decoupled from storage details.

pub mod franchise_service;
