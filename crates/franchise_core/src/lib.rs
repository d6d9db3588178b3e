//! Core domain logic for the franchise inventory service.
//! This crate is the single source of truth for franchise/branch/product invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::franchise::{
    Branch, BranchId, Franchise, FranchiseId, Product, ProductId, TopProduct,
};
pub use model::request::{
    CreateBranchRequest, CreateFranchiseRequest, CreateProductRequest, NewProduct,
    UpdateNameRequest, UpdateStockRequest,
};
pub use model::validation::{FieldViolation, ValidationError};
pub use repo::franchise_repo::{
    FranchiseRepository, RepoError, RepoResult, SqliteFranchiseRepository,
};
pub use service::franchise_service::{FranchiseService, FranchiseServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
