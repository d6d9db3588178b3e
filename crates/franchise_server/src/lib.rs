//! HTTP server for the franchise inventory service.
//!
//! # Responsibility
//! - Wire configuration, storage, and the axum router together.
//! - Keep startup steps callable from tests without binding real ports.

pub mod config;
pub mod http;

pub use config::{ConfigError, DatabaseLocation, ServerConfig};
pub use http::error::{ApiError, ApiErrorCode};
pub use http::{build_router, AppState, SharedService};

use franchise_core::db::{open_db, open_db_in_memory};
use franchise_core::SqliteFranchiseRepository;

/// Opens (and migrates) the configured database and wraps it in a repository.
pub fn open_repository(location: &DatabaseLocation) -> Result<SqliteFranchiseRepository, String> {
    let conn = match location {
        DatabaseLocation::File(path) => open_db(path)
            .map_err(|err| format!("failed to open database `{}`: {err}", path.display()))?,
        DatabaseLocation::Memory => {
            open_db_in_memory().map_err(|err| format!("failed to open in-memory database: {err}"))?
        }
    };
    SqliteFranchiseRepository::try_new(conn)
        .map_err(|err| format!("failed to initialize franchise repository: {err}"))
}

/// Builds router state from configuration.
pub fn build_state(config: &ServerConfig) -> Result<AppState, String> {
    let repo = open_repository(&config.database)?;
    Ok(AppState::from_repository(repo).with_max_body_bytes(config.max_body_bytes))
}
