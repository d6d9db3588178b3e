//! HTTP surface over the franchise service.
//!
//! # Responsibility
//! - Map each endpoint to exactly one `FranchiseService` operation.
//! - Translate validation/not-found/store failures into 400/404/500.
//! - Log one completion event per matched request.

pub mod error;
mod handlers;

use crate::config::DEFAULT_MAX_BODY_BYTES;
use axum::extract::{DefaultBodyLimit, MatchedPath, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{delete, get, post, put};
use axum::Router;
use franchise_core::{FranchiseRepository, FranchiseService};
use log::{log, Level};
use std::sync::Arc;
use std::time::Instant;

/// Service type shared by all handlers; the repository is chosen at startup.
pub type SharedService = FranchiseService<Arc<dyn FranchiseRepository>>;

#[derive(Clone)]
pub struct AppState {
    pub(crate) service: Arc<SharedService>,
    max_body_bytes: usize,
}

impl AppState {
    pub fn new(service: SharedService) -> Self {
        Self {
            service: Arc::new(service),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Builds state around any repository implementation.
    pub fn from_repository<R>(repo: R) -> Self
    where
        R: FranchiseRepository + 'static,
    {
        let repo: Arc<dyn FranchiseRepository> = Arc::new(repo);
        Self::new(FranchiseService::new(repo))
    }

    pub fn with_max_body_bytes(mut self, max_body_bytes: usize) -> Self {
        self.max_body_bytes = max_body_bytes;
        self
    }
}

pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.max_body_bytes;
    Router::new()
        .route(
            "/franchises",
            post(handlers::create_franchise).get(handlers::list_franchises),
        )
        .route("/franchises/:franchise_id", get(handlers::get_franchise))
        .route(
            "/franchises/:franchise_id/name",
            put(handlers::rename_franchise),
        )
        .route(
            "/franchises/:franchise_id/branches",
            post(handlers::add_branch),
        )
        .route(
            "/franchises/:franchise_id/branches/:branch_id/name",
            put(handlers::rename_branch),
        )
        .route(
            "/franchises/:franchise_id/branches/:branch_id/products",
            post(handlers::add_product),
        )
        .route(
            "/franchises/:franchise_id/branches/:branch_id/products/:product_id",
            delete(handlers::remove_product),
        )
        .route(
            "/franchises/:franchise_id/branches/:branch_id/products/:product_id/stock",
            put(handlers::update_product_stock),
        )
        .route(
            "/franchises/:franchise_id/branches/:branch_id/products/:product_id/name",
            put(handlers::rename_product),
        )
        .route(
            "/franchises/:franchise_id/top-products",
            get(handlers::top_products),
        )
        .route("/healthz", get(handlers::healthz))
        .route_layer(middleware::from_fn(log_request))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}

async fn log_request(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = started.elapsed().as_millis();
    let (level, outcome) = match status {
        500.. => (Level::Error, "error"),
        400..=499 => (Level::Warn, "rejected"),
        _ => (Level::Info, "ok"),
    };
    log!(
        level,
        "event=http_request module=http status={outcome} method={method} route={route} http_status={status} duration_ms={duration_ms}"
    );
    response
}
