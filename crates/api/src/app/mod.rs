//! HTTP API application wiring (Axum router + store wiring).
//!
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: query DTOs and JSON mapping helpers
//! - `errors.rs`: consistent `{success: false, message}` error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use warehouse_inventory::InventoryStore;

pub mod dto;
pub mod errors;
pub mod routes;

/// Prefix every inventory route is mounted under.
pub const INVENTORY_PREFIX: &str = "/api/inventory";

/// Public endpoint table, logged at startup.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("POST", "/api/inventory/add"),
    ("DELETE", "/api/inventory/remove/{productId}?quantity="),
    ("DELETE", "/api/inventory/clear"),
    ("GET", "/api/inventory/all"),
    ("GET", "/api/inventory/sorted/quantity"),
    ("GET", "/api/inventory/sorted/expiration"),
    ("GET", "/api/inventory/category/{category}"),
    ("GET", "/api/inventory/{productId}"),
    ("GET", "/api/inventory/2d-array"),
    ("GET", "/api/inventory/low-stock?threshold="),
    ("GET", "/api/inventory/statistics"),
    ("GET", "/health"),
];

/// Build the full HTTP router around an owned store.
pub fn build_app(store: Arc<InventoryStore>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .nest(INVENTORY_PREFIX, routes::inventory::router())
        .layer(Extension(store))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
