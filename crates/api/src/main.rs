use std::sync::Arc;

use anyhow::Context;

use warehouse_api::{app, config::ApiConfig};
use warehouse_inventory::InventoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();
    warehouse_observability::init();

    let config = ApiConfig::from_env()?;
    let store = Arc::new(InventoryStore::with_limits(config.limits));
    let app = app::build_app(store.clone());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        category_capacity = store.limits().category_capacity,
        low_stock_threshold = store.limits().low_stock_threshold,
        "warehouse inventory service listening"
    );
    for (method, path) in app::ENDPOINTS {
        tracing::info!(method, path, "endpoint");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    let stats = store.statistics();
    tracing::info!(
        discarded_items = stats.total_items,
        discarded_categories = stats.categories_count,
        "shutting down; in-memory inventory discarded"
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}
