use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Extension, Path, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde_json::json;

use warehouse_inventory::{AddOutcome, InventoryStore, ItemDraft, RemoveOutcome};

use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/add", post(add_item))
        .route("/remove/:product_id", delete(remove_item))
        .route("/clear", delete(clear_inventory))
        .route("/all", get(get_all_items))
        .route("/sorted/quantity", get(get_sorted_by_quantity))
        .route("/sorted/expiration", get(get_sorted_by_expiration))
        .route("/category/:category", get(get_items_by_category))
        .route("/2d-array", get(get_inventory_grid))
        .route("/low-stock", get(get_low_stock_items))
        .route("/statistics", get(get_statistics))
        .route("/:product_id", get(get_item))
}

fn ok(body: serde_json::Value) -> axum::response::Response {
    (StatusCode::OK, Json(body)).into_response()
}

pub async fn add_item(
    Extension(store): Extension<Arc<InventoryStore>>,
    body: Result<Json<ItemDraft>, JsonRejection>,
) -> axum::response::Response {
    let Json(draft) = match body {
        Ok(b) => b,
        Err(e) => return errors::bad_request(e.body_text()),
    };

    match store.add_item(draft).and_then(AddOutcome::into_result) {
        Ok(item) => ok(json!({
            "success": true,
            "message": "Item added successfully",
            "item": item,
        })),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn remove_item(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(product_id): Path<String>,
    query: Result<Query<dto::RemoveQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return errors::bad_request(e.body_text()),
    };

    match store.remove_item(&product_id, query.quantity) {
        Ok(RemoveOutcome::Reduced(item)) => ok(json!({
            "success": true,
            "message": "Quantity reduced successfully",
            "item": item,
        })),
        Ok(RemoveOutcome::Removed(item)) => ok(json!({
            "success": true,
            "message": "Item removed successfully",
            "item": item,
        })),
        Ok(RemoveOutcome::NotFound) => errors::json_error(StatusCode::NOT_FOUND, "Item not found"),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn clear_inventory(
    Extension(store): Extension<Arc<InventoryStore>>,
) -> axum::response::Response {
    store.clear();
    ok(json!({
        "success": true,
        "message": "Inventory cleared",
    }))
}

pub async fn get_all_items(
    Extension(store): Extension<Arc<InventoryStore>>,
) -> axum::response::Response {
    ok(dto::items_json(store.all_items(), json!({})))
}

pub async fn get_sorted_by_quantity(
    Extension(store): Extension<Arc<InventoryStore>>,
) -> axum::response::Response {
    ok(dto::items_json(
        store.items_sorted_by_quantity(),
        json!({ "sortBy": "quantity" }),
    ))
}

pub async fn get_sorted_by_expiration(
    Extension(store): Extension<Arc<InventoryStore>>,
) -> axum::response::Response {
    ok(dto::items_json(
        store.items_sorted_by_expiration(),
        json!({ "sortBy": "expirationDate" }),
    ))
}

pub async fn get_items_by_category(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(category): Path<String>,
) -> axum::response::Response {
    let items = store.items_by_category(&category);
    ok(dto::items_json(items, json!({ "category": category })))
}

pub async fn get_item(
    Extension(store): Extension<Arc<InventoryStore>>,
    Path(product_id): Path<String>,
) -> axum::response::Response {
    match store.item_by_id(&product_id) {
        Some(item) => ok(json!({
            "success": true,
            "item": item,
        })),
        None => errors::json_error(StatusCode::NOT_FOUND, "Item not found"),
    }
}

pub async fn get_inventory_grid(
    Extension(store): Extension<Arc<InventoryStore>>,
) -> axum::response::Response {
    ok(json!({
        "success": true,
        "inventory2D": dto::category_grid(store.category_rows()),
        "structure": dto::GRID_STRUCTURE,
    }))
}

pub async fn get_low_stock_items(
    Extension(store): Extension<Arc<InventoryStore>>,
    query: Result<Query<dto::LowStockQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(e) => return errors::bad_request(e.body_text()),
    };

    let threshold = store.effective_threshold(query.threshold);
    let items = store.low_stock_items(query.threshold);
    ok(dto::items_json(items, json!({ "threshold": threshold })))
}

pub async fn get_statistics(
    Extension(store): Extension<Arc<InventoryStore>>,
) -> axum::response::Response {
    ok(json!({
        "success": true,
        "statistics": store.statistics(),
    }))
}
