use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};

use warehouse_inventory::{InventoryStore, StoreLimits};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        Self::spawn_with(InventoryStore::new()).await
    }

    async fn spawn_with(store: InventoryStore) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = warehouse_api::app::build_app(Arc::new(store));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/api/inventory", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn add(client: &reqwest::Client, srv: &TestServer, body: Value) -> (StatusCode, Value) {
    let res = client.post(srv.url("/add")).json(&body).send().await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

async fn get_json(client: &reqwest::Client, url: String) -> (StatusCode, Value) {
    let res = client.get(url).send().await.unwrap();
    let status = res.status();
    (status, res.json().await.unwrap())
}

fn ids(body: &Value) -> Vec<String> {
    body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["productId"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn add_merge_reduce_remove_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = add(
        &client,
        &srv,
        json!({ "productId": "A1", "productName": "Apples", "quantity": 5, "category": "produce" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Item added successfully");
    assert_eq!(body["item"]["quantity"], 5);

    let (status, body) = add(
        &client,
        &srv,
        json!({ "productId": "A1", "quantity": 3, "category": "produce" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"]["quantity"], 8);
    assert_eq!(body["item"]["productName"], "Apples");

    let res = client
        .delete(srv.url("/remove/A1?quantity=2"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Quantity reduced successfully");

    let (status, body) = get_json(&client, srv.url("/A1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"]["quantity"], 6);

    let res = client.delete(srv.url("/remove/A1")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Item removed successfully");

    let (status, body) = get_json(&client, srv.url("/A1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Item not found");
}

#[tokio::test]
async fn empty_quantity_parameter_removes_whole_item() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    add(&client, &srv, json!({ "productId": "A1", "quantity": 7 })).await;

    let res = client
        .delete(srv.url("/remove/A1?quantity="))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Item removed successfully");

    let (status, _) = get_json(&client, srv.url("/A1")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_product_id_on_remove_is_404() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.delete(srv.url("/remove/%20")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Item not found");
}

#[tokio::test]
async fn null_numeric_fields_default_to_zero() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = add(
        &client,
        &srv,
        json!({ "productId": "N1", "quantity": null, "unitPrice": null }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item"]["quantity"], 0);
    assert_eq!(body["item"]["unitPrice"], 0.0);
}

#[tokio::test]
async fn remove_unknown_item_is_404() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.delete(srv.url("/remove/ghost")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn invalid_input_is_400_with_envelope() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let (status, body) = add(&client, &srv, json!({ "quantity": 3 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Item and productId cannot be null");

    let (status, body) = add(&client, &srv, json!({ "productId": "A", "quantity": -4 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let res = client
        .delete(srv.url("/remove/A?quantity=lots"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn capacity_exhaustion_is_409() {
    let store = InventoryStore::with_limits(StoreLimits {
        category_capacity: 2,
        ..StoreLimits::default()
    });
    let srv = TestServer::spawn_with(store).await;
    let client = reqwest::Client::new();

    for id in ["a", "b"] {
        let (status, _) = add(&client, &srv, json!({ "productId": id, "category": "tiny" })).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = add(&client, &srv, json!({ "productId": "c", "category": "tiny" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to add item: Category capacity exceeded");

    // Merging into a full category still succeeds.
    let (status, _) = add(
        &client,
        &srv,
        json!({ "productId": "a", "quantity": 1, "category": "tiny" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn sorted_views_and_metadata() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    add(
        &client,
        &srv,
        json!({
            "productId": "milk",
            "quantity": 20,
            "category": "dairy",
            "expirationDate": "2030-03-01",
        }),
    )
    .await;
    add(&client, &srv, json!({ "productId": "salt", "quantity": 2, "category": "dry" })).await;
    add(
        &client,
        &srv,
        json!({
            "productId": "kale",
            "quantity": 9,
            "category": "produce",
            "expirationDate": "2029-12-24",
        }),
    )
    .await;

    let (status, body) = get_json(&client, srv.url("/sorted/quantity")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sortBy"], "quantity");
    assert_eq!(body["count"], 3);
    assert_eq!(ids(&body), vec!["salt", "kale", "milk"]);

    let (_, body) = get_json(&client, srv.url("/sorted/expiration")).await;
    assert_eq!(body["sortBy"], "expirationDate");
    assert_eq!(ids(&body), vec!["kale", "milk", "salt"]);

    let (_, body) = get_json(&client, srv.url("/all")).await;
    assert_eq!(body["count"], 3);

    let (_, body) = get_json(&client, srv.url("/category/dairy")).await;
    assert_eq!(body["category"], "dairy");
    assert_eq!(ids(&body), vec!["milk"]);

    let (status, body) = get_json(&client, srv.url("/category/unknown")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn low_stock_uses_default_threshold_for_non_positive_values() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    add(&client, &srv, json!({ "productId": "a", "quantity": 10 })).await;
    add(&client, &srv, json!({ "productId": "b", "quantity": 3 })).await;
    add(&client, &srv, json!({ "productId": "c", "quantity": 50 })).await;

    let (_, body) = get_json(&client, srv.url("/low-stock")).await;
    assert_eq!(body["threshold"], 10);
    assert_eq!(ids(&body), vec!["b", "a"]);

    let (status, body) = get_json(&client, srv.url("/low-stock?threshold=")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["threshold"], 10);
    assert_eq!(ids(&body), vec!["b", "a"]);

    let (_, body) = get_json(&client, srv.url("/low-stock?threshold=0")).await;
    assert_eq!(body["threshold"], 10);
    assert_eq!(body["count"], 2);

    let (_, body) = get_json(&client, srv.url("/low-stock?threshold=5")).await;
    assert_eq!(body["threshold"], 5);
    assert_eq!(ids(&body), vec!["b"]);
}

#[tokio::test]
async fn statistics_grid_and_clear() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    add(&client, &srv, json!({ "productId": "a", "quantity": 4, "category": "x" })).await;
    add(&client, &srv, json!({ "productId": "b", "quantity": 40, "category": "x" })).await;
    add(&client, &srv, json!({ "productId": "c", "quantity": 1 })).await;

    let (_, body) = get_json(&client, srv.url("/statistics")).await;
    let stats = &body["statistics"];
    assert_eq!(body["success"], true);
    assert_eq!(stats["totalItems"], 3);
    assert_eq!(stats["totalQuantity"], 45);
    assert_eq!(stats["categoriesCount"], 2);
    assert_eq!(stats["lowStockCount"], 2);
    assert_eq!(stats["lowStockThreshold"], 10);
    assert_eq!(stats["categories"], json!(["UNCATEGORIZED", "x"]));

    let (_, body) = get_json(&client, srv.url("/2d-array")).await;
    assert_eq!(body["inventory2D"]["x"].as_array().unwrap().len(), 1);
    assert_eq!(body["inventory2D"]["x"][0].as_array().unwrap().len(), 2);
    assert!(body["structure"].is_string());

    let res = client.delete(srv.url("/clear")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let (_, body) = get_json(&client, srv.url("/statistics")).await;
    assert_eq!(body["statistics"]["totalItems"], 0);
    assert_eq!(body["statistics"]["categoriesCount"], 0);
}
