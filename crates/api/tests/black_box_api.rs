use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = stockroom_api::app::build_app();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn post(
    client: &reqwest::Client,
    base_url: &str,
    path: &str,
    body: serde_json::Value,
) -> reqwest::Response {
    client
        .post(format!("{base_url}{path}"))
        .json(&body)
        .send()
        .await
        .unwrap()
}

async fn get_json(client: &reqwest::Client, base_url: &str, path: &str) -> serde_json::Value {
    let res = client
        .get(format!("{base_url}{path}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK, "GET {path}");
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_endpoint_is_public() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn brand_uniqueness_is_case_insensitive() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = post(&client, &srv.base_url, "/brands", json!({ "name": "Acme" })).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = post(&client, &srv.base_url, "/brands", json!({ "name": "ACME" })).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "conflict");
    assert!(body["message"].as_str().unwrap().contains("ACME"));
}

#[tokio::test]
async fn unknown_ids_map_to_not_found() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/brands/999", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/brands/not-a-number", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn product_lifecycle_with_initial_deposit() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let brand: serde_json::Value = post(&client, &srv.base_url, "/brands", json!({ "name": "Acme" }))
        .await
        .json()
        .await
        .unwrap();
    let category: serde_json::Value =
        post(&client, &srv.base_url, "/categories", json!({ "name": "Tools" }))
            .await
            .json()
            .await
            .unwrap();
    let deposit: serde_json::Value =
        post(&client, &srv.base_url, "/deposits", json!({ "name": "Central" }))
            .await
            .json()
            .await
            .unwrap();

    let res = post(
        &client,
        &srv.base_url,
        "/products",
        json!({
            "name": "Hammer",
            "purchase_price": { "currency": "USD", "amount": "7.50" },
            "sale_price": { "currency": "USD", "amount": "12.99" },
            "brand_id": brand["id"],
            "category_id": category["id"],
            "deposit_ids": [deposit["id"]],
        }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let product: serde_json::Value = res.json().await.unwrap();

    assert_eq!(product["deposits_count"], 1);
    assert_eq!(product["deposits"], json!([deposit["id"]]));

    // The counters propagated to the referenced entities.
    let deposit_after = get_json(
        &client,
        &srv.base_url,
        &format!("/deposits/{}", deposit["id"]),
    )
    .await;
    assert_eq!(deposit_after["product_count"], 1);

    let brand_after = get_json(&client, &srv.base_url, &format!("/brands/{}", brand["id"])).await;
    assert_eq!(brand_after["associated_product_count"], 1);

    // And a quantity-0 ledger row exists for the pair.
    let stock = get_json(&client, &srv.base_url, "/stock").await;
    assert_eq!(stock["items"].as_array().unwrap().len(), 1);
    assert_eq!(stock["items"][0]["quantity"], 0);

    // Deleting the brand is blocked while the product references it.
    let res = client
        .delete(format!("{}/brands/{}", srv.base_url, brand["id"]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // After the product is gone, the brand delete goes through.
    let res = client
        .delete(format!("{}/products/{}", srv.base_url, product["id"]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .delete(format!("{}/brands/{}", srv.base_url, brand["id"]))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn movement_preconditions_and_transfer_effects() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let brand: serde_json::Value = post(&client, &srv.base_url, "/brands", json!({ "name": "Acme" }))
        .await
        .json()
        .await
        .unwrap();
    let category: serde_json::Value =
        post(&client, &srv.base_url, "/categories", json!({ "name": "Tools" }))
            .await
            .json()
            .await
            .unwrap();
    let d1: serde_json::Value = post(&client, &srv.base_url, "/deposits", json!({ "name": "D1" }))
        .await
        .json()
        .await
        .unwrap();
    let d2: serde_json::Value = post(&client, &srv.base_url, "/deposits", json!({ "name": "D2" }))
        .await
        .json()
        .await
        .unwrap();

    // Product starts with a quantity-0 row in D1.
    let product: serde_json::Value = post(
        &client,
        &srv.base_url,
        "/products",
        json!({
            "name": "Hammer",
            "purchase_price": { "currency": "USD", "amount": "7.50" },
            "sale_price": { "currency": "USD", "amount": "12.99" },
            "brand_id": brand["id"],
            "category_id": category["id"],
            "deposit_ids": [d1["id"]],
        }),
    )
    .await
    .json()
    .await
    .unwrap();

    // ENTRY without a destination is a validation failure.
    let res = post(
        &client,
        &srv.base_url,
        "/movements",
        json!({ "type": "ENTRY", "product_id": product["id"], "quantity": 5 }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    // TRANSFER out of the empty D1 row into fresh D2: row removed, counts move.
    let res = post(
        &client,
        &srv.base_url,
        "/movements",
        json!({
            "type": "TRANSFER",
            "product_id": product["id"],
            "origin_deposit_id": d1["id"],
            "destination_deposit_id": d2["id"],
            "quantity": 5,
        }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let movement: serde_json::Value = res.json().await.unwrap();
    assert_eq!(movement["type"], "TRANSFER");

    let product_after = get_json(
        &client,
        &srv.base_url,
        &format!("/products/{}", product["id"]),
    )
    .await;
    // One presence lost at D1, one gained at D2.
    assert_eq!(product_after["deposits_count"], 1);
    assert_eq!(product_after["deposits"], json!([]));

    let d1_after = get_json(&client, &srv.base_url, &format!("/deposits/{}", d1["id"])).await;
    assert_eq!(d1_after["product_count"], 0);

    let stock = get_json(&client, &srv.base_url, "/stock").await;
    assert_eq!(stock["items"].as_array().unwrap().len(), 0);

    // The movement shows up in the filtered queries and the audit trail.
    let transfers = get_json(
        &client,
        &srv.base_url,
        &format!(
            "/movements?origin={}&destination={}",
            d1["id"], d2["id"]
        ),
    )
    .await;
    assert_eq!(transfers["items"].as_array().unwrap().len(), 1);

    let trail = get_json(&client, &srv.base_url, "/audit-logs?entity=StockMovement").await;
    assert_eq!(trail["items"].as_array().unwrap().len(), 1);
    assert_eq!(trail["items"][0]["operation"], "CREATE");
    assert_eq!(trail["items"][0]["username"], serde_json::Value::Null);
}
