use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;

use medstock_api::app::{router_with, AppServices};
use medstock_auth::{Hs256TokenService, Role};
use medstock_infra::MemoryStore;

const JWT_SECRET: &[u8] = b"black-box-test-secret-0123456789abcd";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Build the prod router over an in-memory store, seed an admin and one
    /// officer, and bind to an ephemeral port.
    async fn spawn() -> Self {
        let tokens = Arc::new(Hs256TokenService::new(JWT_SECRET).unwrap());
        let services = Arc::new(AppServices::from_store(
            Arc::new(MemoryStore::new()),
            tokens.clone(),
        ));
        services
            .auth
            .ensure_user("admin", "admin-password-123", Role::Admin)
            .await
            .unwrap();
        services
            .auth
            .ensure_user("officer1", "officer-password-1", Role::User)
            .await
            .unwrap();

        let app = router_with(services, tokens);
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

async fn login(client: &reqwest::Client, base_url: &str) -> String {
    let res = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({"username": "admin", "password": "admin-password-123"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

fn medicine_body(stock: i32) -> serde_json::Value {
    json!({
        "name": "Paracetamol",
        "dosage": "500mg",
        "manufacturer": "Acme Pharma",
        "category": "Analgesic",
        "stock": stock,
        "expirationDate": "2030-01-01",
        "instructions": "Take with food"
    })
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/medicines", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/api/medicines", srv.base_url))
        .bearer_auth("not-a-real-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for (username, password) in [("admin", "wrong"), ("nobody", "whatever")] {
        let res = client
            .post(format!("{}/api/auth/login", srv.base_url))
            .json(&json!({"username": username, "password": password}))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn medicine_crud_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv.base_url).await;

    // Create.
    let res = client
        .post(format!("{}/api/medicines", srv.base_url))
        .bearer_auth(&token)
        .json(&medicine_body(10))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["stock"], 10);
    assert_eq!(created["expirationDate"], "2030-01-01");

    // List contains it.
    let res = client
        .get(format!("{}/api/medicines", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let listed: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(listed.len(), 1);

    // Full overwrite via PUT.
    let mut updated_body = medicine_body(3);
    updated_body["name"] = json!("Ibuprofen");
    let res = client
        .put(format!("{}/api/medicines/{}", srv.base_url, id))
        .bearer_auth(&token)
        .json(&updated_body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["name"], "Ibuprofen");
    assert_eq!(updated["stock"], 3);

    // Updating an unknown id is a 404; garbage ids are 400.
    let res = client
        .put(format!(
            "{}/api/medicines/00000000-0000-7000-8000-000000000000",
            srv.base_url
        ))
        .bearer_auth(&token)
        .json(&medicine_body(1))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .put(format!("{}/api/medicines/garbage", srv.base_url))
        .bearer_auth(&token)
        .json(&medicine_body(1))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Delete.
    let res = client
        .delete(format!("{}/api/medicines/{}", srv.base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .get(format!("{}/api/medicines", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let listed: Vec<serde_json::Value> = res.json().await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn negative_stock_is_rejected_with_a_validation_error() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv.base_url).await;

    let res = client
        .post(format!("{}/api/medicines", srv.base_url))
        .bearer_auth(&token)
        .json(&medicine_body(-5))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    // Nothing was written.
    let res = client
        .get(format!("{}/api/medicines", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let listed: Vec<serde_json::Value> = res.json().await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn distribution_workflow_decrements_stock_and_rejects_overdraw() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv.base_url).await;

    // Officer seeded at spawn; fetch its id.
    let res = client
        .get(format!("{}/api/distributions/officers", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let officers: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(officers.len(), 1);
    assert_eq!(officers[0]["role"], "USER");
    let officer_id = officers[0]["id"].as_str().unwrap().to_string();

    let res = client
        .post(format!("{}/api/medicines", srv.base_url))
        .bearer_auth(&token)
        .json(&medicine_body(10))
        .send()
        .await
        .unwrap();
    let medicine: serde_json::Value = res.json().await.unwrap();
    let medicine_id = medicine["id"].as_str().unwrap().to_string();

    // Distribute 4 of 10.
    let res = client
        .post(format!("{}/api/distributions", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "officerId": officer_id,
            "medicineId": medicine_id,
            "quantity": 4
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let distribution: serde_json::Value = res.json().await.unwrap();
    assert_eq!(distribution["quantity"], 4);
    assert_eq!(distribution["status"], "Completed");

    let res = client
        .get(format!("{}/api/medicines", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let listed: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(listed[0]["stock"], 6);

    // A second distribution of 7 exceeds the remaining 6.
    let res = client
        .post(format!("{}/api/distributions", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "officerId": officer_id,
            "medicineId": medicine_id,
            "quantity": 7
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let res = client
        .get(format!("{}/api/medicines", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let listed: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(listed[0]["stock"], 6);

    let res = client
        .get(format!("{}/api/distributions", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let history: Vec<serde_json::Value> = res.json().await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn stock_batches_are_tied_to_medicines() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv.base_url).await;

    // Receiving a batch against an unknown medicine fails.
    let res = client
        .post(format!("{}/api/stock", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "medicineId": "00000000-0000-7000-8000-000000000000",
            "quantity": 5,
            "batchNumber": "B-2026-001",
            "expiryDate": "2027-06-01",
            "receivedDate": "2026-06-01",
            "supplier": "MedSupply Ltd",
            "unitPrice": 2.5,
            "reorderLevel": 10
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .post(format!("{}/api/medicines", srv.base_url))
        .bearer_auth(&token)
        .json(&medicine_body(0))
        .send()
        .await
        .unwrap();
    let medicine: serde_json::Value = res.json().await.unwrap();
    let medicine_id = medicine["id"].as_str().unwrap().to_string();

    let res = client
        .post(format!("{}/api/stock", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "medicineId": medicine_id,
            "quantity": 5,
            "batchNumber": "B-2026-001",
            "expiryDate": "2027-06-01",
            "receivedDate": "2026-06-01",
            "supplier": "MedSupply Ltd",
            "unitPrice": 2.5,
            "reorderLevel": 10
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    // Summary: 5 items worth 12.5, and quantity 5 trips the fixed alert.
    let res = client
        .get(format!("{}/api/stock/summary", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    let summary: serde_json::Value = res.json().await.unwrap();
    assert_eq!(summary["totalItems"], 5);
    assert_eq!(summary["totalValue"], 12.5);
    assert_eq!(summary["lowStockAlerts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn medicine_summary_uses_default_query_parameters() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv.base_url).await;

    client
        .post(format!("{}/api/medicines", srv.base_url))
        .bearer_auth(&token)
        .json(&medicine_body(3))
        .send()
        .await
        .unwrap();

    let res = client
        .get(format!("{}/api/medicines/summary", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let summary: serde_json::Value = res.json().await.unwrap();
    assert_eq!(summary["total"], 1);
    assert_eq!(summary["expired"], 0);
    // stock 3 < default threshold 10
    assert_eq!(summary["lowStock"], 1);
}
