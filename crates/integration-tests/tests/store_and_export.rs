//! Integration tests for the store gate, admin session, and CSV exports.
//!
//! Run with: cargo test -p kirana-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use kirana_integration_tests::{base_url, client, register_test_customer, set_store_open};

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn store_toggle_round_trip() {
    let client = client();

    set_store_open(&client, true).await;

    let resp = client
        .post(format!("{}/api/store/toggle", base_url()))
        .send()
        .await
        .expect("Failed to toggle store");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse toggle");
    assert_eq!(body["is_store_open"], false);

    // Leave the store open for other tests.
    set_store_open(&client, true).await;
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn admin_login_checks_the_password() {
    let client = client();

    let resp = client
        .post(format!("{}/api/admin/login", base_url()))
        .json(&json!({ "password": "definitely-wrong" }))
        .send()
        .await
        .expect("Failed to send login");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let password = std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD for test");
    let resp = client
        .post(format!("{}/api/admin/login", base_url()))
        .json(&json!({ "password": password }))
        .send()
        .await
        .expect("Failed to send login");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/api/admin/status", base_url()))
        .send()
        .await
        .expect("Failed to get admin status");
    let body: Value = resp.json().await.expect("Failed to parse status");
    assert_eq!(body["is_admin_logged_in"], true);

    let resp = client
        .post(format!("{}/api/admin/logout", base_url()))
        .send()
        .await
        .expect("Failed to log out");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn customer_export_is_csv_attachment() {
    let client = client();

    register_test_customer(&client, "Export Subject").await;

    let resp = client
        .get(format!("{}/api/export/customers.csv", base_url()))
        .send()
        .await
        .expect("Failed to export customers");
    assert_eq!(resp.status(), StatusCode::OK);

    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/csv"));

    let disposition = resp
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("customers.csv"));

    let body = resp.text().await.expect("Failed to read body");
    let header = body.lines().next().expect("header line");
    assert_eq!(
        header,
        "ID,Full Name,Phone Number,Shop Name,Delivery Location,Registered At"
    );
    assert!(body.contains("Export Subject"));
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn order_export_reflects_placed_orders() {
    let client = client();
    set_store_open(&client, true).await;

    let customer = register_test_customer(&client, "Order Exporter").await;
    let customer_id = customer["id"].as_str().expect("customer id");

    let resp = client
        .post(format!("{}/api/orders", base_url()))
        .json(&json!({ "customer_id": customer_id, "items": { "wheat-atta": 1 } }))
        .send()
        .await
        .expect("Failed to place order");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{}/api/export/orders.csv", base_url()))
        .send()
        .await
        .expect("Failed to export orders");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("Failed to read body");
    let header = body.lines().next().expect("header line");
    assert_eq!(
        header,
        "ID,Customer Name,Phone,Total Items,Grand Total,Status,Date"
    );
    assert!(body.contains("Order Exporter"));
}
