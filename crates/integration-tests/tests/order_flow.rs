//! Integration tests for order submission and lifecycle.
//!
//! These tests exercise the seeded catalog (`kirana seed`), so run the seed
//! command before the server.
//!
//! Run with: cargo test -p kirana-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use kirana_integration_tests::{base_url, client, register_test_customer, set_store_open};

async fn place_order(client: &reqwest::Client, customer_id: &str, items: Value) -> reqwest::Response {
    client
        .post(format!("{}/api/orders", base_url()))
        .json(&json!({ "customer_id": customer_id, "items": items }))
        .send()
        .await
        .expect("Failed to send order")
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn order_totals_come_from_the_catalog() {
    let client = client();
    set_store_open(&client, true).await;

    let customer = register_test_customer(&client, "Deepak Kumar").await;
    let customer_id = customer["id"].as_str().expect("customer id");

    // Two sacks of Swastik Miniket at 1599 each, one Gulla at 520.
    let resp = place_order(
        &client,
        customer_id,
        json!({ "swastik-miniket": 2, "gulla": 1 }),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::OK);
    let order: Value = resp.json().await.expect("Failed to parse order");
    assert_eq!(order["total_items"], 3);
    assert_eq!(order["grand_total"], 2 * 1599 + 520);
    assert_eq!(order["status"], "received");
    assert_eq!(order["is_paid"], false);

    let items = order["items"].as_array().expect("items array");
    assert_eq!(items.len(), 2);
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn closed_store_rejects_orders() {
    let client = client();

    let customer = register_test_customer(&client, "Esha Patel").await;
    let customer_id = customer["id"].as_str().expect("customer id");

    set_store_open(&client, false).await;
    let resp = place_order(&client, customer_id, json!({ "gulla": 1 })).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Reopen and the same order goes through.
    set_store_open(&client, true).await;
    let resp = place_order(&client, customer_id, json!({ "gulla": 1 })).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn empty_selection_is_rejected() {
    let client = client();
    set_store_open(&client, true).await;

    let customer = register_test_customer(&client, "Farid Ali").await;
    let customer_id = customer["id"].as_str().expect("customer id");

    // No items at all.
    let resp = place_order(&client, customer_id, json!({})).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Only zero quantities and unknown products.
    let resp = place_order(
        &client,
        customer_id,
        json!({ "gulla": 0, "no-such-product": 5 }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn unknown_customer_is_not_found() {
    let client = client();
    set_store_open(&client, true).await;

    let resp = place_order(&client, "no-such-customer", json!({ "gulla": 1 })).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn status_transitions_are_unrestricted() {
    let client = client();
    set_store_open(&client, true).await;

    let customer = register_test_customer(&client, "Gita Sharma").await;
    let customer_id = customer["id"].as_str().expect("customer id");

    let resp = place_order(&client, customer_id, json!({ "basmati-rice": 1 })).await;
    let order: Value = resp.json().await.expect("Failed to parse order");
    let order_id = order["id"].as_str().expect("order id");

    // Forward, backward, and repeated transitions all succeed.
    for status in ["delivered", "in_transit", "in_transit", "received"] {
        let resp = client
            .put(format!("{}/api/orders/{order_id}/status", base_url()))
            .json(&json!({ "status": status }))
            .send()
            .await
            .expect("Failed to set status");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = client
        .put(format!("{}/api/orders/{order_id}/status", base_url()))
        .json(&json!({ "status": "lost-in-the-mail" }))
        .send()
        .await
        .expect("Failed to send status");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn payment_flag_toggles_freely() {
    let client = client();
    set_store_open(&client, true).await;

    let customer = register_test_customer(&client, "Hari Prasad").await;
    let customer_id = customer["id"].as_str().expect("customer id");

    let resp = place_order(&client, customer_id, json!({ "maida": 2 })).await;
    let order: Value = resp.json().await.expect("Failed to parse order");
    let order_id = order["id"].as_str().expect("order id");

    for is_paid in [true, false, true] {
        let resp = client
            .put(format!("{}/api/orders/{order_id}/payment", base_url()))
            .json(&json!({ "is_paid": is_paid }))
            .send()
            .await
            .expect("Failed to set payment");
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn item_snapshots_survive_product_edits() {
    let client = client();
    set_store_open(&client, true).await;

    let customer = register_test_customer(&client, "Indira Joshi").await;
    let customer_id = customer["id"].as_str().expect("customer id");

    // Order against a product we then edit.
    let resp = place_order(&client, customer_id, json!({ "red-onions": 2 })).await;
    let order: Value = resp.json().await.expect("Failed to parse order");
    let order_id = order["id"].as_str().expect("order id");
    let original_total = order["grand_total"].as_i64().expect("grand total");

    let resp = client
        .put(format!("{}/api/products/red-onions", base_url()))
        .json(&json!({ "price": 999 }))
        .send()
        .await
        .expect("Failed to update product");
    assert_eq!(resp.status(), StatusCode::OK);

    // The stored order keeps the old price.
    let resp = client
        .get(format!("{}/api/orders", base_url()))
        .send()
        .await
        .expect("Failed to list orders");
    let orders: Vec<Value> = resp.json().await.expect("Failed to parse orders");
    let stored = orders
        .iter()
        .find(|o| o["id"].as_str() == Some(order_id))
        .expect("order in list");
    assert_eq!(stored["grand_total"].as_i64(), Some(original_total));

    // Restore the seeded price.
    let resp = client
        .put(format!("{}/api/products/red-onions", base_url()))
        .json(&json!({ "price": 850 }))
        .send()
        .await
        .expect("Failed to restore product");
    assert_eq!(resp.status(), StatusCode::OK);
}
