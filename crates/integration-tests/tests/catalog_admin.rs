//! Integration tests for catalog administration.
//!
//! Run with: cargo test -p kirana-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use kirana_integration_tests::{base_url, client};

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn category_lifecycle_with_cascade_delete() {
    let client = client();

    let resp = client
        .post(format!("{}/api/categories", base_url()))
        .json(&json!({ "name": "Test Pulses", "icon": "fas fa-bowl-rice" }))
        .send()
        .await
        .expect("Failed to create category");
    assert_eq!(resp.status(), StatusCode::OK);
    let category: Value = resp.json().await.expect("Failed to parse category");
    let category_id = category["id"].as_str().expect("category id");
    assert_eq!(category_id, "test-pulses");

    let resp = client
        .post(format!("{}/api/products", base_url()))
        .json(&json!({
            "category_id": category_id,
            "name": "Masoor Dal",
            "price": 140
        }))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::OK);
    let product: Value = resp.json().await.expect("Failed to parse product");
    let product_id = product["id"].as_str().expect("product id");

    // Rename the category.
    let resp = client
        .put(format!("{}/api/categories/{category_id}", base_url()))
        .json(&json!({ "name": "Test Lentils" }))
        .send()
        .await
        .expect("Failed to update category");
    assert_eq!(resp.status(), StatusCode::OK);

    // Deleting the category takes its product with it.
    let resp = client
        .delete(format!("{}/api/categories/{category_id}", base_url()))
        .send()
        .await
        .expect("Failed to delete category");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .delete(format!("{}/api/products/{product_id}", base_url()))
        .send()
        .await
        .expect("Failed to send delete");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn categories_list_nests_products() {
    let client = client();

    let resp = client
        .get(format!("{}/api/categories", base_url()))
        .send()
        .await
        .expect("Failed to list categories");
    assert_eq!(resp.status(), StatusCode::OK);

    let categories: Vec<Value> = resp.json().await.expect("Failed to parse categories");
    let rice = categories
        .iter()
        .find(|c| c["id"] == "rice")
        .expect("seeded rice category");

    let products = rice["products"].as_array().expect("nested products");
    assert!(
        products
            .iter()
            .any(|p| p["id"] == "swastik-miniket" && p["category_id"] == "rice")
    );
}

#[tokio::test]
#[ignore = "Requires running server and PostgreSQL"]
async fn product_creation_is_validated() {
    let client = client();

    // Unknown category
    let resp = client
        .post(format!("{}/api/products", base_url()))
        .json(&json!({
            "category_id": "no-such-category",
            "name": "Orphan Product",
            "price": 100
        }))
        .send()
        .await
        .expect("Failed to send product");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Non-positive price
    let resp = client
        .post(format!("{}/api/products", base_url()))
        .json(&json!({
            "category_id": "rice",
            "name": "Free Rice",
            "price": 0
        }))
        .send()
        .await
        .expect("Failed to send product");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
