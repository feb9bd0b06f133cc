//! Integration tests for the imports collection and the apply-import
//! transaction.
//!
//! Run with: cargo test -p ihub-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use ihub_integration_tests::{base_url, client, test_token};

/// Test helper: create a product with the given stock and return its id.
async fn create_product(quantity: i64) -> String {
    let resp = client()
        .post(format!("{}/products", base_url()))
        .bearer_auth(test_token())
        .json(&json!({
            "product_name": format!("Import Target {}", Uuid::new_v4()),
            "supplier_email": "supplier@example.com",
            "available_quantity": quantity,
            "import_date": "2026-08-30T12:00:00Z"
        }))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let doc: Value = resp.json().await.expect("Failed to parse product");
    doc["id"].as_str().expect("product has an id").to_owned()
}

/// Test helper: fetch a product's available quantity.
async fn available_quantity(product_id: &str) -> i64 {
    let resp = client()
        .get(format!("{}/products/{product_id}", base_url()))
        .send()
        .await
        .expect("Failed to fetch product");
    assert_eq!(resp.status(), StatusCode::OK);

    let doc: Value = resp.json().await.expect("Failed to parse product");
    doc["available_quantity"]
        .as_i64()
        .expect("available_quantity is an integer")
}

#[tokio::test]
#[ignore = "Requires running API server and identity credentials"]
async fn test_import_decrements_quantity() {
    let product_id = create_product(100).await;

    let resp = client()
        .post(format!("{}/imports", base_url()))
        .bearer_auth(test_token())
        .json(&json!({
            "product_id": product_id,
            "import_quantity": 40,
            "importer_email": "importer@example.com",
            "destination": "Chattogram"
        }))
        .send()
        .await
        .expect("Failed to create import");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let import: Value = resp.json().await.expect("Failed to parse import");
    assert!(import["id"].as_str().is_some());
    assert_eq!(import["destination"], json!("Chattogram"));

    assert_eq!(available_quantity(&product_id).await, 60);
}

#[tokio::test]
#[ignore = "Requires running API server and identity credentials"]
async fn test_import_exceeding_stock_is_conflict() {
    let product_id = create_product(10).await;

    let resp = client()
        .post(format!("{}/imports", base_url()))
        .bearer_auth(test_token())
        .json(&json!({
            "product_id": product_id,
            "import_quantity": 11,
            "importer_email": "importer@example.com"
        }))
        .send()
        .await
        .expect("Failed to send import");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Nothing was written
    assert_eq!(available_quantity(&product_id).await, 10);
}

#[tokio::test]
#[ignore = "Requires running API server and identity credentials"]
async fn test_import_against_non_numeric_quantity_is_conflict() {
    // Documents are stored without schema validation, so a product can
    // carry a string where a number belongs. The decrement precondition
    // must fail it as out-of-stock, not blow up in the store.
    let resp = client()
        .post(format!("{}/products", base_url()))
        .bearer_auth(test_token())
        .json(&json!({
            "product_name": format!("Unsellable {}", Uuid::new_v4()),
            "supplier_email": "supplier@example.com",
            "available_quantity": "plenty"
        }))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let doc: Value = resp.json().await.expect("Failed to parse product");
    let product_id = doc["id"].as_str().expect("product has an id").to_owned();

    let resp = client()
        .post(format!("{}/imports", base_url()))
        .bearer_auth(test_token())
        .json(&json!({
            "product_id": product_id,
            "import_quantity": 1,
            "importer_email": "importer@example.com"
        }))
        .send()
        .await
        .expect("Failed to send import");
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // The stored value is untouched
    let resp = client()
        .get(format!("{}/products/{product_id}", base_url()))
        .send()
        .await
        .expect("Failed to fetch product");
    let doc: Value = resp.json().await.expect("Failed to parse product");
    assert_eq!(doc["available_quantity"], json!("plenty"));
}

#[tokio::test]
#[ignore = "Requires running API server and identity credentials"]
async fn test_import_against_unknown_product_is_not_found() {
    let resp = client()
        .post(format!("{}/imports", base_url()))
        .bearer_auth(test_token())
        .json(&json!({
            "product_id": Uuid::new_v4().to_string(),
            "import_quantity": 1,
            "importer_email": "importer@example.com"
        }))
        .send()
        .await
        .expect("Failed to send import");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running API server and identity credentials"]
async fn test_import_quantity_as_string_is_accepted() {
    let product_id = create_product(30).await;

    let resp = client()
        .post(format!("{}/imports", base_url()))
        .bearer_auth(test_token())
        .json(&json!({
            "product_id": product_id,
            "import_quantity": "12",
            "importer_email": "importer@example.com"
        }))
        .send()
        .await
        .expect("Failed to create import");
    assert_eq!(resp.status(), StatusCode::CREATED);

    assert_eq!(available_quantity(&product_id).await, 18);
}

#[tokio::test]
#[ignore = "Requires running API server and identity credentials"]
async fn test_list_imports_filtered_by_email() {
    let product_id = create_product(50).await;
    let marker_email = format!("filter-{}@example.com", Uuid::new_v4().simple());

    let resp = client()
        .post(format!("{}/imports", base_url()))
        .bearer_auth(test_token())
        .json(&json!({
            "product_id": product_id,
            "import_quantity": 5,
            "importer_email": marker_email
        }))
        .send()
        .await
        .expect("Failed to create import");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client()
        .get(format!("{}/imports?email={marker_email}", base_url()))
        .bearer_auth(test_token())
        .send()
        .await
        .expect("Failed to list imports");
    assert_eq!(resp.status(), StatusCode::OK);

    let imports: Vec<Value> = resp.json().await.expect("Failed to parse imports");
    assert_eq!(imports.len(), 1);
    assert_eq!(imports[0]["importer_email"], json!(marker_email));
}

#[tokio::test]
#[ignore = "Requires running API server and identity credentials"]
async fn test_delete_import_does_not_restore_quantity() {
    let product_id = create_product(20).await;

    let resp = client()
        .post(format!("{}/imports", base_url()))
        .bearer_auth(test_token())
        .json(&json!({
            "product_id": product_id,
            "import_quantity": 8,
            "importer_email": "importer@example.com"
        }))
        .send()
        .await
        .expect("Failed to create import");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let import: Value = resp.json().await.expect("Failed to parse import");
    let import_id = import["id"].as_str().expect("import has an id");

    let resp = client()
        .delete(format!("{}/imports/{import_id}", base_url()))
        .bearer_auth(test_token())
        .send()
        .await
        .expect("Failed to delete import");
    assert_eq!(resp.status(), StatusCode::OK);

    // Deleting the record is bookkeeping only
    assert_eq!(available_quantity(&product_id).await, 12);
}
