//! Error envelope behavior at the handler boundary: bad input is rejected
//! before any repository call, and renders the uniform error shape.

use std::sync::Arc;

use axum::body::to_bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::DatabaseConnection;
use serde_json::Value;

use vendor_sales_dashboard::{
    error::AppError,
    models::Vendor,
    repo::memory::MemoryStore,
    routes::dashboard,
    routes::params::ProductSalesQuery,
    state::AppState,
};

fn state(store: MemoryStore) -> AppState {
    let store = Arc::new(store);
    AppState {
        // Never queried here; handlers go through the repositories.
        orm: DatabaseConnection::default(),
        vendors: store.clone(),
        orders: store.clone(),
        products: store,
    }
}

#[tokio::test]
async fn malformed_vendor_id_renders_a_400_envelope() {
    let result =
        dashboard::monthly_sales(Path("not-a-vendor-id".to_string()), State(state(MemoryStore::default())))
            .await;
    let err = result.err().unwrap();
    assert!(matches!(err, AppError::BadRequest(_)));

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["type"], "error");
    assert_eq!(body["message"], "vendor_id must be a 24 character hex string");
}

#[tokio::test]
async fn out_of_range_limit_renders_a_400_envelope() {
    let query = ProductSalesQuery {
        page: Some(1),
        limit: Some(101),
        ..ProductSalesQuery::default()
    };
    let result = dashboard::product_sales(
        Path("65a1b2c3d4e5f6a7b8c9d0e1".to_string()),
        Query(query),
        State(state(MemoryStore::default())),
    )
    .await;
    let err = result.err().unwrap();
    assert!(matches!(err, AppError::BadRequest(_)));

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["type"], "error");
    assert_eq!(body["message"], "limit must be between 1 and 100");
}

#[tokio::test]
async fn unknown_vendor_renders_a_404_envelope() {
    let store = MemoryStore {
        vendors: vec![Vendor {
            id: "65a1b2c3d4e5f6a7b8c9d0e1".to_string(),
            name: "Northwind Apparel".to_string(),
        }],
        ..MemoryStore::default()
    };
    let result = dashboard::monthly_sales(
        Path("000000000000000000000000".to_string()),
        State(state(store)),
    )
    .await;
    let err = result.err().unwrap();
    assert!(matches!(err, AppError::NotFound(_)));

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["type"], "error");
    assert_eq!(body["message"], "Vendor not found");
}
