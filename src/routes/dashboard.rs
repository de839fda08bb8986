use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::dashboard::{MonthlySale, ProductSalesData},
    error::AppResult,
    models::VendorId,
    response::ApiResponse,
    routes::params::ProductSalesQuery,
    services::dashboard_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/monthly/{vendor_id}", get(monthly_sales))
        .route("/product/{vendor_id}", get(product_sales))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/monthly/{vendor_id}",
    params(
        ("vendor_id" = String, Path, description = "24 character hex vendor id")
    ),
    responses(
        (status = 200, description = "Units sold per month, ascending", body = ApiResponse<Vec<MonthlySale>>),
        (status = 400, description = "Malformed vendor id"),
        (status = 404, description = "Vendor not found"),
    ),
    tag = "Dashboard"
)]
pub async fn monthly_sales(
    Path(vendor_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<MonthlySale>>>> {
    let vendor_id = VendorId::parse(&vendor_id)?;
    let response = dashboard_service::monthly_sales(
        state.vendors.as_ref(),
        state.orders.as_ref(),
        state.products.as_ref(),
        &vendor_id,
    )
    .await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/product/{vendor_id}",
    params(
        ("vendor_id" = String, Path, description = "24 character hex vendor id"),
        ("page" = Option<i64>, Query, description = "Page number, >= 1; paginates only together with limit"),
        ("limit" = Option<i64>, Query, description = "Page size, 1..=100"),
        ("sort_by" = Option<String>, Query, description = "total | code | name | color, default total"),
        ("sort_order" = Option<String>, Query, description = "asc | desc, default desc"),
        ("search" = Option<String>, Query, description = "Case-insensitive filter over code and name"),
    ),
    responses(
        (status = 200, description = "Per-product sales totals", body = ApiResponse<ProductSalesData>),
        (status = 400, description = "Malformed vendor id or out-of-range options"),
        (status = 404, description = "Vendor not found"),
    ),
    tag = "Dashboard"
)]
pub async fn product_sales(
    Path(vendor_id): Path<String>,
    Query(query): Query<ProductSalesQuery>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ProductSalesData>>> {
    let vendor_id = VendorId::parse(&vendor_id)?;
    let options = query.validate()?;
    let response = dashboard_service::product_sales(
        state.vendors.as_ref(),
        state.orders.as_ref(),
        state.products.as_ref(),
        &vendor_id,
        options,
    )
    .await?;
    Ok(Json(response))
}
