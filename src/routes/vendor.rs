use axum::{Json, Router, extract::State, routing::get};

use crate::{
    error::AppResult, models::Vendor, response::ApiResponse, services::vendor_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_vendors))
}

#[utoipa::path(
    get,
    path = "/api/vendor",
    responses(
        (status = 200, description = "All vendors, sorted by name", body = ApiResponse<Vec<Vendor>>)
    ),
    tag = "Vendors"
)]
pub async fn list_vendors(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<Vendor>>>> {
    let response = vendor_service::list_vendors(state.vendors.as_ref()).await?;
    Ok(Json(response))
}
