use axum::Router;

use crate::state::AppState;

pub mod dashboard;
pub mod doc;
pub mod health;
pub mod params;
pub mod vendor;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/vendor", vendor::router())
        .nest("/dashboard", dashboard::router())
}
