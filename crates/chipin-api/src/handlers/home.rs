use axum::{extract::State, Json};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub app: String,
    pub message: String,
}

/// Landing page - GET /
pub async fn home(State(state): State<AppState>) -> Json<ApiResponse<HomeResponse>> {
    Json(ApiResponse::success(HomeResponse {
        message: format!("Welcome to {}. Create a group and invite your friends.", chipin_shared::constants::APP_NAME),
        app: state.app_name,
    }))
}
