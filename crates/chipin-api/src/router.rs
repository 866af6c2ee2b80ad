//! Route table

use std::time::Duration;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::handlers::{groups, health, home, invitations};
use crate::state::AppState;

pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/", get(home::home))
        // Groups
        .route("/groups/create/", post(groups::create_group))
        .route("/groups/{group_id}/", get(groups::group_detail))
        .route("/groups/{group_id}/delete/", post(groups::delete_group))
        // Invitations
        .route(
            "/groups/{group_id}/invite/",
            get(groups::invite_page).post(invitations::send_invitation),
        )
        .route("/groups/{group_id}/accept-invite/", get(invitations::accept_invitation))
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
