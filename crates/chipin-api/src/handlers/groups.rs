// ============================================================================
// ChipIn API - Group Handlers
// File: crates/chipin-api/src/handlers/groups.rs
// ============================================================================
//! Group create, detail, delete and the invite page

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use chipin_core::DomainError;
use chipin_shared::FlashMessage;

use super::{group_detail_path, HOME_PATH};
use crate::dto::{CreateGroupRequest, GroupDetailDto, GroupDto, InvitePageDto, UserDto};
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Create group - POST /groups/create/
pub async fn create_group(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<CreateGroupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<GroupDto>>), ApiError> {
    let group = state.group_service.create_group(&user, &payload.name).await?;

    let response = ApiResponse::success(GroupDto::from(&group))
        .with_flash(FlashMessage::success(format!("Group \"{}\" created successfully!", group.name)))
        .redirect(group_detail_path(&group.id));

    Ok((StatusCode::CREATED, Json(response)))
}

/// Group detail - GET /groups/{group_id}/
pub async fn group_detail(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(group_id): Path<Uuid>,
) -> Result<Json<ApiResponse<GroupDetailDto>>, ApiError> {
    let detail = state.group_service.group_detail(&group_id).await?;
    Ok(Json(ApiResponse::success(GroupDetailDto::from(&detail))))
}

/// Delete group - POST /groups/{group_id}/delete/
///
/// A non-admin caller gets an error message, not an error status.
pub async fn delete_group(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(group_id): Path<Uuid>,
) -> Result<Json<ApiResponse<GroupDto>>, ApiError> {
    match state.group_service.delete_group(&user, &group_id).await {
        Ok(group) => Ok(Json(
            ApiResponse::success(GroupDto::from(&group))
                .with_flash(FlashMessage::success(format!("Group \"{}\" has been deleted.", group.name)))
                .redirect(HOME_PATH),
        )),
        Err(DomainError::PermissionDenied) => Ok(Json(
            ApiResponse::refused(FlashMessage::error("You do not have permission to delete this group."))
                .redirect(HOME_PATH),
        )),
        Err(e) => Err(e.into()),
    }
}

/// Invite page - GET /groups/{group_id}/invite/
pub async fn invite_page(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(group_id): Path<Uuid>,
) -> Result<Json<ApiResponse<InvitePageDto>>, ApiError> {
    let candidates = state.group_service.invite_candidates(&group_id).await?;

    Ok(Json(ApiResponse::success(InvitePageDto {
        group: GroupDto::from(&candidates.group),
        users_not_in_group: candidates.users.iter().map(UserDto::from).collect(),
    })))
}
