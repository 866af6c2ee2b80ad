// ============================================================================
// ChipIn API - Invitation Handlers
// File: crates/chipin-api/src/handlers/invitations.rs
// ============================================================================
//! Sending invitations and visiting invitation links

use axum::{
    extract::{Path, RawQuery, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use chipin_core::services::AcceptOutcome;
use chipin_shared::constants::INVITE_EMAIL_PARAM;
use chipin_shared::FlashMessage;

use super::group_detail_path;
use crate::dto::{GroupDto, InvitationDto, InviteRequest, MembershipDto, UserDto};
use crate::error::ApiError;
use crate::middleware::CurrentUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Send invitation - POST /groups/{group_id}/invite/
///
/// Any signed-in user may invite to any group.
pub async fn send_invitation(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(group_id): Path<Uuid>,
    Json(payload): Json<InviteRequest>,
) -> Result<Json<ApiResponse<InvitationDto>>, ApiError> {
    payload.validate()?;

    let invitation = state
        .invitation_service
        .invite_to_group(&group_id, &payload.email, &state.base_url)
        .await?;

    Ok(Json(
        ApiResponse::success(InvitationDto::from(&invitation))
            .with_flash(FlashMessage::success(format!("Invitation sent to {}", payload.email)))
            .redirect(group_detail_path(&group_id)),
    ))
}

/// Accept invitation - GET /groups/{group_id}/accept-invite/?email=...
///
/// The `email` value is handed to the service still percent-encoded.
pub async fn accept_invitation(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(group_id): Path<Uuid>,
    RawQuery(query): RawQuery,
) -> Result<Json<ApiResponse<MembershipDto>>, ApiError> {
    let encoded_email = query.as_deref().and_then(|q| raw_query_param(q, INVITE_EMAIL_PARAM));

    let outcome = state
        .invitation_service
        .accept_invitation(&group_id, encoded_email)
        .await?;

    let redirect = group_detail_path(&outcome.group().id);
    let response = match outcome {
        AcceptOutcome::Joined { group, user } => {
            let flash = FlashMessage::success(format!(
                "{} has successfully joined the group \"{}\".",
                user.username, group.name
            ));
            ApiResponse::success(membership(&group, &user)).with_flash(flash)
        }
        AcceptOutcome::AlreadyMember { group, user } => {
            let flash = FlashMessage::info(format!(
                "{} is already a member of the group \"{}\".",
                user.username, group.name
            ));
            ApiResponse::success(membership(&group, &user)).with_flash(flash)
        }
        AcceptOutcome::InvalidLink { .. } => {
            ApiResponse::refused(FlashMessage::error("Invalid invitation link."))
        }
    };

    Ok(Json(response.redirect(redirect)))
}

fn membership(group: &chipin_core::Group, user: &chipin_core::User) -> MembershipDto {
    MembershipDto {
        group: GroupDto::from(group),
        user: UserDto::from(user),
    }
}

/// Value of `name` in a raw query string, without decoding it. When the key
/// repeats, the last value wins.
fn raw_query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query.split('&').rev().find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (key == name).then_some(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_query_param() {
        assert_eq!(raw_query_param("email=bob%2Bx%40example.com", "email"), Some("bob%2Bx%40example.com"));
        assert_eq!(raw_query_param("ref=mail&email=a%40b.c", "email"), Some("a%40b.c"));
        assert_eq!(raw_query_param("email=", "email"), Some(""));
        assert_eq!(raw_query_param("email", "email"), Some(""));
        assert_eq!(raw_query_param("emails=x", "email"), None);
        assert_eq!(raw_query_param("email=a%40b.c&email=d%40e.f", "email"), Some("d%40e.f"));
        assert_eq!(raw_query_param("", "email"), None);
    }
}
