//! Bearer token authentication

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};

use chipin_core::User;

use crate::error::ApiError;
use crate::state::AppState;

/// The authenticated caller, resolved from `Authorization: Bearer <jwt>`.
/// The token subject must be the id of an existing user.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Expected a bearer token".to_string()))?;

        let user_id = state
            .jwt
            .user_id(token)
            .map_err(|e| ApiError::Unauthorized(e.to_string()))?;

        let user = state
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| ApiError::Unauthorized(format!("Unknown user {}", user_id)))?;

        Ok(CurrentUser(user))
    }
}
