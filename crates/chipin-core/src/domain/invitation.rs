// ============================================================================
// ChipIn Core - Invitation
// File: crates/chipin-core/src/domain/invitation.rs
// Description: Stateless invitation links and the invitation email
// ============================================================================
//! An invitation is never stored. It is the group id in the path plus the
//! percent-encoded recipient email in the `email` query parameter:
//!
//! `<base>/groups/<group_id>/accept-invite/?email=<percent-encoded-email>`
//!
//! Links carry no signature and no expiry, so they can be replayed.

use handlebars::Handlebars;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use chipin_shared::constants::{APP_NAME, INVITE_EMAIL_PARAM};
use chipin_shared::utils::trim_base_url;

use super::Group;
use crate::error::DomainError;

const INVITATION_HTML_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<body>
    <p>You have been invited to join the group {{group_name}}.</p>
    <p><a href="{{{invite_link}}}">Accept the invitation</a></p>
    <p>If the button does not work, paste this link into your browser:<br>{{invite_link}}</p>
    <p>{{app_name}}</p>
</body>
</html>"#;

/// An issued invitation link for one recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invitation {
    pub group_id: Uuid,
    pub email: String,
    pub link: String,
}

impl Invitation {
    pub fn new(group: &Group, email: &str, base_url: &str) -> Self {
        let link = format!(
            "{}{}?{}={}",
            trim_base_url(base_url),
            Self::accept_path(&group.id),
            INVITE_EMAIL_PARAM,
            encode_email(email),
        );

        Self {
            group_id: group.id,
            email: email.to_string(),
            link,
        }
    }

    /// Path of the acceptance endpoint for a group, with the trailing slash.
    pub fn accept_path(group_id: &Uuid) -> String {
        format!("/groups/{}/accept-invite/", group_id)
    }
}

/// Percent-encodes everything except unreserved characters, so `+`, `@`,
/// spaces and `&` all survive a trip through a query string.
pub fn encode_email(email: &str) -> String {
    urlencoding::encode(email).into_owned()
}

/// Reverses [`encode_email`]. `+` is left as-is, not read as a space.
pub fn decode_email(encoded: &str) -> Option<String> {
    urlencoding::decode(encoded).ok().map(|cow| cow.into_owned())
}

/// Subject and HTML body of the email sent for an [`Invitation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvitationEmail {
    pub subject: String,
    pub html: String,
}

impl InvitationEmail {
    pub fn render(group: &Group, invitation: &Invitation) -> Result<Self, DomainError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);

        let html = registry
            .render_template(
                INVITATION_HTML_TEMPLATE,
                &json!({
                    "group_name": group.name,
                    "invite_link": invitation.link,
                    "app_name": APP_NAME,
                }),
            )
            .map_err(|e| DomainError::TemplateError(e.to_string()))?;

        Ok(Self {
            subject: format!("You have been invited to join the group {}", group.name),
            html,
        })
    }
}
