// ============================================================================
// ChipIn Core - Invitation Service
// File: crates/chipin-core/src/services/invitation_service.rs
// ============================================================================
//! Invitation issuance and acceptance

use std::sync::Arc;
use uuid::Uuid;
use tracing::{error, info, warn};

use chipin_shared::utils::mask_email;

use crate::domain::invitation::decode_email;
use crate::domain::{Group, Invitation, InvitationEmail, User};
use crate::error::DomainError;
use crate::notifier::{Notifier, OutboundEmail};
use crate::repositories::{GroupRepository, UserRepository};

pub struct InvitationService {
    groups: Arc<dyn GroupRepository>,
    users: Arc<dyn UserRepository>,
    notifier: Arc<dyn Notifier>,
}

/// Terminal state of one visit to an invitation link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptOutcome {
    /// The user was added to the member set.
    Joined { group: Group, user: User },
    /// The user was already a member; nothing changed.
    AlreadyMember { group: Group, user: User },
    /// The `email` parameter was missing, empty, or not decodable.
    InvalidLink { group: Group },
}

impl AcceptOutcome {
    pub fn group(&self) -> &Group {
        match self {
            AcceptOutcome::Joined { group, .. }
            | AcceptOutcome::AlreadyMember { group, .. }
            | AcceptOutcome::InvalidLink { group } => group,
        }
    }
}

impl InvitationService {
    pub fn new(
        groups: Arc<dyn GroupRepository>,
        users: Arc<dyn UserRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self { groups, users, notifier }
    }

    /// Build the invitation link for `recipient_email` and mail it.
    ///
    /// Neither the address syntax nor existing membership is checked, and
    /// nothing is persisted. A transport failure is returned as
    /// `DeliveryError` without retrying.
    pub async fn issue_invitation(
        &self,
        group: &Group,
        recipient_email: &str,
        base_url: &str,
    ) -> Result<Invitation, DomainError> {
        let invitation = Invitation::new(group, recipient_email, base_url);
        let content = InvitationEmail::render(group, &invitation)?;

        let email = OutboundEmail {
            to: vec![recipient_email.to_string()],
            subject: content.subject,
            html_body: content.html,
        };

        if let Err(e) = self.notifier.send(&email).await {
            error!(group_id = %group.id, "Failed to send invitation to {}: {}", mask_email(recipient_email), e);
            return Err(DomainError::DeliveryError(e));
        }

        info!(group_id = %group.id, "Invitation sent to {}", mask_email(recipient_email));
        Ok(invitation)
    }

    /// Fetch the group, then issue the invitation.
    pub async fn invite_to_group(
        &self,
        group_id: &Uuid,
        recipient_email: &str,
        base_url: &str,
    ) -> Result<Invitation, DomainError> {
        let group = self.find_group(group_id).await?;
        self.issue_invitation(&group, recipient_email, base_url).await
    }

    /// Handle a visit to an invitation link.
    ///
    /// `encoded_email` is the raw, still percent-encoded query value. A
    /// missing group or an email with no matching user is an error; the other
    /// terminal states are returned as an [`AcceptOutcome`].
    pub async fn accept_invitation(
        &self,
        group_id: &Uuid,
        encoded_email: Option<&str>,
    ) -> Result<AcceptOutcome, DomainError> {
        let group = self.find_group(group_id).await?;

        let email = match encoded_email.filter(|e| !e.is_empty()).and_then(decode_email) {
            Some(email) => email,
            None => {
                warn!(group_id = %group.id, "Invalid invitation link");
                return Ok(AcceptOutcome::InvalidLink { group });
            }
        };

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                warn!(group_id = %group.id, "No user for invited email {}", mask_email(&email));
                DomainError::UserNotFound
            })?;

        if self.groups.is_member(&group.id, &user.id).await? {
            info!(group_id = %group.id, user_id = %user.id, "Invitation visited by existing member");
            return Ok(AcceptOutcome::AlreadyMember { group, user });
        }

        // A concurrent visit may have added the user since the check above.
        if !self.groups.add_member(&group.id, &user.id).await? {
            info!(group_id = %group.id, user_id = %user.id, "Membership added concurrently");
            return Ok(AcceptOutcome::AlreadyMember { group, user });
        }

        let mut group = group;
        group.members.insert(user.id);

        info!(group_id = %group.id, user_id = %user.id, "{} joined group \"{}\"", user.username, group.name);
        Ok(AcceptOutcome::Joined { group, user })
    }

    async fn find_group(&self, group_id: &Uuid) -> Result<Group, DomainError> {
        self.groups
            .find_by_id(group_id)
            .await?
            .ok_or(DomainError::GroupNotFound(*group_id))
    }
}
