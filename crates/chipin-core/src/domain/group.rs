// ============================================================================
// ChipIn Core - Group Entity
// File: crates/chipin-core/src/domain/group.rs
// Description: Named collection with one admin and a member set
// ============================================================================

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::User;

/// Group entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Group {
    pub id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Group name must be between 1 and 100 characters"))]
    pub name: String,

    /// Set at creation and never reassigned.
    pub admin_id: Uuid,

    /// The admin is not required to be a member.
    pub members: BTreeSet<Uuid>,

    pub created_at: DateTime<Utc>,
}

impl Group {
    /// Creates a group owned by `admin_id`. The creator starts out as the only member.
    pub fn new(name: &str, admin_id: Uuid) -> Result<Self, validator::ValidationErrors> {
        let group = Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            admin_id,
            members: BTreeSet::from([admin_id]),
            created_at: Utc::now(),
        };

        group.validate()?;
        Ok(group)
    }

    pub fn is_member(&self, user_id: &Uuid) -> bool {
        self.members.contains(user_id)
    }

    pub fn is_admin(&self, user_id: &Uuid) -> bool {
        self.admin_id == *user_id
    }
}

/// A group with its admin and members resolved against the identity store.
#[derive(Debug, Clone, Serialize)]
pub struct GroupDetail {
    pub group: Group,
    /// `None` when the admin account no longer exists.
    pub admin: Option<User>,
    pub members: Vec<User>,
}
