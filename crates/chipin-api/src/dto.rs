//! Request and response payloads

use serde::{Deserialize, Serialize};
use validator::Validate;

use chipin_core::domain::{Group, GroupDetail, Invitation, User};

/// Create group request payload. The name is trimmed and length-checked by `Group::new`.
#[derive(Debug, Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
}

/// Send invitation request payload. The address is not syntax-checked.
#[derive(Debug, Deserialize, Validate)]
pub struct InviteRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GroupDto {
    pub id: String,
    pub name: String,
    pub admin_id: String,
    pub member_ids: Vec<String>,
    pub created_at: String,
}

impl From<&Group> for GroupDto {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id.to_string(),
            name: group.name.clone(),
            admin_id: group.admin_id.to_string(),
            member_ids: group.members.iter().map(|id| id.to_string()).collect(),
            created_at: group.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GroupDetailDto {
    pub id: String,
    pub name: String,
    pub admin: Option<UserDto>,
    pub members: Vec<UserDto>,
    pub created_at: String,
}

impl From<&GroupDetail> for GroupDetailDto {
    fn from(detail: &GroupDetail) -> Self {
        Self {
            id: detail.group.id.to_string(),
            name: detail.group.name.clone(),
            admin: detail.admin.as_ref().map(UserDto::from),
            members: detail.members.iter().map(UserDto::from).collect(),
            created_at: detail.group.created_at.to_rfc3339(),
        }
    }
}

/// Invite page: the group and the users who are not in it yet
#[derive(Debug, Serialize)]
pub struct InvitePageDto {
    pub group: GroupDto,
    pub users_not_in_group: Vec<UserDto>,
}

/// Sent invitation. The link itself is only delivered by email.
#[derive(Debug, Serialize)]
pub struct InvitationDto {
    pub group_id: String,
    pub email: String,
}

impl From<&Invitation> for InvitationDto {
    fn from(invitation: &Invitation) -> Self {
        Self {
            group_id: invitation.group_id.to_string(),
            email: invitation.email.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MembershipDto {
    pub group: GroupDto,
    pub user: UserDto,
}
