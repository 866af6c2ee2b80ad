//! HTTP handlers

pub mod health;
pub mod home;
pub mod groups;
pub mod invitations;

/// Detail page of a group, the usual redirect target.
pub(crate) fn group_detail_path(group_id: &uuid::Uuid) -> String {
    format!("/groups/{}/", group_id)
}

pub(crate) const HOME_PATH: &str = "/";
