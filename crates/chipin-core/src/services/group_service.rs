// ============================================================================
// ChipIn Core - Group Service
// File: crates/chipin-core/src/services/group_service.rs
// ============================================================================
//! Group lifecycle: create, view, delete, and listing users who can be invited

use std::sync::Arc;
use uuid::Uuid;
use tracing::{info, warn};

use crate::domain::{Group, GroupDetail, User};
use crate::error::DomainError;
use crate::policy;
use crate::repositories::{GroupRepository, UserRepository};

pub struct GroupService {
    groups: Arc<dyn GroupRepository>,
    users: Arc<dyn UserRepository>,
}

/// Users that are not yet members of a group.
#[derive(Debug, Clone)]
pub struct InviteCandidates {
    pub group: Group,
    pub users: Vec<User>,
}

impl GroupService {
    pub fn new(groups: Arc<dyn GroupRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { groups, users }
    }

    /// Create a group with `admin` as owner and first member
    pub async fn create_group(&self, admin: &User, name: &str) -> Result<Group, DomainError> {
        let group = Group::new(name, admin.id)?;
        let created = self.groups.create(&group).await?;

        info!(group_id = %created.id, admin_id = %admin.id, "Group \"{}\" created", created.name);
        Ok(created)
    }

    pub async fn get_group(&self, group_id: &Uuid) -> Result<Group, DomainError> {
        self.groups
            .find_by_id(group_id)
            .await?
            .ok_or(DomainError::GroupNotFound(*group_id))
    }

    /// Group with admin and members resolved to user records
    pub async fn group_detail(&self, group_id: &Uuid) -> Result<GroupDetail, DomainError> {
        let group = self.get_group(group_id).await?;

        let member_ids: Vec<Uuid> = group.members.iter().copied().collect();
        let mut members = self.users.find_by_ids(&member_ids).await?;
        members.sort_by(|a, b| a.username.cmp(&b.username));

        let admin = match members.iter().find(|u| u.id == group.admin_id) {
            Some(admin) => Some(admin.clone()),
            None => self.users.find_by_id(&group.admin_id).await?,
        };

        Ok(GroupDetail { group, admin, members })
    }

    /// Delete a group. Only the admin may do this; anyone else gets
    /// `PermissionDenied` and the group is left untouched.
    pub async fn delete_group(&self, caller: &User, group_id: &Uuid) -> Result<Group, DomainError> {
        let group = self.get_group(group_id).await?;

        if !policy::can_delete(caller, &group) {
            warn!(group_id = %group.id, caller_id = %caller.id, "Delete refused: caller is not the group admin");
            return Err(DomainError::PermissionDenied);
        }

        self.groups.delete(&group.id).await?;

        info!(group_id = %group.id, "Group \"{}\" deleted", group.name);
        Ok(group)
    }

    /// Users who are not members of the group, for the invite page
    pub async fn invite_candidates(&self, group_id: &Uuid) -> Result<InviteCandidates, DomainError> {
        let group = self.get_group(group_id).await?;

        let users = self
            .users
            .list()
            .await?
            .into_iter()
            .filter(|u| !group.is_member(&u.id))
            .collect();

        Ok(InviteCandidates { group, users })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{MockGroupRepository, MockUserRepository};
    use mockall::predicate::eq;

    fn service(groups: MockGroupRepository, users: MockUserRepository) -> GroupService {
        GroupService::new(Arc::new(groups), Arc::new(users))
    }

    #[tokio::test]
    async fn test_create_group_persists_with_admin_as_member() {
        let alice = User::new("alice", "alice@example.com");
        let alice_id = alice.id;
        let mut groups = MockGroupRepository::new();
        groups
            .expect_create()
            .withf(move |g: &Group| g.name == "Trip" && g.admin_id == alice_id && g.is_member(&alice_id))
            .times(1)
            .returning(|g| Ok(g.clone()));

        let created = service(groups, MockUserRepository::new())
            .create_group(&alice, " Trip ")
            .await
            .unwrap();
        assert_eq!(created.name, "Trip");
    }

    #[tokio::test]
    async fn test_create_group_rejects_empty_name_without_storing() {
        let mut groups = MockGroupRepository::new();
        groups.expect_create().never();

        let result = service(groups, MockUserRepository::new())
            .create_group(&User::new("alice", "alice@example.com"), "")
            .await;
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_delete_by_non_admin_is_denied_and_nothing_removed() {
        let alice = User::new("alice", "alice@example.com");
        let bob = User::new("bob", "bob@example.com");
        let group = Group::new("g1", alice.id).unwrap();
        let group_id = group.id;

        let mut groups = MockGroupRepository::new();
        groups
            .expect_find_by_id()
            .with(eq(group_id))
            .returning(move |_| Ok(Some(group.clone())));
        groups.expect_delete().never();

        let result = service(groups, MockUserRepository::new())
            .delete_group(&bob, &group_id)
            .await;
        assert!(matches!(result, Err(DomainError::PermissionDenied)));
    }

    #[tokio::test]
    async fn test_delete_by_admin_removes_group() {
        let alice = User::new("alice", "alice@example.com");
        let group = Group::new("g1", alice.id).unwrap();
        let group_id = group.id;

        let mut groups = MockGroupRepository::new();
        groups
            .expect_find_by_id()
            .returning(move |_| Ok(Some(group.clone())));
        groups
            .expect_delete()
            .with(eq(group_id))
            .times(1)
            .returning(|_| Ok(()));

        let deleted = service(groups, MockUserRepository::new())
            .delete_group(&alice, &group_id)
            .await
            .unwrap();
        assert_eq!(deleted.id, group_id);
    }

    #[tokio::test]
    async fn test_missing_group_is_not_found() {
        let mut groups = MockGroupRepository::new();
        groups.expect_find_by_id().returning(|_| Ok(None));

        let err = service(groups, MockUserRepository::new())
            .group_detail(&Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_invite_candidates_excludes_members() {
        let alice = User::new("alice", "alice@example.com");
        let bob = User::new("bob", "bob@example.com");
        let group = Group::new("g1", alice.id).unwrap();

        let mut groups = MockGroupRepository::new();
        groups
            .expect_find_by_id()
            .returning(move |_| Ok(Some(group.clone())));

        let everyone = vec![alice.clone(), bob.clone()];
        let mut users = MockUserRepository::new();
        users.expect_list().returning(move || Ok(everyone.clone()));

        let candidates = service(groups, users)
            .invite_candidates(&Uuid::new_v4())
            .await
            .unwrap();
        assert_eq!(candidates.users, vec![bob]);
    }
}
