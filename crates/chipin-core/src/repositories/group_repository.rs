//! Group repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::Group;
use crate::error::DomainError;

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Loads the group together with its member set.
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Group>, DomainError>;
    /// Persists the group and its initial members.
    async fn create(&self, group: &Group) -> Result<Group, DomainError>;
    /// Removes the group and its memberships. Deleting a missing group is not an error.
    async fn delete(&self, id: &Uuid) -> Result<(), DomainError>;
    async fn is_member(&self, group_id: &Uuid, user_id: &Uuid) -> Result<bool, DomainError>;
    /// Adds the user if absent, in one atomic step. Returns `false` when the
    /// user was already a member.
    async fn add_member(&self, group_id: &Uuid, user_id: &Uuid) -> Result<bool, DomainError>;
}
