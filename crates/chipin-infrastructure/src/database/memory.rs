//! In-process store for local development and tests.
//!
//! One lock per table; every trait method takes the lock once, so the
//! membership insert in [`GroupRepository::add_member`] is atomic.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use chipin_core::domain::{Group, User};
use chipin_core::error::DomainError;
use chipin_core::repositories::{GroupRepository, UserRepository};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    groups: RwLock<HashMap<Uuid, Group>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a user account. The identity store is otherwise read-only.
    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    pub async fn group_count(&self) -> usize {
        self.groups.read().await.len()
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.email == email)
            .min_by_key(|u| u.created_at)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError> {
        let users = self.users.read().await;
        let mut found: Vec<User> = ids.iter().filter_map(|id| users.get(id).cloned()).collect();
        found.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(found)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }
}

#[async_trait]
impl GroupRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Group>, DomainError> {
        Ok(self.groups.read().await.get(id).cloned())
    }

    async fn create(&self, group: &Group) -> Result<Group, DomainError> {
        let mut groups = self.groups.write().await;
        if groups.contains_key(&group.id) {
            return Err(DomainError::DatabaseError(format!("duplicate group id {}", group.id)));
        }
        groups.insert(group.id, group.clone());
        Ok(group.clone())
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        self.groups.write().await.remove(id);
        Ok(())
    }

    async fn is_member(&self, group_id: &Uuid, user_id: &Uuid) -> Result<bool, DomainError> {
        Ok(self
            .groups
            .read()
            .await
            .get(group_id)
            .is_some_and(|g| g.is_member(user_id)))
    }

    async fn add_member(&self, group_id: &Uuid, user_id: &Uuid) -> Result<bool, DomainError> {
        let mut groups = self.groups.write().await;
        let group = groups
            .get_mut(group_id)
            .ok_or(DomainError::GroupNotFound(*group_id))?;
        Ok(group.members.insert(*user_id))
    }
}
