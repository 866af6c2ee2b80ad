//! User repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::User;
use crate::error::DomainError;

#[cfg(test)]
use mockall::automock;

/// Read-only view of the identity store.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<User>, DomainError>;
    /// Exact match, no case folding.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, DomainError>;
    async fn list(&self) -> Result<Vec<User>, DomainError>;
}
