// ============================================================================
// ChipIn Infrastructure - PostgreSQL Group Repository
// File: crates/chipin-infrastructure/src/database/postgres/group_repo_impl.rs
// ============================================================================

use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use tracing::{error, info};
use chrono::{DateTime, Utc};

use chipin_core::domain::Group;
use chipin_core::error::DomainError;
use chipin_core::repositories::GroupRepository;

pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct GroupRow {
    pub id: Uuid,
    pub name: String,
    pub admin_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl GroupRow {
    fn into_group(self, members: BTreeSet<Uuid>) -> Group {
        Group {
            id: self.id,
            name: self.name,
            admin_id: self.admin_id,
            members,
            created_at: self.created_at,
        }
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    error!("Database error {}: {}", context, e);
    DomainError::DatabaseError(e.to_string())
}

/// Default Postgres names of the `group_members` foreign keys.
const GROUP_FK: &str = "group_members_group_id_fkey";
const USER_FK: &str = "group_members_user_id_fkey";

/// A membership insert that loses a race with a delete hits a foreign key
/// violation; report it as the missing row, like the memory store does.
fn add_member_error(group_id: &Uuid, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_foreign_key_violation() {
            match db.constraint() {
                Some(GROUP_FK) => return DomainError::GroupNotFound(*group_id),
                Some(USER_FK) => return DomainError::UserNotFound,
                _ => {}
            }
        }
    }
    db_error("adding group member", e)
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Group>, DomainError> {
        let row: Option<GroupRow> = sqlx::query_as(
            r#"
            SELECT id, name, admin_id, created_at
            FROM groups
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("finding group by id", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let members: Vec<Uuid> = sqlx::query_scalar(
            r#"
            SELECT user_id
            FROM group_members
            WHERE group_id = $1
            "#
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("loading group members", e))?;

        Ok(Some(row.into_group(members.into_iter().collect())))
    }

    async fn create(&self, group: &Group) -> Result<Group, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting transaction", e))?;

        let row: GroupRow = sqlx::query_as(
            r#"
            INSERT INTO groups (id, name, admin_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, admin_id, created_at
            "#
        )
        .bind(group.id)
        .bind(&group.name)
        .bind(group.admin_id)
        .bind(group.created_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("creating group", e))?;

        for user_id in &group.members {
            sqlx::query(
                r#"
                INSERT INTO group_members (group_id, user_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                "#
            )
            .bind(group.id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("adding initial group member", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| db_error("committing group creation", e))?;

        info!("Group created successfully: {}", row.id);
        Ok(row.into_group(group.members.clone()))
    }

    async fn delete(&self, id: &Uuid) -> Result<(), DomainError> {
        // Memberships go with the group (ON DELETE CASCADE).
        sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting group", e))?;

        Ok(())
    }

    async fn is_member(&self, group_id: &Uuid, user_id: &Uuid) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM group_members WHERE group_id = $1 AND user_id = $2
            )
            "#
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("checking group membership", e))
    }

    async fn add_member(&self, group_id: &Uuid, user_id: &Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO group_members (group_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (group_id, user_id) DO NOTHING
            "#
        )
        .bind(group_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| add_member_error(group_id, e))?;

        Ok(result.rows_affected() == 1)
    }
}
