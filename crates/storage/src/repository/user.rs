use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::User;
use crate::models::user::role;

/// Read-only repository over the identity directory. Writes belong to the
/// identity service.
pub struct UserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All evaluators an admin has approved, in registration order so the
    /// round-robin fan-out sees a stable sequence.
    pub async fn find_approved_evaluators(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, role, approved, expertise, created_at
            FROM users
            WHERE role = $1 AND approved
            ORDER BY created_at, user_id
            "#,
        )
        .bind(role::EVALUATOR)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    pub async fn find_teams(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, role, approved, expertise, created_at
            FROM users
            WHERE role = $1
            ORDER BY created_at, user_id
            "#,
        )
        .bind(role::TEAM)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, role, approved, expertise, created_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(user)
    }

    /// Users among `ids` that carry the given role. Callers compare the
    /// returned count against the requested count to detect missing or
    /// wrong-role ids.
    pub async fn find_by_ids_with_role(&self, ids: &[Uuid], user_role: &str) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, name, email, role, approved, expertise, created_at
            FROM users
            WHERE user_id = ANY($1) AND role = $2
            "#,
        )
        .bind(ids)
        .bind(user_role)
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }
}
