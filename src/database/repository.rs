use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::User;

const USER_COLUMNS: &str = "id, email, password_hash, user_tags, created_at, updated_at";

/// Persistence for user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    /// Insert a new user unless the email is already taken.
    ///
    /// The existence check and the write are a single atomic step; a taken
    /// email yields `DatabaseError::Conflict`.
    async fn insert(
        &self,
        email: &str,
        password_hash: &str,
        initial_tags: &[String],
    ) -> Result<User, DatabaseError>;

    /// Append `tag` to the user's list. Duplicates and empty strings are kept.
    /// Returns `false` when no user has this id.
    async fn append_tag(&self, id: Uuid, tag: &str) -> Result<bool, DatabaseError>;

    async fn health_check(&self) -> Result<(), DatabaseError>;
}

/// PostgreSQL-backed store
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(manager: &DatabaseManager) -> Self {
        Self {
            pool: manager.pool().clone(),
        }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = $1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(
        &self,
        email: &str,
        password_hash: &str,
        initial_tags: &[String],
    ) -> Result<User, DatabaseError> {
        let inserted = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (id, email, password_hash, user_tags)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .bind(initial_tags)
        .fetch_optional(&self.pool)
        .await?;

        inserted.ok_or_else(|| DatabaseError::Conflict(format!("email '{}' is taken", email)))
    }

    async fn append_tag(&self, id: Uuid, tag: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE users SET user_tags = array_append(user_tags, $2), updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .bind(tag)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
