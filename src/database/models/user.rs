use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Tags every new account starts with.
pub const DEFAULT_USER_TAGS: [&str; 4] = ["js", "php", "c#", "java"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub user_tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn default_user_tags() -> Vec<String> {
    DEFAULT_USER_TAGS.iter().map(|t| t.to_string()).collect()
}
