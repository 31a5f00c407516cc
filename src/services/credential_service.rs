use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{Claims, JwtError, TokenService};
use crate::database::manager::DatabaseError;
use crate::database::models::default_user_tags;
use crate::database::repository::UserStore;

pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Please enter all required fields.")]
    MissingFields,
    #[error("Please enter a password of at least 6 characters.")]
    PasswordTooShort,
    #[error("Please enter the same password twice for verification.")]
    PasswordMismatch,
    #[error("An account with this email already exists.")]
    EmailTaken,
    /// Shared by unknown email and wrong password
    #[error("Wrong email or password.")]
    WrongCredentials,
    #[error("User not found: {0}")]
    UserNotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
    #[error("Token error: {0}")]
    Token(#[from] JwtError),
}

/// Registration, login and tag maintenance on top of a user store.
pub struct CredentialService {
    store: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
    bcrypt_cost: u32,
}

/// Treat absent and empty the same way
fn required(value: Option<&str>) -> Result<&str, CredentialError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(CredentialError::MissingFields),
    }
}

impl CredentialService {
    pub fn new(store: Arc<dyn UserStore>, tokens: Arc<TokenService>, bcrypt_cost: u32) -> Self {
        Self {
            store,
            tokens,
            bcrypt_cost,
        }
    }

    /// Create an account and return a session token holding only the new id.
    pub async fn register(
        &self,
        email: Option<&str>,
        password: Option<&str>,
        password_verify: Option<&str>,
    ) -> Result<String, CredentialError> {
        let (email, password, password_verify) =
            match (required(email), required(password), required(password_verify)) {
                (Ok(e), Ok(p), Ok(v)) => (e, p, v),
                _ => return Err(CredentialError::MissingFields),
            };

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(CredentialError::PasswordTooShort);
        }
        if password != password_verify {
            return Err(CredentialError::PasswordMismatch);
        }

        let password_hash = hash_password(password, self.bcrypt_cost)?;

        let user = match self.store.insert(email, &password_hash, &default_user_tags()).await {
            Ok(user) => user,
            Err(DatabaseError::Conflict(_)) => return Err(CredentialError::EmailTaken),
            Err(e) => return Err(e.into()),
        };

        tracing::info!("Registered user {}", user.id);
        Ok(self.tokens.issue(&Claims::for_registration(user.id))?)
    }

    /// Check credentials and return a token with the email and a snapshot of the tags.
    pub async fn login(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<String, CredentialError> {
        let (email, password) = match (required(email), required(password)) {
            (Ok(e), Ok(p)) => (e, p),
            _ => return Err(CredentialError::MissingFields),
        };

        let user = match self.store.find_by_email(email).await? {
            Some(user) => user,
            None => {
                tracing::warn!("Login attempt for unknown email");
                return Err(CredentialError::WrongCredentials);
            }
        };

        if !verify_password(password, &user.password_hash)? {
            tracing::warn!("Wrong password for user {}", user.id);
            return Err(CredentialError::WrongCredentials);
        }

        tracing::info!("User {} logged in", user.id);
        let claims = Claims::for_login(user.id, user.email, user.user_tags);
        Ok(self.tokens.issue(&claims)?)
    }

    /// Append a tag to the user with this id. Not tied to any session.
    pub async fn append_tag(&self, id: &str, tag: &str) -> Result<(), CredentialError> {
        let user_id =
            Uuid::parse_str(id).map_err(|_| CredentialError::UserNotFound(id.to_string()))?;

        if !self.store.append_tag(user_id, tag).await? {
            return Err(CredentialError::UserNotFound(id.to_string()));
        }

        tracing::info!("Appended tag to user {}", user_id);
        Ok(())
    }
}
