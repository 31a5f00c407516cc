pub mod cookie;
pub mod password;

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use self::cookie::{SessionCookie, TOKEN_COOKIE};

/// Session token payload.
///
/// Username and tags are a snapshot taken when the token was issued; they are
/// never refreshed from the store. Registration tokens carry only the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "userTags", default, skip_serializing_if = "Option::is_none")]
    pub user_tags: Option<Vec<String>>,
    pub iat: i64,
}

impl Claims {
    pub fn for_registration(id: Uuid) -> Self {
        Self {
            id,
            username: None,
            user_tags: None,
            iat: Utc::now().timestamp(),
        }
    }

    pub fn for_login(id: Uuid, username: String, user_tags: Vec<String>) -> Self {
        Self {
            id,
            username: Some(username),
            user_tags: Some(user_tags),
            iat: Utc::now().timestamp(),
        }
    }
}

#[derive(Debug)]
pub enum JwtError {
    TokenGeneration(String),
    InvalidSecret,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::TokenGeneration(msg) => write!(f, "JWT generation error: {}", msg),
            JwtError::InvalidSecret => write!(f, "Invalid JWT secret"),
        }
    }
}

impl std::error::Error for JwtError {}

/// Signs and verifies session tokens with a single HS256 secret.
///
/// Tokens carry no `exp` claim, so they stay valid until the secret rotates.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Result<Self, JwtError> {
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        let mut validation = Validation::default();
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    pub fn issue(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Returns the claims of a correctly signed token, `None` for anything else.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        if token.is_empty() {
            return None;
        }

        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!("Rejected session token: {}", e);
                None
            }
        }
    }
}
