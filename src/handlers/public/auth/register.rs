// handlers/public/auth/register.rs - POST /register handler

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "passwordVerify", alias = "passwordConfirmation")]
    pub password_verify: Option<String>,
}

/// POST /register - Create an account and start a session
///
/// Expected Input:
/// ```json
/// {
///   "email": "string",
///   "password": "string",        // at least 6 characters
///   "passwordVerify": "string"   // must equal password
/// }
/// ```
///
/// On success the response body is empty and the `token` cookie carries a
/// session token holding only the new user id. Validation failures and a taken
/// email answer 400 with `{"errorMessage": "..."}`.
///
/// An unparseable body is handled like an empty one, so it fails the
/// required-fields check rather than the JSON extractor.
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Option<Json<RegisterRequest>>,
) -> Result<CookieJar, ApiError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    let token = state
        .credentials
        .register(
            payload.email.as_deref(),
            payload.password.as_deref(),
            payload.password_verify.as_deref(),
        )
        .await?;

    Ok(state.session_cookie.set(jar, token))
}
