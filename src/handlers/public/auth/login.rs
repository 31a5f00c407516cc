// handlers/public/auth/login.rs - POST /login handler

use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /login - Authenticate and receive a session cookie
///
/// Expected Input:
/// ```json
/// {
///   "email": "string",
///   "password": "string"
/// }
/// ```
///
/// The session token embeds the email (as `username`) and the tag list as
/// they are right now. Later tag changes are not reflected until the next
/// login.
///
/// Unknown email and wrong password both answer 401 with the same body.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Option<Json<LoginRequest>>,
) -> Result<CookieJar, ApiError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();

    let token = state
        .credentials
        .login(payload.email.as_deref(), payload.password.as_deref())
        .await?;

    Ok(state.session_cookie.set(jar, token))
}
