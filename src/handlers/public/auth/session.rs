use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::auth::{Claims, SessionCookie};
use crate::state::AppState;

/// Claims from the request's session cookie, if it holds a valid token.
fn current_session(state: &AppState, jar: &CookieJar) -> Option<Claims> {
    let token = SessionCookie::read(jar)?;
    state.tokens.verify(&token)
}

/// GET /session/identity - Id of the logged-in user, or `null`
///
/// Never fails: a missing, empty or badly signed cookie is just "not logged
/// in" and answers `null` with 200.
pub async fn identity(State(state): State<AppState>, jar: CookieJar) -> Json<Option<Uuid>> {
    Json(current_session(&state, &jar).map(|claims| claims.id))
}

/// GET /session/username - Email captured at login, or `null`
///
/// Registration tokens carry no username, so this is `null` until the user
/// logs in.
pub async fn username(State(state): State<AppState>, jar: CookieJar) -> Json<Option<String>> {
    Json(current_session(&state, &jar).and_then(|claims| claims.username))
}

/// GET /session/tags - Tag list captured at login, or `null`
///
/// This is the snapshot from the token, not the stored list.
pub async fn tags(State(state): State<AppState>, jar: CookieJar) -> Json<Option<Vec<String>>> {
    Json(current_session(&state, &jar).and_then(|claims| claims.user_tags))
}

/// GET /session/logout - Replace the session cookie with an expired empty one
///
/// Only the caller's cookie is cleared. The token itself stays valid for
/// anyone still holding it.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> CookieJar {
    state.session_cookie.clear(jar)
}
