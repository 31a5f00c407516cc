// handlers/public/users.rs - PUT /users/:id/tags handler

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::error::ApiError;
use crate::services::CredentialError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct TagRequest {
    pub tag: Option<String>,
}

/// PUT /users/:id/tags - Append a tag to a user's stored list
///
/// Expected Input:
/// ```json
/// { "tag": "rust" }
/// ```
///
/// The tag is appended as given: empty strings and duplicates are kept.
/// An unknown or malformed id is a 500 with an empty body.
///
/// Open question: the path id is not checked against the caller's session,
/// so anyone who knows an id can add tags to that account.
pub async fn append_tag(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<TagRequest>>,
) -> Result<StatusCode, ApiError> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    let tag = payload.tag.ok_or(CredentialError::MissingFields)?;

    state.credentials.append_tag(&id, &tag).await?;
    Ok(StatusCode::OK)
}
