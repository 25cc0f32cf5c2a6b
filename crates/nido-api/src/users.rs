use axum::{Json, extract::{Path, State}, response::IntoResponse};

use crate::auth::{AppState, user_response};
use crate::error::ApiError;

/// Public user lookup — lets a tenant see a landlord's contact card.
/// Unauthenticated and restricted to public fields.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let user = tokio::task::spawn_blocking(move || db.db.get_user_by_id(id))
        .await??
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(user_response(user)))
}
