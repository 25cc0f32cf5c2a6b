use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use nido_types::api::{Claims, MessageQuery, SendMessageRequest};
use nido_types::models::Message;

use crate::auth::AppState;
use crate::error::ApiError;

/// Persist a new message addressed to the recipient. The row becomes visible
/// to both parties on the next poll; there is no buffering.
pub async fn send_message(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.content.trim().is_empty() {
        return Err(ApiError::validation_field(
            "content",
            "Message content cannot be empty",
        ));
    }

    let db = state.clone();
    let to_user_id = req.to_user_id;
    let recipient =
        tokio::task::spawn_blocking(move || db.db.get_user_by_id(to_user_id)).await??;
    if recipient.is_none() {
        return Err(ApiError::NotFound("Recipient not found".into()));
    }

    // A property reference must resolve at send time; only deletion after
    // the fact is allowed to leave it dangling.
    if let Some(property_id) = req.property_id {
        let db = state.clone();
        let property =
            tokio::task::spawn_blocking(move || db.db.get_property(property_id)).await??;
        if property.is_none() {
            return Err(ApiError::NotFound("Property not found".into()));
        }
    }

    let db = state.clone();
    let from_user_id = claims.sub;
    let row = tokio::task::spawn_blocking(move || {
        db.db
            .create_message(from_user_id, req.to_user_id, req.property_id, &req.content)
    })
    .await??;

    Ok((StatusCode::CREATED, Json(row.into_message())))
}

/// With `otherUserId`: the 1:1 thread with that counterpart, oldest first.
/// Without it: the flat inbox, newest first. Fetching never touches read
/// state — acknowledging is a separate, explicit operation.
pub async fn get_messages(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let user_id = claims.sub;

    let rows = tokio::task::spawn_blocking(move || match query.other_user_id {
        Some(other) => db.db.get_thread(user_id, other),
        None => db.db.get_user_messages(user_id),
    })
    .await??;

    let messages: Vec<Message> = rows.into_iter().map(|r| r.into_message()).collect();
    Ok(Json(messages))
}
