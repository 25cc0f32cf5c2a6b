use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use nido_types::api::{AddFavoriteRequest, Claims, FavoriteResponse};
use nido_types::models::Role;

use crate::auth::{AppState, current_user};
use crate::error::ApiError;

async fn require_tenant(state: &AppState, claims: &Claims) -> Result<i64, ApiError> {
    let user = current_user(state, claims).await?;
    if user.role() != Some(Role::Tenant) {
        return Err(ApiError::Forbidden(
            "Only tenants can manage favorites".into(),
        ));
    }
    Ok(user.id)
}

pub async fn list_favorites(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = require_tenant(&state, &claims).await?;

    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.get_favorites(user_id)).await??;

    let favorites: Vec<FavoriteResponse> = rows
        .into_iter()
        .map(|(favorite, property)| {
            let favorite = favorite.into_favorite();
            FavoriteResponse {
                id: favorite.id,
                user_id: favorite.user_id,
                property_id: favorite.property_id,
                created_at: favorite.created_at,
                property: property.into_property(),
            }
        })
        .collect();

    Ok(Json(favorites))
}

/// Duplicate (user, property) pairs are a declared conflict; the uniqueness
/// constraint is the arbiter, so concurrent double-submission cannot slip a
/// second row in.
pub async fn add_favorite(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<AddFavoriteRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = require_tenant(&state, &claims).await?;

    let db = state.clone();
    let property_id = req.property_id;
    let property = tokio::task::spawn_blocking(move || db.db.get_property(property_id)).await??;
    if property.is_none() {
        return Err(ApiError::NotFound("Property not found".into()));
    }

    let db = state.clone();
    let row = tokio::task::spawn_blocking(move || db.db.add_favorite(user_id, property_id))
        .await??
        .ok_or_else(|| ApiError::Conflict("Property already in favorites".into()))?;

    Ok((StatusCode::CREATED, Json(row.into_favorite())))
}

/// Removing an absent favorite is a no-op that still reports success.
pub async fn remove_favorite(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(property_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let user_id = require_tenant(&state, &claims).await?;

    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.remove_favorite(user_id, property_id)).await??;

    Ok(Json(serde_json::json!({
        "message": "Favorite removed successfully"
    })))
}
