use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::SecondsFormat;

use nido_db::models::{NewProperty, PropertyFilter, PropertyPatch};
use nido_types::api::{Claims, CreatePropertyRequest, PropertyQuery, UpdatePropertyRequest};
use nido_types::models::{Property, Role};

use crate::auth::{AppState, current_user};
use crate::error::ApiError;

/// Public listing search. Only available listings are returned; maxPrice is
/// an upper bound on the decimal price.
pub async fn list_properties(
    State(state): State<AppState>,
    Query(query): Query<PropertyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = PropertyFilter {
        location: query.location,
        rooms: query.rooms,
        max_price: query.max_price,
        landlord_id: query.landlord_id,
    };

    let db = state.clone();
    let rows = tokio::task::spawn_blocking(move || db.db.list_properties(&filter)).await??;

    let properties: Vec<Property> = rows.into_iter().map(|r| r.into_property()).collect();
    Ok(Json(properties))
}

pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let row = tokio::task::spawn_blocking(move || db.db.get_property(id))
        .await??
        .ok_or_else(|| ApiError::NotFound("Property not found".into()))?;

    Ok(Json(row.into_property()))
}

pub async fn create_property(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreatePropertyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = current_user(&state, &claims).await?;
    if user.role() != Some(Role::Landlord) {
        return Err(ApiError::Forbidden(
            "Only landlords can create properties".into(),
        ));
    }

    if req.title.trim().is_empty() {
        return Err(ApiError::validation_field("title", "Title is required"));
    }
    if req.description.trim().is_empty() {
        return Err(ApiError::validation_field(
            "description",
            "Description is required",
        ));
    }
    if req.address.trim().is_empty() {
        return Err(ApiError::validation_field("address", "Address is required"));
    }
    validate_price(&req.price)?;
    if req.rooms < 1 {
        return Err(ApiError::validation_field("rooms", "Invalid room count"));
    }
    if req.size < 1 {
        return Err(ApiError::validation_field("size", "Invalid size"));
    }

    let new = NewProperty {
        landlord_id: user.id,
        title: req.title,
        description: req.description,
        address: req.address,
        postal_code: req.postal_code,
        city: req.city,
        country: req.country,
        price: req.price,
        rooms: req.rooms,
        size: req.size,
        available: req.available,
        available_from: req
            .available_from
            .map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true)),
        images: req.images,
    };

    let db = state.clone();
    let row = tokio::task::spawn_blocking(move || db.db.create_property(&new)).await??;

    Ok((StatusCode::CREATED, Json(row.into_property())))
}

pub async fn update_property(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePropertyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = current_user(&state, &claims).await?;
    let existing = fetch_property(&state, id).await?;

    if existing.landlord_id != user.id {
        return Err(ApiError::Forbidden(
            "Not authorized to update this property".into(),
        ));
    }

    if let Some(price) = &req.price {
        validate_price(price)?;
    }
    if matches!(req.rooms, Some(r) if r < 1) {
        return Err(ApiError::validation_field("rooms", "Invalid room count"));
    }
    if matches!(req.size, Some(s) if s < 1) {
        return Err(ApiError::validation_field("size", "Invalid size"));
    }

    let patch = PropertyPatch {
        title: req.title,
        description: req.description,
        address: req.address,
        postal_code: req.postal_code,
        city: req.city,
        country: req.country,
        price: req.price,
        rooms: req.rooms,
        size: req.size,
        available: req.available,
        available_from: req
            .available_from
            .map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true)),
        images: req.images,
    };

    let db = state.clone();
    let updated = tokio::task::spawn_blocking(move || db.db.update_property(id, &patch))
        .await??
        .ok_or_else(|| ApiError::NotFound("Property not found".into()))?;

    Ok(Json(updated.into_property()))
}

/// Owner-only. Favorites cascade away; messages referencing the listing stay
/// behind with a dangling property id.
pub async fn delete_property(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let user = current_user(&state, &claims).await?;
    let existing = fetch_property(&state, id).await?;

    if existing.landlord_id != user.id {
        return Err(ApiError::Forbidden(
            "Not authorized to delete this property".into(),
        ));
    }

    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.delete_property(id)).await??;

    Ok(Json(serde_json::json!({
        "message": "Property deleted successfully"
    })))
}

async fn fetch_property(
    state: &AppState,
    id: i64,
) -> Result<nido_db::models::PropertyRow, ApiError> {
    let db = state.clone();
    tokio::task::spawn_blocking(move || db.db.get_property(id))
        .await??
        .ok_or_else(|| ApiError::NotFound("Property not found".into()))
}

fn validate_price(price: &str) -> Result<(), ApiError> {
    match price.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(()),
        _ => Err(ApiError::validation_field("price", "Invalid price")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_must_be_a_non_negative_decimal() {
        assert!(validate_price("1250.00").is_ok());
        assert!(validate_price("0").is_ok());
        assert!(validate_price("-10").is_err());
        assert!(validate_price("NaN").is_err());
        assert!(validate_price("ten euros").is_err());
    }
}
