use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Property, Role};

// -- JWT Claims --

/// Token payload carries only the user id and an expiry.
/// Canonical definition lives here so the middleware and the handlers
/// share one shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public projection of a user; never includes the credential hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: UserResponse,
}

/// Role and email are immutable: requests carrying them fail to
/// deserialize instead of being silently dropped.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub profile_picture_url: Option<String>,
}

// -- Properties --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
    pub title: String,
    pub description: String,
    pub address: String,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub price: String,
    pub rooms: i64,
    pub size: i64,
    #[serde(default = "default_available")]
    pub available: bool,
    pub available_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub images: Vec<String>,
}

fn default_available() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub price: Option<String>,
    pub rooms: Option<i64>,
    pub size: Option<i64>,
    pub available: Option<bool>,
    pub available_from: Option<DateTime<Utc>>,
    pub images: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyQuery {
    pub location: Option<String>,
    pub rooms: Option<i64>,
    pub max_price: Option<f64>,
    pub landlord_id: Option<i64>,
}

// -- Messages --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub to_user_id: i64,
    pub property_id: Option<i64>,
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageQuery {
    pub other_user_id: Option<i64>,
}

// -- Favorites --

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    pub property_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteResponse {
    pub id: i64,
    pub user_id: i64,
    pub property_id: i64,
    pub created_at: DateTime<Utc>,
    pub property: Property,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_update_rejects_immutable_fields() {
        assert!(serde_json::from_str::<UpdateProfileRequest>(r#"{"role":"landlord"}"#).is_err());
        assert!(serde_json::from_str::<UpdateProfileRequest>(r#"{"email":"x@example.com"}"#).is_err());

        let ok = serde_json::from_str::<UpdateProfileRequest>(r#"{"name":"New Name","bio":"hi"}"#)
            .unwrap();
        assert_eq!(ok.name.as_deref(), Some("New Name"));
        assert_eq!(ok.bio.as_deref(), Some("hi"));
    }
}
