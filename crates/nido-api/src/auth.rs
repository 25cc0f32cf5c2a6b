use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};

use nido_db::Database;
use nido_db::models::{ProfilePatch, UserRow};
use nido_types::api::{
    AuthResponse, Claims, LoginRequest, MeResponse, RegisterRequest, UpdateProfileRequest,
    UserResponse,
};
use nido_types::models::Role;

use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::validation_field("name", "Name is required"));
    }
    if !req.email.contains('@') {
        return Err(ApiError::validation_field("email", "Invalid email address"));
    }
    if req.password.len() < 8 {
        return Err(ApiError::validation_field(
            "password",
            "Password must be at least 8 characters",
        ));
    }

    let db = state.clone();
    let email = req.email.clone();
    let existing = tokio::task::spawn_blocking(move || db.db.get_user_by_email(&email)).await??;
    if existing.is_some() {
        return Err(ApiError::Conflict("User already exists".into()));
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))?
        .to_string();

    let db = state.clone();
    let user = tokio::task::spawn_blocking(move || {
        db.db
            .create_user(req.name.trim(), &req.email, &password_hash, req.role.as_str())
    })
    .await??;

    let token = create_token(&state.jwt_secret, user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user_response(user),
            token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let db = state.clone();
    let email = req.email.clone();
    let user = tokio::task::spawn_blocking(move || db.db.get_user_by_email(&email))
        .await??
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".into()))?;

    let parsed_hash = PasswordHash::new(&user.password)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Corrupt credential hash: {}", e)))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".into()))?;

    let token = create_token(&state.jwt_secret, user.id)?;

    Ok(Json(AuthResponse {
        user: user_response(user),
        token,
    }))
}

pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, ApiError> {
    let user = current_user(&state, &claims).await?;
    Ok(Json(MeResponse {
        user: user_response(user),
    }))
}

/// Partial profile update. Role and email never change here; requests
/// carrying them are rejected by the DTO shape, not silently dropped.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(name) = &req.name
        && name.trim().is_empty()
    {
        return Err(ApiError::validation_field("name", "Name cannot be empty"));
    }

    let user = current_user(&state, &claims).await?;

    let patch = ProfilePatch {
        name: req.name.map(|n| n.trim().to_string()),
        bio: req.bio,
        phone: req.phone,
        profile_picture_url: req.profile_picture_url,
    };

    let db = state.clone();
    let id = user.id;
    let updated = tokio::task::spawn_blocking(move || db.db.update_user_profile(id, &patch))
        .await??
        .ok_or_else(ApiError::unauthorized)?;

    Ok(Json(MeResponse {
        user: user_response(updated),
    }))
}

/// Resolve the authenticated identity to a live user row. A valid token for
/// a deleted user is treated the same as an invalid token.
pub(crate) async fn current_user(state: &AppState, claims: &Claims) -> Result<UserRow, ApiError> {
    let db = state.clone();
    let id = claims.sub;
    tokio::task::spawn_blocking(move || db.db.get_user_by_id(id))
        .await??
        .ok_or_else(ApiError::unauthorized)
}

pub(crate) fn user_response(user: UserRow) -> UserResponse {
    let role = user.role().unwrap_or(Role::Tenant);
    UserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        role,
        phone: user.phone,
        bio: user.bio,
        profile_picture_url: user.profile_picture_url,
    }
}

fn create_token(secret: &str, user_id: i64) -> Result<String, ApiError> {
    let claims = Claims {
        sub: user_id,
        exp: (chrono::Utc::now() + chrono::Duration::days(7)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation, decode};

    #[test]
    fn password_hashing_salts_and_verifies() {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(b"correct horse", &salt)
            .unwrap()
            .to_string();
        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(Argon2::default().verify_password(b"correct horse", &parsed).is_ok());
        assert!(Argon2::default().verify_password(b"wrong", &parsed).is_err());
    }

    #[test]
    fn minted_tokens_round_trip() {
        let token = create_token("test-secret", 42).unwrap();
        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(data.claims.sub, 42);
        assert!(data.claims.exp > chrono::Utc::now().timestamp() as usize);
    }

    #[test]
    fn wrong_secret_fails_validation() {
        let token = create_token("test-secret", 42).unwrap();
        assert!(
            decode::<Claims>(
                &token,
                &DecodingKey::from_secret(b"other-secret"),
                &Validation::default(),
            )
            .is_err()
        );
    }
}
