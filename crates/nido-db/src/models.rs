//! Database row types — these map directly to SQLite rows.
//! Distinct from the nido-types API models to keep the DB layer independent
//! of wire concerns; conversions live here.

use chrono::{DateTime, Utc};
use nido_types::models::{Favorite, Message, Property, Role, User};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub profile_picture_url: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct PropertyRow {
    pub id: i64,
    pub landlord_id: i64,
    pub title: String,
    pub description: String,
    pub address: String,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub price: String,
    pub rooms: i64,
    pub size: i64,
    pub available: bool,
    pub available_from: Option<String>,
    /// JSON array of image references.
    pub images: String,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct MessageRow {
    pub id: i64,
    pub from_user_id: i64,
    pub to_user_id: i64,
    pub property_id: Option<i64>,
    pub content: String,
    pub read: bool,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct FavoriteRow {
    pub id: i64,
    pub user_id: i64,
    pub property_id: i64,
    pub created_at: String,
}

/// Parse a stored timestamp. Rows written by this crate carry RFC 3339;
/// the fallback covers SQLite's bare "YYYY-MM-DD HH:MM:SS" form.
pub fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}': {}", raw, e);
            DateTime::default()
        })
}

impl UserRow {
    pub fn into_user(self) -> User {
        let role = Role::parse(&self.role).unwrap_or_else(|| {
            warn!("Corrupt role '{}' on user {}", self.role, self.id);
            Role::Tenant
        });
        User {
            id: self.id,
            name: self.name,
            email: self.email,
            password: self.password,
            role,
            phone: self.phone,
            bio: self.bio,
            profile_picture_url: self.profile_picture_url,
            created_at: parse_timestamp(&self.created_at),
        }
    }

    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }
}

impl PropertyRow {
    pub fn into_property(self) -> Property {
        let images: Vec<String> = serde_json::from_str(&self.images).unwrap_or_else(|e| {
            warn!("Corrupt images payload on property {}: {}", self.id, e);
            Vec::new()
        });
        Property {
            id: self.id,
            landlord_id: self.landlord_id,
            title: self.title,
            description: self.description,
            address: self.address,
            postal_code: self.postal_code,
            city: self.city,
            country: self.country,
            price: self.price,
            rooms: self.rooms,
            size: self.size,
            available: self.available,
            available_from: self.available_from.as_deref().map(parse_timestamp),
            images,
            created_at: parse_timestamp(&self.created_at),
        }
    }
}

impl MessageRow {
    pub fn into_message(self) -> Message {
        Message {
            id: self.id,
            from_user_id: self.from_user_id,
            to_user_id: self.to_user_id,
            property_id: self.property_id,
            content: self.content,
            read: self.read,
            created_at: parse_timestamp(&self.created_at),
        }
    }
}

impl FavoriteRow {
    pub fn into_favorite(self) -> Favorite {
        Favorite {
            id: self.id,
            user_id: self.user_id,
            property_id: self.property_id,
            created_at: parse_timestamp(&self.created_at),
        }
    }
}

/// Field set for inserting a property. Images arrive as a plain list and are
/// serialized to the JSON column by the query layer.
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub landlord_id: i64,
    pub title: String,
    pub description: String,
    pub address: String,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub price: String,
    pub rooms: i64,
    pub size: i64,
    pub available: bool,
    pub available_from: Option<String>,
    pub images: Vec<String>,
}

/// Partial update; None leaves the stored value unchanged.
#[derive(Debug, Clone, Default)]
pub struct PropertyPatch {
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
    pub available_from: Option<String>,
    pub images: Option<Vec<String>>,
}

/// Partial profile update; role and email are immutable by design and have
/// no corresponding fields here.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub profile_picture_url: Option<String>,
}

/// Search filter for the public listing index.
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    /// Case-insensitive substring match on the address.
    pub location: Option<String>,
    pub rooms: Option<i64>,
    /// Upper bound on price.
    pub max_price: Option<f64>,
    pub landlord_id: Option<i64>,
}
