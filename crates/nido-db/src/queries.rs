use crate::Database;
use crate::models::{
    FavoriteRow, MessageRow, NewProperty, ProfilePatch, PropertyFilter, PropertyPatch, PropertyRow,
    UserRow,
};
use anyhow::{Result, anyhow};
use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, Row};

/// Timestamps are written from here rather than via SQLite's datetime()
/// default: RFC 3339 with sub-second precision keeps interleaved sends in a
/// stable order (ordering clauses still break ties on id).
fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl Database {
    // -- Users --

    pub fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<UserRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (name, email, password, role, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![name, email, password_hash, role, now()],
            )?;
            let id = conn.last_insert_rowid();
            query_user_by_id(conn, id)?.ok_or_else(|| anyhow!("User {} vanished after insert", id))
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{USER_COLUMNS} WHERE email = ?1"))?;
            stmt.query_row([email], map_user).optional()
        })
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_id(conn, id))
    }

    /// Batch-fetch users for a set of ids (display-name resolution).
    pub fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<UserRow>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        self.with_conn(|conn| {
            let placeholders: Vec<String> = (1..=ids.len()).map(|i| format!("?{}", i)).collect();
            let sql = format!("{USER_COLUMNS} WHERE id IN ({})", placeholders.join(", "));

            let mut stmt = conn.prepare(&sql)?;
            let params: Vec<&dyn rusqlite::types::ToSql> =
                ids.iter().map(|id| id as &dyn rusqlite::types::ToSql).collect();

            let rows = stmt
                .query_map(params.as_slice(), map_user)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Apply a partial profile update. Email and role are immutable.
    pub fn update_user_profile(&self, id: i64, patch: &ProfilePatch) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE users SET
                    name                = COALESCE(?2, name),
                    bio                 = COALESCE(?3, bio),
                    phone               = COALESCE(?4, phone),
                    profile_picture_url = COALESCE(?5, profile_picture_url)
                 WHERE id = ?1",
                rusqlite::params![
                    id,
                    patch.name,
                    patch.bio,
                    patch.phone,
                    patch.profile_picture_url
                ],
            )?;
            query_user_by_id(conn, id)
        })
    }

    // -- Properties --

    pub fn create_property(&self, new: &NewProperty) -> Result<PropertyRow> {
        self.with_conn(|conn| {
            let images = serde_json::to_string(&new.images)?;
            conn.execute(
                "INSERT INTO properties
                    (landlord_id, title, description, address, postal_code, city, country,
                     price, rooms, size, available, available_from, images, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                rusqlite::params![
                    new.landlord_id,
                    new.title,
                    new.description,
                    new.address,
                    new.postal_code,
                    new.city,
                    new.country,
                    new.price,
                    new.rooms,
                    new.size,
                    new.available,
                    new.available_from,
                    images,
                    now()
                ],
            )?;
            let id = conn.last_insert_rowid();
            query_property_by_id(conn, id)?
                .ok_or_else(|| anyhow!("Property {} vanished after insert", id))
        })
    }

    pub fn get_property(&self, id: i64) -> Result<Option<PropertyRow>> {
        self.with_conn(|conn| query_property_by_id(conn, id))
    }

    /// Filtered listing search. Only available listings are ever returned;
    /// max_price is an upper bound on the stored decimal price.
    pub fn list_properties(&self, filter: &PropertyFilter) -> Result<Vec<PropertyRow>> {
        self.with_conn(|conn| {
            let mut sql = format!("{PROPERTY_COLUMNS} WHERE available = 1");
            let mut params: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

            if let Some(location) = &filter.location {
                params.push(Box::new(format!("%{}%", location)));
                sql.push_str(&format!(" AND address LIKE ?{}", params.len()));
            }
            if let Some(rooms) = filter.rooms {
                params.push(Box::new(rooms));
                sql.push_str(&format!(" AND rooms = ?{}", params.len()));
            }
            if let Some(max_price) = filter.max_price {
                params.push(Box::new(max_price));
                sql.push_str(&format!(" AND CAST(price AS REAL) <= ?{}", params.len()));
            }
            if let Some(landlord_id) = filter.landlord_id {
                params.push(Box::new(landlord_id));
                sql.push_str(&format!(" AND landlord_id = ?{}", params.len()));
            }

            sql.push_str(" ORDER BY created_at DESC, id DESC");

            let mut stmt = conn.prepare(&sql)?;
            let param_refs: Vec<&dyn rusqlite::types::ToSql> =
                params.iter().map(|p| p.as_ref()).collect();
            let rows = stmt
                .query_map(param_refs.as_slice(), map_property)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn update_property(&self, id: i64, patch: &PropertyPatch) -> Result<Option<PropertyRow>> {
        self.with_conn(|conn| {
            let images = match &patch.images {
                Some(images) => Some(serde_json::to_string(images)?),
                None => None,
            };
            conn.execute(
                "UPDATE properties SET
                    title          = COALESCE(?2, title),
                    description    = COALESCE(?3, description),
                    address        = COALESCE(?4, address),
                    postal_code    = COALESCE(?5, postal_code),
                    city           = COALESCE(?6, city),
                    country        = COALESCE(?7, country),
                    price          = COALESCE(?8, price),
                    rooms          = COALESCE(?9, rooms),
                    size           = COALESCE(?10, size),
                    available      = COALESCE(?11, available),
                    available_from = COALESCE(?12, available_from),
                    images         = COALESCE(?13, images)
                 WHERE id = ?1",
                rusqlite::params![
                    id,
                    patch.title,
                    patch.description,
                    patch.address,
                    patch.postal_code,
                    patch.city,
                    patch.country,
                    patch.price,
                    patch.rooms,
                    patch.size,
                    patch.available,
                    patch.available_from,
                    images
                ],
            )?;
            query_property_by_id(conn, id)
        })
    }

    pub fn delete_property(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM properties WHERE id = ?1", [id])?;
            Ok(affected > 0)
        })
    }

    /// Batch-fetch titles for a set of property ids. Deleted listings are
    /// simply absent from the result.
    pub fn get_property_titles(&self, ids: &[i64]) -> Result<Vec<(i64, String)>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        self.with_conn(|conn| {
            let placeholders: Vec<String> = (1..=ids.len()).map(|i| format!("?{}", i)).collect();
            let sql = format!(
                "SELECT id, title FROM properties WHERE id IN ({})",
                placeholders.join(", ")
            );

            let mut stmt = conn.prepare(&sql)?;
            let params: Vec<&dyn rusqlite::types::ToSql> =
                ids.iter().map(|id| id as &dyn rusqlite::types::ToSql).collect();

            let rows = stmt
                .query_map(params.as_slice(), |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    // -- Messages --

    pub fn create_message(
        &self,
        from_user_id: i64,
        to_user_id: i64,
        property_id: Option<i64>,
        content: &str,
    ) -> Result<MessageRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (from_user_id, to_user_id, property_id, content, read, created_at)
                 VALUES (?1, ?2, ?3, ?4, 0, ?5)",
                rusqlite::params![from_user_id, to_user_id, property_id, content, now()],
            )?;
            let id = conn.last_insert_rowid();
            query_message_by_id(conn, id)?
                .ok_or_else(|| anyhow!("Message {} vanished after insert", id))
        })
    }

    /// All messages between the pair, oldest first — thread display order.
    pub fn get_thread(&self, user_id: i64, other_user_id: i64) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{MESSAGE_COLUMNS}
                 WHERE (from_user_id = ?1 AND to_user_id = ?2)
                    OR (from_user_id = ?2 AND to_user_id = ?1)
                 ORDER BY created_at ASC, id ASC"
            ))?;
            let rows = stmt
                .query_map([user_id, other_user_id], map_message)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Every message the user sent or received, newest first. Feeds both the
    /// flat inbox view and the conversation aggregation pass.
    pub fn get_user_messages(&self, user_id: i64) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{MESSAGE_COLUMNS}
                 WHERE from_user_id = ?1 OR to_user_id = ?1
                 ORDER BY created_at DESC, id DESC"
            ))?;
            let rows = stmt
                .query_map([user_id], map_message)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Flip unread messages from the counterpart to read. Conditional on
    /// read = 0, so it is idempotent and safe under concurrent invocation.
    /// Returns the number of rows transitioned.
    pub fn mark_conversation_read(&self, user_id: i64, other_user_id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "UPDATE messages SET read = 1
                 WHERE from_user_id = ?2 AND to_user_id = ?1 AND read = 0",
                [user_id, other_user_id],
            )?;
            Ok(affected)
        })
    }

    // -- Favorites --

    /// Insert a favorite. Returns None when the (user, property) pair already
    /// exists — the UNIQUE constraint is the arbiter, so concurrent
    /// double-submission cannot produce a duplicate row.
    pub fn add_favorite(&self, user_id: i64, property_id: i64) -> Result<Option<FavoriteRow>> {
        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT INTO favorites (user_id, property_id, created_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![user_id, property_id, now()],
            );

            match inserted {
                Ok(_) => {
                    let id = conn.last_insert_rowid();
                    let row = conn.query_row(
                        "SELECT id, user_id, property_id, created_at FROM favorites WHERE id = ?1",
                        [id],
                        map_favorite,
                    )?;
                    Ok(Some(row))
                }
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Ok(None)
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn remove_favorite(&self, user_id: i64, property_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let affected = conn.execute(
                "DELETE FROM favorites WHERE user_id = ?1 AND property_id = ?2",
                [user_id, property_id],
            )?;
            Ok(affected > 0)
        })
    }

    /// Favorites joined with their listing, newest first.
    pub fn get_favorites(&self, user_id: i64) -> Result<Vec<(FavoriteRow, PropertyRow)>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT f.id, f.user_id, f.property_id, f.created_at,
                        p.id, p.landlord_id, p.title, p.description, p.address,
                        p.postal_code, p.city, p.country, p.price, p.rooms, p.size,
                        p.available, p.available_from, p.images, p.created_at
                 FROM favorites f
                 INNER JOIN properties p ON f.property_id = p.id
                 WHERE f.user_id = ?1
                 ORDER BY f.created_at DESC, f.id DESC",
            )?;
            let rows = stmt
                .query_map([user_id], |row| {
                    let favorite = FavoriteRow {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        property_id: row.get(2)?,
                        created_at: row.get(3)?,
                    };
                    let property = PropertyRow {
                        id: row.get(4)?,
                        landlord_id: row.get(5)?,
                        title: row.get(6)?,
                        description: row.get(7)?,
                        address: row.get(8)?,
                        postal_code: row.get(9)?,
                        city: row.get(10)?,
                        country: row.get(11)?,
                        price: row.get(12)?,
                        rooms: row.get(13)?,
                        size: row.get(14)?,
                        available: row.get(15)?,
                        available_from: row.get(16)?,
                        images: row.get(17)?,
                        created_at: row.get(18)?,
                    };
                    Ok((favorite, property))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

const USER_COLUMNS: &str = "SELECT id, name, email, password, role, phone, bio, \
                            profile_picture_url, created_at FROM users";

const PROPERTY_COLUMNS: &str = "SELECT id, landlord_id, title, description, address, \
                                postal_code, city, country, price, rooms, size, available, \
                                available_from, images, created_at FROM properties";

const MESSAGE_COLUMNS: &str = "SELECT id, from_user_id, to_user_id, property_id, content, \
                               read, created_at FROM messages";

fn map_user(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
        role: row.get(4)?,
        phone: row.get(5)?,
        bio: row.get(6)?,
        profile_picture_url: row.get(7)?,
        created_at: row.get(8)?,
    })
}

fn map_property(row: &Row<'_>) -> rusqlite::Result<PropertyRow> {
    Ok(PropertyRow {
        id: row.get(0)?,
        landlord_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        address: row.get(4)?,
        postal_code: row.get(5)?,
        city: row.get(6)?,
        country: row.get(7)?,
        price: row.get(8)?,
        rooms: row.get(9)?,
        size: row.get(10)?,
        available: row.get(11)?,
        available_from: row.get(12)?,
        images: row.get(13)?,
        created_at: row.get(14)?,
    })
}

fn map_message(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        from_user_id: row.get(1)?,
        to_user_id: row.get(2)?,
        property_id: row.get(3)?,
        content: row.get(4)?,
        read: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn map_favorite(row: &Row<'_>) -> rusqlite::Result<FavoriteRow> {
    Ok(FavoriteRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        property_id: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn query_user_by_id(conn: &Connection, id: i64) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(&format!("{USER_COLUMNS} WHERE id = ?1"))?;
    stmt.query_row([id], map_user).optional()
}

fn query_property_by_id(conn: &Connection, id: i64) -> Result<Option<PropertyRow>> {
    let mut stmt = conn.prepare(&format!("{PROPERTY_COLUMNS} WHERE id = ?1"))?;
    stmt.query_row([id], map_property).optional()
}

fn query_message_by_id(conn: &Connection, id: i64) -> Result<Option<MessageRow>> {
    let mut stmt = conn.prepare(&format!("{MESSAGE_COLUMNS} WHERE id = ?1"))?;
    stmt.query_row([id], map_message).optional()
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewProperty, PropertyFilter, PropertyPatch};

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn tenant(db: &Database, email: &str) -> i64 {
        db.create_user("Test Tenant", email, "hash", "tenant").unwrap().id
    }

    fn landlord(db: &Database, email: &str) -> i64 {
        db.create_user("Test Landlord", email, "hash", "landlord").unwrap().id
    }

    fn listing(db: &Database, landlord_id: i64, title: &str, price: &str) -> i64 {
        db.create_property(&NewProperty {
            landlord_id,
            title: title.into(),
            description: "Bright and quiet".into(),
            address: "12 Elm Street, Springfield".into(),
            postal_code: None,
            city: Some("Springfield".into()),
            country: None,
            price: price.into(),
            rooms: 3,
            size: 72,
            available: true,
            available_from: None,
            images: vec![],
        })
        .unwrap()
        .id
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let db = db();
        tenant(&db, "a@example.com");
        assert!(db.create_user("Dup", "a@example.com", "hash", "tenant").is_err());
    }

    #[test]
    fn profile_patch_leaves_unset_fields_alone() {
        let db = db();
        let id = tenant(&db, "a@example.com");
        db.update_user_profile(
            id,
            &ProfilePatch { bio: Some("Looking for a flat".into()), ..Default::default() },
        )
        .unwrap();
        let user = db
            .update_user_profile(id, &ProfilePatch { name: Some("Renamed".into()), ..Default::default() })
            .unwrap()
            .unwrap();
        assert_eq!(user.name, "Renamed");
        assert_eq!(user.bio.as_deref(), Some("Looking for a flat"));
        assert_eq!(user.email, "a@example.com");
    }

    #[test]
    fn max_price_filter_is_an_upper_bound() {
        let db = db();
        let owner = landlord(&db, "l@example.com");
        listing(&db, owner, "Cheap", "800.00");
        listing(&db, owner, "Mid", "1200.00");
        listing(&db, owner, "Expensive", "2400.00");

        let hits = db
            .list_properties(&PropertyFilter { max_price: Some(1200.0), ..Default::default() })
            .unwrap();
        let titles: Vec<_> = hits.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles.len(), 2);
        assert!(titles.contains(&"Cheap"));
        assert!(titles.contains(&"Mid"));
    }

    #[test]
    fn search_excludes_unavailable_listings() {
        let db = db();
        let owner = landlord(&db, "l@example.com");
        let id = listing(&db, owner, "Gone", "900.00");
        listing(&db, owner, "Here", "900.00");

        db.update_property(id, &PropertyPatch { available: Some(false), ..Default::default() })
            .unwrap();

        let hits = db.list_properties(&PropertyFilter::default()).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Here");
    }

    #[test]
    fn location_filter_matches_address_substring() {
        let db = db();
        let owner = landlord(&db, "l@example.com");
        listing(&db, owner, "Springfield flat", "900.00");

        let hits = db
            .list_properties(&PropertyFilter { location: Some("elm".into()), ..Default::default() })
            .unwrap();
        assert_eq!(hits.len(), 1);

        let misses = db
            .list_properties(&PropertyFilter { location: Some("oak".into()), ..Default::default() })
            .unwrap();
        assert!(misses.is_empty());
    }

    #[test]
    fn thread_is_pair_scoped_and_ascending() {
        let db = db();
        let alice = tenant(&db, "alice@example.com");
        let bob = landlord(&db, "bob@example.com");
        let carol = tenant(&db, "carol@example.com");

        db.create_message(alice, bob, None, "first").unwrap();
        db.create_message(bob, alice, None, "second").unwrap();
        db.create_message(carol, bob, None, "unrelated").unwrap();
        db.create_message(alice, bob, None, "third").unwrap();

        let thread = db.get_thread(alice, bob).unwrap();
        let contents: Vec<_> = thread.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        for m in &thread {
            let pair = (m.from_user_id, m.to_user_id);
            assert!(pair == (alice, bob) || pair == (bob, alice));
        }
        for pair in thread.windows(2) {
            assert!(pair[0].created_at <= pair[1].created_at);
        }
    }

    #[test]
    fn inbox_is_descending() {
        let db = db();
        let alice = tenant(&db, "alice@example.com");
        let bob = landlord(&db, "bob@example.com");

        db.create_message(alice, bob, None, "older").unwrap();
        db.create_message(bob, alice, None, "newer").unwrap();

        let inbox = db.get_user_messages(alice).unwrap();
        let contents: Vec<_> = inbox.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["newer", "older"]);
    }

    #[test]
    fn fetching_never_flips_read_state() {
        let db = db();
        let alice = tenant(&db, "alice@example.com");
        let bob = landlord(&db, "bob@example.com");

        db.create_message(bob, alice, None, "hello").unwrap();
        db.get_thread(alice, bob).unwrap();
        db.get_user_messages(alice).unwrap();

        let thread = db.get_thread(alice, bob).unwrap();
        assert!(!thread[0].read);
    }

    #[test]
    fn mark_read_is_directional_and_idempotent() {
        let db = db();
        let alice = tenant(&db, "alice@example.com");
        let bob = landlord(&db, "bob@example.com");

        db.create_message(bob, alice, None, "to alice").unwrap();
        db.create_message(alice, bob, None, "to bob").unwrap();

        let flipped = db.mark_conversation_read(alice, bob).unwrap();
        assert_eq!(flipped, 1);

        let thread = db.get_thread(alice, bob).unwrap();
        let to_alice = thread.iter().find(|m| m.to_user_id == alice).unwrap();
        let to_bob = thread.iter().find(|m| m.to_user_id == bob).unwrap();
        assert!(to_alice.read);
        // The sender's own outgoing message is untouched.
        assert!(!to_bob.read);

        let again = db.mark_conversation_read(alice, bob).unwrap();
        assert_eq!(again, 0);
    }

    #[test]
    fn duplicate_favorite_conflicts_and_set_stays_at_one() {
        let db = db();
        let renter = tenant(&db, "t@example.com");
        let owner = landlord(&db, "l@example.com");
        let prop = listing(&db, owner, "Loft", "1000.00");

        assert!(db.add_favorite(renter, prop).unwrap().is_some());
        assert!(db.add_favorite(renter, prop).unwrap().is_none());
        assert_eq!(db.get_favorites(renter).unwrap().len(), 1);
    }

    #[test]
    fn deleting_a_listing_cascades_favorites_but_keeps_messages() {
        let db = db();
        let renter = tenant(&db, "t@example.com");
        let owner = landlord(&db, "l@example.com");
        let prop = listing(&db, owner, "Loft", "1000.00");

        db.add_favorite(renter, prop).unwrap();
        db.create_message(renter, owner, Some(prop), "Is it still free?").unwrap();

        assert!(db.delete_property(prop).unwrap());
        assert!(db.get_favorites(renter).unwrap().is_empty());

        // The thread stays legible with its dangling property reference.
        let thread = db.get_thread(renter, owner).unwrap();
        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0].property_id, Some(prop));
        assert!(db.get_property_titles(&[prop]).unwrap().is_empty());
    }

    #[test]
    fn batch_lookups_handle_empty_input() {
        let db = db();
        assert!(db.get_users_by_ids(&[]).unwrap().is_empty());
        assert!(db.get_property_titles(&[]).unwrap().is_empty());
    }
}
