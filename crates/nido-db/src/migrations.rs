use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            name                TEXT NOT NULL,
            email               TEXT NOT NULL UNIQUE,
            password            TEXT NOT NULL,
            role                TEXT NOT NULL CHECK (role IN ('tenant', 'landlord')),
            phone               TEXT,
            bio                 TEXT,
            profile_picture_url TEXT,
            created_at          TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS properties (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            landlord_id     INTEGER NOT NULL REFERENCES users(id),
            title           TEXT NOT NULL,
            description     TEXT NOT NULL,
            address         TEXT NOT NULL,
            postal_code     TEXT,
            city            TEXT,
            country         TEXT,
            price           TEXT NOT NULL,
            rooms           INTEGER NOT NULL,
            size            INTEGER NOT NULL,
            available       INTEGER NOT NULL DEFAULT 1,
            available_from  TEXT,
            images          TEXT NOT NULL DEFAULT '[]',
            created_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_properties_landlord
            ON properties(landlord_id);
        CREATE INDEX IF NOT EXISTS idx_properties_available
            ON properties(available, created_at);

        -- property_id is a soft reference on purpose: deleting a listing
        -- must leave existing message threads legible.
        CREATE TABLE IF NOT EXISTS messages (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            from_user_id    INTEGER NOT NULL REFERENCES users(id),
            to_user_id      INTEGER NOT NULL REFERENCES users(id),
            property_id     INTEGER,
            content         TEXT NOT NULL,
            read            INTEGER NOT NULL DEFAULT 0,
            created_at      TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_messages_from
            ON messages(from_user_id, created_at);
        CREATE INDEX IF NOT EXISTS idx_messages_to
            ON messages(to_user_id, created_at);
        CREATE INDEX IF NOT EXISTS idx_messages_unread
            ON messages(to_user_id, read);

        CREATE TABLE IF NOT EXISTS favorites (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     INTEGER NOT NULL REFERENCES users(id),
            property_id INTEGER NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
            created_at  TEXT NOT NULL,
            UNIQUE(user_id, property_id)
        );

        CREATE INDEX IF NOT EXISTS idx_favorites_user
            ON favorites(user_id);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
