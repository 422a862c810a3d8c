//! SQL schema for the Carte SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Accounts. Email uniqueness uses the default BINARY collation, so emails
-- are compared exactly as stored (case-sensitive).
CREATE TABLE IF NOT EXISTS users (
    user_id       TEXT PRIMARY KEY,
    email         TEXT NOT NULL UNIQUE,
    name          TEXT NOT NULL,
    password_hash TEXT NOT NULL,   -- argon2 PHC string
    created_at    TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

-- One card per user, enforced by the UNIQUE constraint on user_id.
CREATE TABLE IF NOT EXISTS cards (
    card_id      TEXT PRIMARY KEY,
    user_id      TEXT NOT NULL UNIQUE REFERENCES users(user_id) ON DELETE CASCADE,
    name         TEXT NOT NULL,
    heading      TEXT,
    description  TEXT,
    job_title    TEXT,
    company_name TEXT,
    video_url    TEXT,
    created_at   TEXT NOT NULL,
    updated_at   TEXT NOT NULL
);

-- Child collections are value-like: an update deletes and reinserts a whole
-- collection, never edits single rows. `position` preserves payload order.
CREATE TABLE IF NOT EXISTS contact_details (
    detail_id TEXT PRIMARY KEY,
    card_id   TEXT NOT NULL REFERENCES cards(card_id) ON DELETE CASCADE,
    position  INTEGER NOT NULL,
    kind      TEXT NOT NULL,    -- free-form; clients use MOBILE/EMAIL/ADDRESS
    value     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS social_links (
    link_id  TEXT PRIMARY KEY,
    card_id  TEXT NOT NULL REFERENCES cards(card_id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    platform TEXT NOT NULL,
    url      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS web_links (
    link_id  TEXT PRIMARY KEY,
    card_id  TEXT NOT NULL REFERENCES cards(card_id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    title    TEXT NOT NULL,
    url      TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS contact_details_card_idx ON contact_details(card_id);
CREATE INDEX IF NOT EXISTS social_links_card_idx    ON social_links(card_id);
CREATE INDEX IF NOT EXISTS web_links_card_idx       ON web_links(card_id);

PRAGMA user_version = 1;
";
