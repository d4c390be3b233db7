//! SQL schema for the TVmaze SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Ids come from the upstream catalog; never generated locally.
CREATE TABLE IF NOT EXISTS shows (
    show_id INTEGER PRIMARY KEY,
    name    TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS persons (
    person_id INTEGER PRIMARY KEY,
    name      TEXT NOT NULL,
    birthday  TEXT              -- YYYY-MM-DD or NULL
);

-- Cast membership. Replaced wholesale whenever a show is merged.
CREATE TABLE IF NOT EXISTS show_cast (
    person_id INTEGER NOT NULL REFERENCES persons(person_id) ON DELETE CASCADE,
    show_id   INTEGER NOT NULL REFERENCES shows(show_id)     ON DELETE CASCADE,
    PRIMARY KEY (person_id, show_id)
);

CREATE INDEX IF NOT EXISTS show_cast_show_idx ON show_cast(show_id);

PRAGMA user_version = 1;
";
