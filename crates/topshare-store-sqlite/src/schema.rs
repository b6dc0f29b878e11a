//! SQL schema for the income-share SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Reference data: regions and countries are seeded out-of-band and never
-- mutated by the HTTP surface.
CREATE TABLE IF NOT EXISTS regions (
    region_id       INTEGER PRIMARY KEY,
    region_name     TEXT,
    sub_region_name TEXT
);

CREATE TABLE IF NOT EXISTS countries (
    country_id INTEGER PRIMARY KEY,
    name       TEXT NOT NULL,
    region_id  INTEGER REFERENCES regions(region_id)
);

-- year_value is UNIQUE so two racing get-or-create writers cannot both
-- insert the same year; the loser's INSERT OR IGNORE is a no-op.
CREATE TABLE IF NOT EXISTS years (
    year_id    INTEGER PRIMARY KEY,
    year_value INTEGER NOT NULL UNIQUE
);

-- (country_id, year_id) carries no uniqueness constraint, matching the
-- source dataset. At most one row per pair is intended; last-write-wins.
CREATE TABLE IF NOT EXISTS income_shares (
    share_id   INTEGER PRIMARY KEY,
    country_id INTEGER NOT NULL REFERENCES countries(country_id),
    year_id    INTEGER NOT NULL REFERENCES years(year_id),
    top1_share REAL NOT NULL
);

CREATE INDEX IF NOT EXISTS income_shares_country_idx ON income_shares(country_id);
CREATE INDEX IF NOT EXISTS income_shares_year_idx    ON income_shares(year_id);
CREATE INDEX IF NOT EXISTS countries_region_idx      ON countries(region_id);

PRAGMA user_version = 1;
";
