//! SQL schema for the pricewatch SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! the `user_version` number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS products (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    link  TEXT
);

CREATE TABLE IF NOT EXISTS sale_points (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    name    TEXT NOT NULL,
    city    TEXT,
    website TEXT,
    kind    TEXT    -- 'supermarket' | 'electronics' | 'clothing' | 'online' | 'other'
);

-- Calendar days, stored decomposed. Nothing prevents two rows with the
-- same (day, month, year); readers must not assume uniqueness.
CREATE TABLE IF NOT EXISTS dates (
    id    INTEGER PRIMARY KEY AUTOINCREMENT,
    day   INTEGER NOT NULL,
    month INTEGER NOT NULL,
    year  INTEGER NOT NULL
);

-- The central fact table: one observed price per (product, sale point, date).
CREATE TABLE IF NOT EXISTS prices (
    product_id    INTEGER NOT NULL REFERENCES products(id),
    sale_point_id INTEGER NOT NULL REFERENCES sale_points(id),
    date_id       INTEGER NOT NULL REFERENCES dates(id),
    price         REAL NOT NULL,
    PRIMARY KEY (product_id, sale_point_id, date_id)
);

-- A sale point carries a product, independent of any price observation.
CREATE TABLE IF NOT EXISTS product_sale_points (
    product_id    INTEGER NOT NULL REFERENCES products(id),
    sale_point_id INTEGER NOT NULL REFERENCES sale_points(id),
    PRIMARY KEY (product_id, sale_point_id)
);

CREATE INDEX IF NOT EXISTS prices_product_idx    ON prices(product_id);
CREATE INDEX IF NOT EXISTS prices_sale_point_idx ON prices(sale_point_id);
CREATE INDEX IF NOT EXISTS prices_date_idx       ON prices(date_id);

PRAGMA user_version = 1;
";
