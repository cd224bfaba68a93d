//! SQL for the `client` and `phone` tables.

/// Per-connection settings, applied once when the store opens.
pub const CONNECTION_SETUP: &str = "
PRAGMA foreign_keys = ON;
";

/// File-backed databases additionally use WAL.
pub const FILE_SETUP: &str = "
PRAGMA journal_mode = WAL;
";

/// Schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const CREATE_TABLES: &str = "
CREATE TABLE IF NOT EXISTS client (
    client_id INTEGER PRIMARY KEY,
    name      TEXT NOT NULL,
    surname   TEXT NOT NULL,
    email     TEXT NOT NULL
);

-- Numbers are not unique, within or across clients.
CREATE TABLE IF NOT EXISTS phone (
    phone_id  INTEGER PRIMARY KEY,
    number    TEXT NOT NULL,
    client_id INTEGER NOT NULL REFERENCES client(client_id)
);

CREATE INDEX IF NOT EXISTS phone_number_idx ON phone(number);
CREATE INDEX IF NOT EXISTS phone_client_idx ON phone(client_id);
";

/// Empties and drops both tables. Phones go first to satisfy the foreign key.
/// Fails with `no such table` when the schema is absent.
pub const DROP_TABLES: &str = "
DELETE FROM phone;
DELETE FROM client;
DROP TABLE phone;
DROP TABLE client;
";
