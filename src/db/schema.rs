//! Database schema and migrations for inkpost.
//!
//! Migrations are applied in order when the database is opened. The
//! `schema_version` table tracks which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    email       TEXT NOT NULL,
    name        TEXT NOT NULL,
    password    TEXT NOT NULL           -- bcrypt hash
);

CREATE UNIQUE INDEX idx_users_email ON users(email COLLATE NOCASE);
"#,
    // v2: posts
    r#"
CREATE TABLE posts (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    title       TEXT NOT NULL,
    content     TEXT NOT NULL
);
"#,
];
