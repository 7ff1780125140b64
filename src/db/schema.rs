//! Database schema and migrations for clubboard.
//!
//! Migrations are applied in order; the `schema_version` table records
//! which ones have run.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
CREATE TABLE users (
    id             TEXT PRIMARY KEY,        -- chosen by the registrant, case sensitive
    name           TEXT NOT NULL,
    password       TEXT NOT NULL,           -- Argon2 PHC string or legacy SHA-512 hex
    phone_number   TEXT,
    email          TEXT NOT NULL,
    nickname       TEXT NOT NULL,
    last_login_at  TEXT,
    session_id     TEXT,                    -- NULL means no active session
    created_at     TEXT NOT NULL DEFAULT (datetime('now'))
);
"#,
    // v2: posts
    r#"
CREATE TABLE posts (
    id          TEXT PRIMARY KEY,           -- UUID v4
    title       TEXT NOT NULL,
    content     TEXT NOT NULL,
    author_id   TEXT NOT NULL REFERENCES users(id),
    view_count  INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_posts_created_at ON posts(created_at);
CREATE INDEX idx_posts_author_id ON posts(author_id);
"#,
];
