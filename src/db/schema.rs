//! Database schema and migrations for VDRIVE.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - users table
    r#"
-- Users table for authentication and account management
CREATE TABLE users (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    username    TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,           -- Argon2 hash
    nickname    TEXT NOT NULL,
    email       TEXT,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    last_login  TEXT,
    is_active   INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX idx_users_username ON users(username);
"#,
    // v2: Refresh tokens for JWT authentication
    r#"
CREATE TABLE refresh_tokens (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    token       TEXT NOT NULL UNIQUE,
    expires_at  TEXT NOT NULL,
    created_at  TEXT NOT NULL DEFAULT (datetime('now')),
    revoked_at  TEXT
);

CREATE INDEX idx_refresh_tokens_user_id ON refresh_tokens(user_id);
"#,
    // v3: Virtual filesystem nodes (files and directories in one table)
    r#"
-- A node is a file or a directory; the two kinds differ only in which
-- optional columns are populated (size_bytes/content_type for files).
CREATE TABLE nodes (
    id              TEXT PRIMARY KEY,                 -- UUIDv4
    owner_id        INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    parent_id       TEXT REFERENCES nodes(id) ON DELETE CASCADE,  -- NULL = root child
    name            TEXT NOT NULL,
    is_directory    INTEGER NOT NULL DEFAULT 0,
    size_bytes      INTEGER,                          -- files only
    content_type    TEXT,                             -- files only
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL,
    deleted_at      TEXT                              -- NULL = live
);

CREATE INDEX idx_nodes_owner_id ON nodes(owner_id);
CREATE INDEX idx_nodes_parent_id ON nodes(parent_id);

-- Live-sibling name uniqueness. Soft-deleted rows are excluded from the
-- uniqueness scope; COALESCE folds the NULL parent of root children into a
-- comparable key. This is what turns a create/rename race into exactly one
-- success and one conflict.
CREATE UNIQUE INDEX idx_nodes_live_sibling_name
    ON nodes(owner_id, COALESCE(parent_id, ''), name)
    WHERE deleted_at IS NULL;
"#,
    // v4: Per-file sharing grants
    r#"
CREATE TABLE share_permissions (
    id                  TEXT PRIMARY KEY,             -- UUIDv4
    node_id             TEXT NOT NULL REFERENCES nodes(id) ON DELETE CASCADE,
    shared_with_user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    granted_by_user_id  INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    permission_level    TEXT NOT NULL,                -- 'view' or 'edit'
    created_at          TEXT NOT NULL,
    updated_at          TEXT NOT NULL,
    UNIQUE (node_id, shared_with_user_id)
);

CREATE INDEX idx_share_permissions_shared_with ON share_permissions(shared_with_user_id);
"#,
    // v5: Published HTML pages
    r#"
CREATE TABLE public_pages (
    id             TEXT PRIMARY KEY,                  -- UUIDv4
    owner_id       INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name           TEXT NOT NULL,
    physical_name  TEXT NOT NULL UNIQUE,              -- blob key on disk
    created_at     TEXT NOT NULL,
    updated_at     TEXT NOT NULL,
    UNIQUE (owner_id, name)
);

CREATE INDEX idx_public_pages_owner_id ON public_pages(owner_id);
"#,
];
