//! SQL schema for the Siddu Verse SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      TEXT NOT NULL UNIQUE,
    email         TEXT NOT NULL UNIQUE COLLATE NOCASE,
    password_hash TEXT NOT NULL,     -- argon2 PHC string
    avatar_url    TEXT,
    role          TEXT NOT NULL DEFAULT 'user',
    created_at    TEXT NOT NULL,     -- RFC 3339 UTC
    updated_at    TEXT NOT NULL
);

-- One profile per user: the UNIQUE on user_id is the only guard that
-- holds under concurrent creates.
CREATE TABLE IF NOT EXISTS talent_profiles (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id         INTEGER NOT NULL UNIQUE REFERENCES users(id),
    full_name       TEXT NOT NULL,
    headline        TEXT,
    bio             TEXT,
    avatar_url      TEXT,
    cover_image_url TEXT,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS skills (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    talent_profile_id INTEGER NOT NULL REFERENCES talent_profiles(id) ON DELETE CASCADE,
    name              TEXT NOT NULL,
    proficiency       TEXT
);

CREATE TABLE IF NOT EXISTS experiences (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    talent_profile_id INTEGER NOT NULL REFERENCES talent_profiles(id) ON DELETE CASCADE,
    title             TEXT NOT NULL,
    company_name      TEXT,
    start_date        TEXT NOT NULL,  -- YYYY-MM-DD
    end_date          TEXT,
    description       TEXT
);

CREATE TABLE IF NOT EXISTS portfolio_items (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    talent_profile_id INTEGER NOT NULL REFERENCES talent_profiles(id) ON DELETE CASCADE,
    title             TEXT NOT NULL,
    description       TEXT,
    media_url         TEXT NOT NULL,
    media_type        TEXT
);

CREATE TABLE IF NOT EXISTS casting_calls (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    posted_by_user_id INTEGER NOT NULL REFERENCES users(id),
    project_title     TEXT NOT NULL,
    project_type      TEXT,
    description       TEXT,
    is_active         INTEGER NOT NULL DEFAULT 1,
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS casting_roles (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    casting_call_id INTEGER NOT NULL REFERENCES casting_calls(id) ON DELETE CASCADE,
    role_name       TEXT NOT NULL,
    description     TEXT,
    requirements    TEXT
);

CREATE TABLE IF NOT EXISTS applications (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    talent_profile_id INTEGER NOT NULL REFERENCES talent_profiles(id),
    casting_call_id   INTEGER NOT NULL REFERENCES casting_calls(id),
    status            TEXT NOT NULL DEFAULT 'pending',
    cover_letter      TEXT,
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL,
    UNIQUE (talent_profile_id, casting_call_id)
);

CREATE TABLE IF NOT EXISTS pulses (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id    INTEGER NOT NULL REFERENCES users(id),
    content    TEXT NOT NULL,
    media_url  TEXT,
    media_type TEXT,
    created_at TEXT NOT NULL
);

-- Likes and comments target a polymorphic owner: ('pulse' | 'movie', id).
CREATE TABLE IF NOT EXISTS likes (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id    INTEGER NOT NULL REFERENCES users(id),
    owner_kind TEXT NOT NULL,
    owner_id   INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE (user_id, owner_kind, owner_id)
);

CREATE TABLE IF NOT EXISTS comments (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id    INTEGER NOT NULL REFERENCES users(id),
    owner_kind TEXT NOT NULL,
    owner_id   INTEGER NOT NULL,
    content    TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS movies (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    title        TEXT NOT NULL,
    poster_url   TEXT,
    sidduscore   REAL NOT NULL DEFAULT 0,
    genre        TEXT,
    release_date TEXT,
    description  TEXT,
    director     TEXT
);

CREATE TABLE IF NOT EXISTS awards (
    id       INTEGER PRIMARY KEY AUTOINCREMENT,
    name     TEXT NOT NULL,
    year     INTEGER,
    logo_url TEXT
);

CREATE TABLE IF NOT EXISTS cricket_matches (
    id     INTEGER PRIMARY KEY AUTOINCREMENT,
    team1  TEXT NOT NULL,
    team2  TEXT NOT NULL,
    date   TEXT,
    venue  TEXT,
    status TEXT NOT NULL DEFAULT 'upcoming',
    score  TEXT
);

CREATE INDEX IF NOT EXISTS skills_profile_idx      ON skills(talent_profile_id);
CREATE INDEX IF NOT EXISTS experiences_profile_idx ON experiences(talent_profile_id);
CREATE INDEX IF NOT EXISTS portfolio_profile_idx   ON portfolio_items(talent_profile_id);
CREATE INDEX IF NOT EXISTS roles_call_idx          ON casting_roles(casting_call_id);
CREATE INDEX IF NOT EXISTS applications_call_idx   ON applications(casting_call_id);
CREATE INDEX IF NOT EXISTS likes_owner_idx         ON likes(owner_kind, owner_id);
CREATE INDEX IF NOT EXISTS comments_owner_idx      ON comments(owner_kind, owner_id);

PRAGMA user_version = 1;
";
