//! Initial schema.
//!
//! All collections are keyed by string UUIDs and every timestamp
//! column holds a fixed-width ISO-8601 UTC string, so string
//! comparison in SQL equals chronological comparison.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INITIAL_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "DROP TABLE IF EXISTS account_lockouts, login_attempts, audit_logs, fines, \
             fine_types, members, users CASCADE;",
        )
        .await?;
        Ok(())
    }
}

const INITIAL_SQL: &str = r"
-- Club members
CREATE TABLE members (
    id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'aktiv',
    archived_at TEXT,
    created_at TEXT NOT NULL,
    CONSTRAINT chk_member_status CHECK (status IN ('aktiv', 'passiv', 'archiviert'))
);

-- Fine-type catalog
CREATE TABLE fine_types (
    id TEXT PRIMARY KEY,
    label TEXT NOT NULL,
    amount NUMERIC(10, 2),
    created_at TEXT NOT NULL
);

-- Recorded fines; fine_type_label is a snapshot taken at creation
CREATE TABLE fines (
    id TEXT PRIMARY KEY,
    member_id TEXT NOT NULL,
    fine_type_id TEXT NOT NULL,
    fine_type_label TEXT NOT NULL,
    amount NUMERIC(10, 2) NOT NULL,
    date TEXT NOT NULL,
    fiscal_year TEXT NOT NULL,
    notes TEXT,
    CONSTRAINT chk_fine_amount_positive CHECK (amount > 0)
);

-- Query paths: list by fiscal year, cascade delete by member
CREATE INDEX idx_fines_fiscal_year ON fines(fiscal_year);
CREATE INDEX idx_fines_member ON fines(member_id);
CREATE INDEX idx_fines_date ON fines(date DESC);

-- User accounts
CREATE TABLE users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    role TEXT NOT NULL,
    member_id TEXT,
    created_at TEXT NOT NULL,
    CONSTRAINT chk_user_role CHECK (role IN ('spiess', 'kassenwart', 'vorstand', 'admin'))
);

-- Append-only audit trail
CREATE TABLE audit_logs (
    id TEXT PRIMARY KEY,
    timestamp TEXT NOT NULL,
    action TEXT NOT NULL,
    actor TEXT,
    resource_type TEXT NOT NULL,
    resource_id TEXT,
    detail TEXT,
    source_ip TEXT
);

CREATE INDEX idx_audit_logs_timestamp ON audit_logs(timestamp DESC);

-- Time-windowed login attempts for the brute-force guard
CREATE TABLE login_attempts (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL,
    source_ip TEXT NOT NULL,
    attempted_at TEXT NOT NULL,
    success BOOLEAN NOT NULL
);

CREATE INDEX idx_login_attempts_username ON login_attempts(username, attempted_at);
CREATE INDEX idx_login_attempts_source ON login_attempts(source_ip, attempted_at);

-- Lockout records, keyed independently per username and per address
CREATE TABLE account_lockouts (
    id TEXT PRIMARY KEY,
    key_kind TEXT NOT NULL,
    lock_key TEXT NOT NULL,
    expires_at TEXT NOT NULL,
    created_at TEXT NOT NULL,
    CONSTRAINT chk_lockout_kind CHECK (key_kind IN ('username', 'address')),
    CONSTRAINT uq_lockout_key UNIQUE (key_kind, lock_key)
);

CREATE INDEX idx_lockouts_expiry ON account_lockouts(expires_at);
";
