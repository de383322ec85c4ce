//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the seven collections
//! - Repository abstractions for data access
//! - The login guard wiring attempt/lockout records to the core
//!   lockout policy
//! - Database migrations
//!
//! Documents are keyed by string UUIDs and all timestamps are stored
//! as fixed-width ISO-8601 UTC strings (see `strafenkasse_shared::time`),
//! so string comparison in SQL equals chronological comparison.

pub mod entities;
pub mod guard;
pub mod migration;
pub mod repositories;

pub use guard::{LockKey, LoginGuard};
pub use repositories::{
    AuditLogRepository, CreateFineInput, FineRepository, FineTypeRepository, LockoutRepository,
    LoginAttemptRepository, MemberRepository, UserRepository,
};

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options.max_connections(max_connections);
    Database::connect(options).await
}
