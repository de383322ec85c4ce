//! `SeaORM` entity definitions.

pub mod account_lockouts;
pub mod audit_logs;
pub mod fine_types;
pub mod fines;
pub mod login_attempts;
pub mod members;
pub mod users;
