//! Shared types, errors, and configuration for Strafenkasse.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management
//! - Auth types (roles, claims, request/response payloads)
//! - JWT token service
//! - Canonical UTC timestamp handling

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod time;
pub mod types;

pub use auth::{Claims, Role};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
