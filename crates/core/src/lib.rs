//! Core business logic for Strafenkasse.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain calculations and policies live here.
//!
//! # Modules
//!
//! - `fiscal` - Fiscal-year bucketing (August 1 through July 31)
//! - `ranking` - Per-fiscal-year fine aggregation and leaderboard
//! - `auth` - Password hashing and role-based authorization policy
//! - `lockout` - Login brute-force lockout policy

pub mod auth;
pub mod fiscal;
pub mod lockout;
pub mod ranking;
