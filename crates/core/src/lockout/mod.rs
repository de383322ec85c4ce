//! Login brute-force lockout policy.
//!
//! Pure decision logic for the brute-force guard: attempt counting
//! windows, lockout expiry, and remaining-time reporting. The stateful
//! side (attempt and lockout records) lives in the database layer and
//! defers every decision to this module.

mod policy;

#[cfg(test)]
mod tests;

pub use policy::{LockStatus, LockoutPolicy, lock_status, remaining_minutes};
