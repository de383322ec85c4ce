//! Password hashing and authorization policy.

pub mod password;
pub mod policy;

pub use password::{PasswordError, hash_password, verify_password};
pub use policy::{require_admin, require_kassenwart, require_vorstand};
