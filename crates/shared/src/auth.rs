//! Authentication types: roles, JWT claims, and auth payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User roles, least to most privileged.
///
/// Stored as lowercase strings in user documents and token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Spiess: records fines, may be linked to a member for personal
    /// statistics.
    Spiess,
    /// Kassenwart: manages the fine-type catalog and collections.
    Kassenwart,
    /// Vorstand: board-level access to members and reports.
    Vorstand,
    /// Admin: full access including user management.
    Admin,
}

impl Role {
    /// Returns the canonical string value used in stored documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spiess => "spiess",
            Self::Kassenwart => "kassenwart",
            Self::Vorstand => "vorstand",
            Self::Admin => "admin",
        }
    }

    /// Parses a stored role string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "spiess" => Some(Self::Spiess),
            "kassenwart" => Some(Self::Kassenwart),
            "vorstand" => Some(Self::Vorstand),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims embedded in session tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user document id).
    pub sub: String,
    /// Username, for display and audit attribution.
    pub username: String,
    /// User's role.
    pub role: Role,
    /// Linked member id, when the account is tied to a club member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
    /// Issued at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(
        user_id: &str,
        username: &str,
        role: Role,
        member_id: Option<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            username: username.to_string(),
            role,
            member_id,
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user id from claims.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.sub
    }
}

/// Login request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    /// Signed session token.
    pub token: String,
    /// Authenticated role.
    pub role: Role,
    /// Username.
    pub username: String,
    /// Linked member id, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<String>,
}

/// Change-password request payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangePasswordRequest {
    /// The caller's current password.
    pub current_password: String,
    /// The new password.
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Role::Spiess, "spiess")]
    #[case(Role::Kassenwart, "kassenwart")]
    #[case(Role::Vorstand, "vorstand")]
    #[case(Role::Admin, "admin")]
    fn test_role_roundtrip(#[case] role: Role, #[case] s: &str) {
        assert_eq!(role.as_str(), s);
        assert_eq!(Role::parse(s), Some(role));
    }

    #[test]
    fn test_role_privilege_order() {
        assert!(Role::Spiess < Role::Kassenwart);
        assert!(Role::Kassenwart < Role::Vorstand);
        assert!(Role::Vorstand < Role::Admin);
    }

    #[test]
    fn test_claims_member_id_omitted_when_absent() {
        let claims = Claims::new("u1", "admin", Role::Admin, None, Utc::now());
        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("member_id").is_none());
        assert_eq!(json["role"], "admin");
    }
}
