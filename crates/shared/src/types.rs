//! Common domain types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a new string document identifier.
///
/// Documents are keyed by string UUIDs, never by database-native row
/// ids, so identifiers survive export/import across stores.
#[must_use]
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Lifecycle status of a club member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    /// Active member, fully participating.
    Aktiv,
    /// Inactive member; still shown in rankings.
    Passiv,
    /// Archived member; excluded from rankings and cannot accrue fines.
    Archiviert,
}

impl MemberStatus {
    /// Returns the canonical string value used in stored documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aktiv => "aktiv",
            Self::Passiv => "passiv",
            Self::Archiviert => "archiviert",
        }
    }

    /// Parses a stored status string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "aktiv" => Some(Self::Aktiv),
            "passiv" => Some(Self::Passiv),
            "archiviert" => Some(Self::Archiviert),
            _ => None,
        }
    }
}

impl std::fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_status_roundtrip() {
        for status in [
            MemberStatus::Aktiv,
            MemberStatus::Passiv,
            MemberStatus::Archiviert,
        ] {
            assert_eq!(MemberStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(MemberStatus::parse("geloescht"), None);
    }

    #[test]
    fn test_new_id_is_uuid() {
        let id = new_id();
        assert!(Uuid::parse_str(&id).is_ok());
    }
}
