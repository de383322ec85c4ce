//! Statistics input facts and derived output types.

use rust_decimal::Decimal;
use serde::Serialize;
use strafenkasse_shared::types::MemberStatus;

/// Member facts needed by the ranking engine.
#[derive(Debug, Clone)]
pub struct MemberFacts {
    /// Member document id.
    pub id: String,
    /// Display name ("first last").
    pub display_name: String,
    /// Lifecycle status.
    pub status: MemberStatus,
}

/// Fine facts needed by the ranking engine.
///
/// Callers supply all fines stored for the fiscal year; the engine
/// never re-derives the fiscal-year label from dates.
#[derive(Debug, Clone)]
pub struct FineFacts {
    /// Owning member's document id.
    pub member_id: String,
    /// Fine amount.
    pub amount: Decimal,
}

/// A member's position in the fiscal-year leaderboard. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    /// Member document id.
    pub member_id: String,
    /// Member display name.
    pub member_name: String,
    /// Summed fine amount for the fiscal year.
    pub total: Decimal,
    /// 1-based position after sorting by total descending.
    pub rank: u32,
}

/// Derived statistics for one fiscal year.
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    /// Fiscal-year label, e.g. "2025/2026".
    pub fiscal_year: String,
    /// Count of all fines in the fiscal year, archived members
    /// included.
    pub total_fines: u64,
    /// Sum over all fines in the fiscal year, archived members
    /// included.
    pub total_amount: Decimal,
    /// Top-ranked member (the "Sau"), None when no fines exist.
    pub sau: Option<RankingEntry>,
    /// Bottom-ranked member (the "Laemmchen"); identical to `sau`
    /// when only one member has fines.
    pub laemmchen: Option<RankingEntry>,
    /// Full leaderboard, archived members excluded.
    pub ranking: Vec<RankingEntry>,
}
