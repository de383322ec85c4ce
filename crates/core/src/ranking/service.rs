//! Leaderboard computation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use strafenkasse_shared::types::MemberStatus;

use super::types::{FineFacts, MemberFacts, RankingEntry, Statistics};

/// Computes the statistics for one fiscal year.
///
/// `fines` must be the complete stored fine set for the fiscal year.
/// Archived members are excluded from the ranking, but their fines
/// still count toward `total_fines` and `total_amount`; the same
/// applies to fines whose member no longer exists. Ties are broken by
/// member id ascending so the ordering is deterministic.
#[must_use]
pub fn compute_statistics(
    fiscal_year: &str,
    fines: &[FineFacts],
    members: &[MemberFacts],
) -> Statistics {
    let names: BTreeMap<&str, &str> = members
        .iter()
        .filter(|m| m.status != MemberStatus::Archiviert)
        .map(|m| (m.id.as_str(), m.display_name.as_str()))
        .collect();

    // BTreeMap keeps accumulation keyed by member id ascending, which
    // becomes the tie-break order under the stable sort below.
    let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
    for fine in fines {
        if names.contains_key(fine.member_id.as_str()) {
            *totals.entry(fine.member_id.as_str()).or_default() += fine.amount;
        }
    }

    let mut ranking: Vec<RankingEntry> = totals
        .into_iter()
        .filter(|(_, total)| *total != Decimal::ZERO)
        .map(|(member_id, total)| RankingEntry {
            member_id: member_id.to_string(),
            member_name: names.get(member_id).copied().unwrap_or_default().to_string(),
            total,
            rank: 0,
        })
        .collect();

    ranking.sort_by(|a, b| b.total.cmp(&a.total));
    for (idx, entry) in ranking.iter_mut().enumerate() {
        entry.rank = u32::try_from(idx + 1).unwrap_or(u32::MAX);
    }

    // Totals intentionally cover the unfiltered fine set: fines of
    // archived or deleted members stay in the books even though they
    // leave the leaderboard.
    let total_amount: Decimal = fines.iter().map(|f| f.amount).sum();

    Statistics {
        fiscal_year: fiscal_year.to_string(),
        total_fines: fines.len() as u64,
        total_amount,
        sau: ranking.first().cloned(),
        laemmchen: ranking.last().cloned(),
        ranking,
    }
}
