//! Tests for the ranking/statistics engine.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use strafenkasse_shared::types::MemberStatus;

use super::service::compute_statistics;
use super::types::{FineFacts, MemberFacts};

fn member(id: &str, name: &str, status: MemberStatus) -> MemberFacts {
    MemberFacts {
        id: id.to_string(),
        display_name: name.to_string(),
        status,
    }
}

fn fine(member_id: &str, amount: Decimal) -> FineFacts {
    FineFacts {
        member_id: member_id.to_string(),
        amount,
    }
}

#[test]
fn test_ranking_accumulates_and_sorts() {
    let members = vec![
        member("a", "Anna Arndt", MemberStatus::Aktiv),
        member("b", "Bernd Busch", MemberStatus::Aktiv),
    ];
    let fines = vec![
        fine("a", dec!(10)),
        fine("b", dec!(5)),
        fine("a", dec!(3)),
    ];

    let stats = compute_statistics("2025/2026", &fines, &members);

    assert_eq!(stats.total_fines, 3);
    assert_eq!(stats.total_amount, dec!(18));
    assert_eq!(stats.ranking.len(), 2);

    assert_eq!(stats.ranking[0].member_id, "a");
    assert_eq!(stats.ranking[0].total, dec!(13));
    assert_eq!(stats.ranking[0].rank, 1);

    assert_eq!(stats.ranking[1].member_id, "b");
    assert_eq!(stats.ranking[1].total, dec!(5));
    assert_eq!(stats.ranking[1].rank, 2);

    assert_eq!(stats.sau.as_ref().unwrap().member_id, "a");
    assert_eq!(stats.laemmchen.as_ref().unwrap().member_id, "b");
}

#[test]
fn test_archived_member_excluded_from_ranking_but_counted_in_totals() {
    let members = vec![
        member("a", "Anna Arndt", MemberStatus::Aktiv),
        member("z", "Zoe Zorn", MemberStatus::Archiviert),
    ];
    let fines = vec![fine("a", dec!(4)), fine("z", dec!(7))];

    let stats = compute_statistics("2025/2026", &fines, &members);

    assert_eq!(stats.total_fines, 2);
    assert_eq!(stats.total_amount, dec!(11));
    assert_eq!(stats.ranking.len(), 1);
    assert_eq!(stats.ranking[0].member_id, "a");
}

#[test]
fn test_fine_of_deleted_member_counted_in_totals_only() {
    let members = vec![member("a", "Anna Arndt", MemberStatus::Aktiv)];
    let fines = vec![fine("a", dec!(2)), fine("gone", dec!(9))];

    let stats = compute_statistics("2025/2026", &fines, &members);

    assert_eq!(stats.total_amount, dec!(11));
    assert_eq!(stats.ranking.len(), 1);
}

#[test]
fn test_passiv_member_still_ranked() {
    let members = vec![member("p", "Paul Pause", MemberStatus::Passiv)];
    let fines = vec![fine("p", dec!(1.50))];

    let stats = compute_statistics("2025/2026", &fines, &members);

    assert_eq!(stats.ranking.len(), 1);
    assert_eq!(stats.ranking[0].member_name, "Paul Pause");
}

#[test]
fn test_single_entry_is_both_sau_and_laemmchen() {
    let members = vec![member("a", "Anna Arndt", MemberStatus::Aktiv)];
    let fines = vec![fine("a", dec!(3))];

    let stats = compute_statistics("2025/2026", &fines, &members);

    assert_eq!(stats.sau, stats.laemmchen);
    assert_eq!(stats.sau.as_ref().unwrap().member_id, "a");
}

#[test]
fn test_empty_period_yields_zero_totals_and_no_highlights() {
    let members = vec![member("a", "Anna Arndt", MemberStatus::Aktiv)];

    let stats = compute_statistics("2019/2020", &[], &members);

    assert_eq!(stats.total_fines, 0);
    assert_eq!(stats.total_amount, Decimal::ZERO);
    assert!(stats.ranking.is_empty());
    assert!(stats.sau.is_none());
    assert!(stats.laemmchen.is_none());
}

#[test]
fn test_ties_broken_by_member_id() {
    let members = vec![
        member("b", "Bernd Busch", MemberStatus::Aktiv),
        member("a", "Anna Arndt", MemberStatus::Aktiv),
    ];
    let fines = vec![fine("b", dec!(5)), fine("a", dec!(5))];

    let stats = compute_statistics("2025/2026", &fines, &members);

    // Equal totals: deterministic order by member id ascending.
    assert_eq!(stats.ranking[0].member_id, "a");
    assert_eq!(stats.ranking[1].member_id, "b");
}
