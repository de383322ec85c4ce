//! Per-fiscal-year fine aggregation and leaderboard.

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::compute_statistics;
pub use types::{FineFacts, MemberFacts, RankingEntry, Statistics};
