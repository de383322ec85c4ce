//! Fiscal-year statistics routes.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use strafenkasse_core::fiscal::{current_fiscal_year, parse_label};
use strafenkasse_core::ranking::{FineFacts, MemberFacts, Statistics, compute_statistics};
use strafenkasse_db::{FineRepository, MemberRepository};
use strafenkasse_shared::{AppError, types::MemberStatus};

use crate::{AppState, error::{ApiError, ApiResult}, middleware::auth::AuthUser};

/// Creates statistics routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/statistics", get(get_statistics))
        .route("/statistics/me", get(get_personal_statistics))
        .route("/fiscal-years", get(list_fiscal_years))
}

/// Optional fiscal-year selector; defaults to the current year.
#[derive(Debug, Deserialize)]
pub struct StatisticsQuery {
    fiscal_year: Option<String>,
}

/// A member's own totals for one fiscal year.
#[derive(Debug, Serialize)]
pub struct PersonalStatistics {
    fiscal_year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    member_id: Option<String>,
    total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    rank: Option<u32>,
}

fn resolve_fiscal_year(query: StatisticsQuery) -> Result<String, ApiError> {
    match query.fiscal_year {
        None => Ok(current_fiscal_year(Utc::now())),
        Some(label) => {
            parse_label(&label)
                .ok_or_else(|| AppError::Validation("Ungültiges Geschäftsjahr".to_string()))?;
            Ok(label)
        }
    }
}

async fn load_statistics(
    conn: &DatabaseConnection,
    fiscal_year: &str,
) -> Result<Statistics, ApiError> {
    let fines = FineRepository::new(conn.clone())
        .for_fiscal_year(fiscal_year)
        .await?;
    let members = MemberRepository::new(conn.clone()).list().await?;

    let fine_facts: Vec<FineFacts> = fines
        .iter()
        .map(|f| FineFacts {
            member_id: f.member_id.clone(),
            amount: f.amount,
        })
        .collect();
    let member_facts: Vec<MemberFacts> = members
        .iter()
        .map(|m| MemberFacts {
            id: m.id.clone(),
            display_name: m.display_name(),
            status: MemberStatus::parse(&m.status).unwrap_or(MemberStatus::Aktiv),
        })
        .collect();

    Ok(compute_statistics(fiscal_year, &fine_facts, &member_facts))
}

/// GET /statistics?fiscal_year=YYYY/YYYY
///
/// Defaults to the current fiscal year when the parameter is absent.
async fn get_statistics(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<StatisticsQuery>,
) -> ApiResult<Json<Statistics>> {
    let fiscal_year = resolve_fiscal_year(query)?;
    let statistics = load_statistics(&state.db, &fiscal_year).await?;
    Ok(Json(statistics))
}

/// GET /statistics/me?fiscal_year=YYYY/YYYY
///
/// An account without a member link gets an empty result rather than
/// an error.
async fn get_personal_statistics(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<StatisticsQuery>,
) -> ApiResult<Json<PersonalStatistics>> {
    let fiscal_year = resolve_fiscal_year(query)?;

    let Some(member_id) = auth.member_id() else {
        return Ok(Json(PersonalStatistics {
            fiscal_year,
            member_id: None,
            total: Decimal::ZERO,
            rank: None,
        }));
    };

    let statistics = load_statistics(&state.db, &fiscal_year).await?;
    let entry = statistics
        .ranking
        .iter()
        .find(|e| e.member_id == member_id);

    Ok(Json(PersonalStatistics {
        fiscal_year,
        member_id: Some(member_id.to_string()),
        total: entry.map_or(Decimal::ZERO, |e| e.total),
        rank: entry.map(|e| e.rank),
    }))
}

/// GET /fiscal-years
///
/// Distinct fiscal years with recorded fines, newest first; always
/// contains at least the current fiscal year.
async fn list_fiscal_years(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Value>> {
    let mut years = FineRepository::new(state.conn())
        .distinct_fiscal_years()
        .await?;
    if years.is_empty() {
        years.push(current_fiscal_year(Utc::now()));
    }
    Ok(Json(json!({ "fiscal_years": years })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_fiscal_year_validates_label() {
        let ok = resolve_fiscal_year(StatisticsQuery {
            fiscal_year: Some("2024/2025".to_string()),
        });
        assert_eq!(ok.unwrap(), "2024/2025");

        let bad = resolve_fiscal_year(StatisticsQuery {
            fiscal_year: Some("2024/2026".to_string()),
        });
        assert!(bad.is_err());
    }

    #[test]
    fn test_resolve_fiscal_year_defaults_to_current() {
        let label = resolve_fiscal_year(StatisticsQuery { fiscal_year: None }).unwrap();
        assert!(parse_label(&label).is_some());
    }
}
