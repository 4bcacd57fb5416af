use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use models::RowError;
use trade_ingest::parse_trades_csv;

use crate::{error::ApiError, repository::TradeRepository, Result};

pub type RepositoryState = Arc<dyn TradeRepository>;

/// Response for the upload endpoint: how many rows made it in, and the
/// rows that did not, with their reasons.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub errors: Vec<RowError>,
}

/// POST /api/trades/import
/// Body is the raw CSV file content. Normalizes the batch, persists the
/// valid rows atomically, returns the summary including rejected rows.
pub async fn import_trades(
    State(repo): State<RepositoryState>,
    body: Bytes,
) -> Result<impl IntoResponse> {
    let text = std::str::from_utf8(&body).map_err(|e| ApiError::InvalidCsv(e.to_string()))?;

    let report = parse_trades_csv(text);
    for err in &report.errors {
        tracing::warn!(reason = %err.reason, row = %err.row, "skipping malformed CSV row");
    }

    let imported = report.imported_count();
    repo.insert_trades(report.imported).await?;
    tracing::info!(imported, rejected = report.errors.len(), "trade batch imported");

    Ok((
        StatusCode::CREATED,
        Json(ImportSummary {
            imported,
            errors: report.errors,
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// GET /api/calendar?year=&month=
/// Monthly calendar view; defaults to the current month.
pub async fn get_calendar(
    State(repo): State<RepositoryState>,
    Query(query): Query<CalendarQuery>,
) -> Result<impl IntoResponse> {
    let today = Local::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let month = query.month.unwrap_or_else(|| today.month());

    if !(1..=12).contains(&month) {
        return Err(ApiError::InvalidMonth(format!("{year}-{month}")));
    }

    let trades = repo.list_trades().await?;
    Ok(Json(analytics::calendar_month(&trades, year, month)))
}

/// GET /api/chart
/// Time-ordered (timestamp, net P/L) points with a cumulative running total.
pub async fn get_chart(State(repo): State<RepositoryState>) -> Result<impl IntoResponse> {
    let trades = repo.list_trades().await?;
    Ok(Json(analytics::chart_series(&trades)))
}

/// GET /api/trades
/// Full trade listing, date-ascending.
pub async fn list_trades(State(repo): State<RepositoryState>) -> Result<impl IntoResponse> {
    let mut trades = repo.list_trades().await?;
    trades.sort_by_key(|t| t.trade_date);
    Ok(Json(trades))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "trade-journal-api"
    }))
}
