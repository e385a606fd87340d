// rest_api/src/handlers/reports.rs
// Revenue reporting over History rows (confirmed payments) and issued
// cards. Date ranges are inclusive of both boundary days; the end date
// is stretched to the last millisecond of its day.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use models::card::Card;
use models::errors::ValidationError;
use models::history::History;
use storage::cards::CardStore;
use storage::history::HistoryStore;

use crate::error::ApiError;
use crate::extract::{ApiJson, AuthUser};
use crate::state::AppState;

/// Filter posted by the report screen. Dates arrive as `YYYY-MM-DD`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReportQuery {
    pub username: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportTotals {
    pub payments_total: f64,
    pub cards_total: f64,
    pub grand_total: f64,
}

fn totals_of(history: &[History], cards: &[Card]) -> ReportTotals {
    let payments_total: f64 = history.iter().map(|row| row.invoice.amount).sum();
    let cards_total: f64 = cards.iter().map(|card| card.card_price).sum();
    ReportTotals {
        payments_total,
        cards_total,
        grand_total: payments_total + cards_total,
    }
}

fn parse_report_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ApiError::BadRequest(ValidationError::InvalidDateFormat(raw.to_string()).to_string())
    })
}

fn month_start(year: i32, month: u32) -> Option<DateTime<Utc>> {
    Some(
        NaiveDate::from_ymd_opt(year, month, 1)?
            .and_time(NaiveTime::MIN)
            .and_utc(),
    )
}

async fn window_totals(
    state: &AppState,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<ReportTotals, ApiError> {
    let history = state.db.history.list_in_window(start, end).await?;
    let cards = state.db.cards.list_in_window(start, end).await?;
    Ok(totals_of(&history, &cards))
}

// Handler for POST /api/reports/invoices
pub async fn invoice_report(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiJson(query): ApiJson<ReportQuery>,
) -> Result<Json<Value>, ApiError> {
    let username = query
        .username
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());

    let range = match (query.start_date.as_deref(), query.end_date.as_deref()) {
        (Some(start), Some(end)) => {
            let start_day = parse_report_date(start)?;
            let end_day = parse_report_date(end)?;
            if end_day < start_day {
                return Err(ApiError::BadRequest(
                    ValidationError::InvalidDateRange.to_string(),
                ));
            }
            let start_at = start_day.and_time(NaiveTime::MIN).and_utc();
            let end_at = end_day.and_time(NaiveTime::MIN).and_utc() + Duration::days(1)
                - Duration::milliseconds(1);
            Some((start_at, end_at))
        }
        (None, None) => None,
        _ => {
            return Err(ApiError::BadRequest(
                "start_date and end_date must be supplied together".to_string(),
            ));
        }
    };

    if username.is_none() && range.is_none() {
        return Err(ApiError::BadRequest(
            "a username or a date range is required".to_string(),
        ));
    }

    let mut history = match range {
        Some((start, end)) => state.db.history.list_in_window(start, end).await?,
        None => state.db.history.list_history().await?,
    };
    if let Some(name) = username {
        history.retain(|row| row.invoice.created.username == name);
    }

    let mut cards = match range {
        Some((start, end)) => state.db.cards.list_in_window(start, end).await?,
        None => state.db.cards.list_cards().await?,
    };
    if let Some(name) = username {
        cards.retain(|card| card.created_by.username == name);
    }

    let totals = totals_of(&history, &cards);
    Ok(Json(json!({
        "history": history,
        "cards": cards,
        "totals": totals,
    })))
}

// Handler for GET /api/reports/totals
pub async fn report_totals(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<ReportTotals>, ApiError> {
    let history = state.db.history.list_history().await?;
    let cards = state.db.cards.list_cards().await?;
    Ok(Json(totals_of(&history, &cards)))
}

// Handler for GET /api/reports/monthly
pub async fn monthly_report(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Value>, ApiError> {
    let now = Utc::now();
    let current_start = month_start(now.year(), now.month())
        .ok_or_else(|| ApiError::Internal("calendar arithmetic failed".to_string()))?;
    let (previous_year, previous_month) = if now.month() == 1 {
        (now.year() - 1, 12)
    } else {
        (now.year(), now.month() - 1)
    };
    let previous_start = month_start(previous_year, previous_month)
        .ok_or_else(|| ApiError::Internal("calendar arithmetic failed".to_string()))?;
    let previous_end = current_start - Duration::milliseconds(1);

    let current = window_totals(&state, current_start, now).await?;
    let previous = window_totals(&state, previous_start, previous_end).await?;
    Ok(Json(json!({
        "current": current,
        "previous": previous,
    })))
}
