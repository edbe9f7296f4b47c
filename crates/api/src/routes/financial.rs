//! Financial report and statement routes.
//!
//! Every statement endpoint returns the view model as JSON by default and a
//! downloadable file when `format` names an exporter.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::{AppState, error::ApiError};
use nepfin_core::aggregation::{AggregationService, PeriodReport, TrialBalance};
use nepfin_core::export::{ExportFormat, FileScope, export_filename, exporter_for};
use nepfin_core::ledger::{LEDGER_FILE_STEM, Ledger};
use nepfin_core::period::{DateRange, Period, PeriodError, PeriodType, one_year_earlier};
use nepfin_core::statements::{StatementBuilder, StatementContext, StatementViewModel};
use nepfin_shared::AppError;

/// Creates the financial routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/financial/balance-sheet/", get(get_balance_sheet))
        .route("/financial/income-statement/", get(get_income_statement))
        .route("/financial/profit-loss/", get(get_income_statement))
        .route("/financial/trial-balance/", get(get_trial_balance))
        .route("/financial/nrb/balance-sheet/", get(get_balance_sheet))
        .route("/financial/nrb/income-statement/", get(get_income_statement))
        .route("/financial/nrb/cash-flow/", get(get_cash_flow))
        .route("/financial/export-transactions/", get(export_transactions))
        .route("/financial/{period_type}/", get(get_period_report))
}

// ============================================================================
// Query Parameters
// ============================================================================

/// Query parameters for the period dashboard endpoints.
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    /// Calendar year (defaults to the current year).
    pub year: Option<i32>,
    /// Month for monthly periods.
    pub month: Option<u32>,
    /// Quarter for quarterly periods.
    pub quarter: Option<u32>,
}

/// Query parameters for the balance sheet.
#[derive(Debug, Deserialize)]
pub struct BalanceSheetQuery {
    /// As of date (defaults to today).
    pub as_of_date: Option<NaiveDate>,
    /// Comparison date (defaults to one year before `as_of_date`).
    pub comparison_date: Option<NaiveDate>,
    /// Output format.
    pub format: Option<String>,
}

/// Query parameters for the trial balance.
#[derive(Debug, Deserialize)]
pub struct TrialBalanceQuery {
    /// As of date (defaults to today).
    pub as_of_date: Option<NaiveDate>,
}

/// Query parameters for statements over a period.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// Period start.
    pub start_date: Option<NaiveDate>,
    /// Period end.
    pub end_date: Option<NaiveDate>,
    /// Comparison start (defaults to one year before `start_date`).
    pub comparison_start_date: Option<NaiveDate>,
    /// Comparison end (defaults to one year before `end_date`).
    pub comparison_end_date: Option<NaiveDate>,
    /// Output format.
    pub format: Option<String>,
}

/// Query parameters for the transaction ledger export.
#[derive(Debug, Deserialize)]
pub struct LedgerQuery {
    /// Period start.
    pub start_date: Option<NaiveDate>,
    /// Period end.
    pub end_date: Option<NaiveDate>,
    /// Output format.
    pub format: Option<String>,
}

// ============================================================================
// Helper Functions
// ============================================================================

pub(super) fn parse_query<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query
        .map(|Query(q)| q)
        .map_err(|e| AppError::Validation(e.body_text()).into())
}

fn parse_format(format: Option<&str>) -> Result<ExportFormat, ApiError> {
    Ok(format.map_or(Ok(ExportFormat::Json), str::parse)?)
}

pub(super) fn required_range(
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<DateRange, ApiError> {
    match (start, end) {
        (Some(start), Some(end)) => Ok(DateRange::new(start, end)?),
        _ => Err(AppError::Validation("start_date and end_date are required".to_string()).into()),
    }
}

fn comparison_range(
    current: DateRange,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<DateRange, ApiError> {
    match (start, end) {
        (Some(start), Some(end)) => Ok(DateRange::new(start, end)?),
        (None, None) => Ok(current.one_year_earlier()?),
        _ => Err(AppError::Validation(
            "comparison_start_date and comparison_end_date must be given together".to_string(),
        )
        .into()),
    }
}

fn context(state: &AppState, period_caption: String) -> StatementContext {
    StatementContext::new(
        state.company.name.clone(),
        state.company.currency.clone(),
        period_caption,
    )
}

fn attachment(body: Vec<u8>, format: ExportFormat, filename: &str) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}

/// Returns the view model as JSON or renders it with the format's exporter.
fn render(
    model: StatementViewModel,
    format: ExportFormat,
    scope: FileScope,
) -> Result<Response, ApiError> {
    if format == ExportFormat::Json {
        return Ok(Json(model).into_response());
    }

    let exporter = exporter_for(format)?;
    let body = exporter.render_statement(&model)?;
    let filename = export_filename(model.kind.file_stem(), scope, format);
    debug!(%filename, bytes = body.len(), "Rendered statement");

    Ok(attachment(body, format, &filename))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /financial/{monthly|quarterly|yearly}/
async fn get_period_report(
    State(state): State<AppState>,
    Path(period_type): Path<String>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> Result<Json<PeriodReport>, ApiError> {
    let query = parse_query(query)?;
    let period_type: PeriodType = period_type.parse().map_err(AppError::NotFound)?;
    let year = query.year.unwrap_or_else(|| Utc::now().year());

    let period = Period::from_parts(period_type, year, query.month, query.quarter)?.resolve()?;
    debug!(label = %period.label, "Building period report");

    Ok(Json(AggregationService::period_report(
        state.store.bills(),
        period,
    )))
}

/// GET /financial/balance-sheet/, /financial/nrb/balance-sheet/
async fn get_balance_sheet(
    State(state): State<AppState>,
    query: Result<Query<BalanceSheetQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let query = parse_query(query)?;
    let format = parse_format(query.format.as_deref())?;
    let as_of_date = query
        .as_of_date
        .unwrap_or_else(|| Utc::now().date_naive());
    let comparison_date = match query.comparison_date {
        Some(date) => date,
        None => one_year_earlier(as_of_date)
            .ok_or(PeriodError::YearOutOfRange(as_of_date.year()))?,
    };

    let bills = state.store.bills();
    let current = AggregationService::balance_sheet(bills, as_of_date);
    let comparison = AggregationService::balance_sheet(bills, comparison_date);

    let model = StatementBuilder::balance_sheet(
        &context(&state, format!("As of {as_of_date}")),
        &current,
        Some(&comparison),
    );

    render(model, format, FileScope::AsOf(as_of_date))
}

/// GET /financial/trial-balance/
async fn get_trial_balance(
    State(state): State<AppState>,
    query: Result<Query<TrialBalanceQuery>, QueryRejection>,
) -> Result<Json<TrialBalance>, ApiError> {
    let query = parse_query(query)?;
    let as_of_date = query
        .as_of_date
        .unwrap_or_else(|| Utc::now().date_naive());

    Ok(Json(AggregationService::trial_balance(
        state.store.bills(),
        as_of_date,
    )))
}

/// GET /financial/income-statement/ and its profit-loss and nrb aliases
async fn get_income_statement(
    State(state): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let query = parse_query(query)?;
    let format = parse_format(query.format.as_deref())?;
    let range = required_range(query.start_date, query.end_date)?;
    let previous = comparison_range(
        range,
        query.comparison_start_date,
        query.comparison_end_date,
    )?;

    let bills = state.store.bills();
    let current = AggregationService::income_statement(bills, range);
    let comparison = AggregationService::income_statement(bills, previous);

    let model = StatementBuilder::income_statement(
        &context(&state, format!("For the period {}", range.caption())),
        &current,
        Some(&comparison),
    );

    render(model, format, FileScope::Range(range))
}

/// GET /financial/nrb/cash-flow/
async fn get_cash_flow(
    State(state): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let query = parse_query(query)?;
    let format = parse_format(query.format.as_deref())?;
    let range = required_range(query.start_date, query.end_date)?;
    let previous = comparison_range(
        range,
        query.comparison_start_date,
        query.comparison_end_date,
    )?;

    let bills = state.store.bills();
    let current = AggregationService::cash_flow(bills, range);
    let comparison = AggregationService::cash_flow(bills, previous);

    let model = StatementBuilder::cash_flow(
        &context(&state, format!("For the period {}", range.caption())),
        &current,
        Some(&comparison),
    );

    render(model, format, FileScope::Range(range))
}

/// GET /financial/export-transactions/
async fn export_transactions(
    State(state): State<AppState>,
    query: Result<Query<LedgerQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let query = parse_query(query)?;
    let format = parse_format(query.format.as_deref())?;
    let range = required_range(query.start_date, query.end_date)?;

    let ledger = Ledger::from_bills(state.store.bills(), range);
    if format == ExportFormat::Json {
        return Ok(Json(ledger).into_response());
    }

    let exporter = exporter_for(format)?;
    let body = exporter.render_ledger(&state.company.name, &ledger)?;
    let filename = export_filename(LEDGER_FILE_STEM, FileScope::Range(range), format);
    debug!(%filename, rows = ledger.rows.len(), "Rendered ledger");

    Ok(attachment(body, format, &filename))
}
