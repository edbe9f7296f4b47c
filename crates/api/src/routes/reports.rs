//! Spending summary routes.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::{JsonRejection, QueryRejection}},
    routing::{get, post},
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;
use tracing::debug;

use super::financial::{parse_query, required_range};
use crate::{AppState, error::ApiError};
use nepfin_core::aggregation::{
    AggregationService, ExpenseReport, ExpenseReportFilter, MonthlySpending,
};
use nepfin_shared::AppError;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/expense-summary/", post(expense_summary))
        .route("/reports/monthly-summary/", get(monthly_summary))
}

/// Body of an expense summary request.
#[derive(Debug, Deserialize)]
pub struct ExpenseSummaryRequest {
    /// Period start.
    pub start_date: Option<NaiveDate>,
    /// Period end.
    pub end_date: Option<NaiveDate>,
    /// Bill filters.
    #[serde(flatten)]
    pub filter: ExpenseReportFilter,
}

/// Query parameters for the monthly summary.
#[derive(Debug, Deserialize)]
pub struct MonthlySummaryQuery {
    /// Calendar year (defaults to the current year).
    pub year: Option<i32>,
}

/// POST /reports/expense-summary/
async fn expense_summary(
    State(state): State<AppState>,
    body: Result<Json<ExpenseSummaryRequest>, JsonRejection>,
) -> Result<Json<ExpenseReport>, ApiError> {
    let Json(request) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    let range = required_range(request.start_date, request.end_date)?;
    debug!(caption = %range.caption(), filter = ?request.filter, "Building expense summary");

    Ok(Json(AggregationService::expense_report(
        state.store.bills(),
        range,
        &request.filter,
    )))
}

/// GET /reports/monthly-summary/
async fn monthly_summary(
    State(state): State<AppState>,
    query: Result<Query<MonthlySummaryQuery>, QueryRejection>,
) -> Result<Json<Vec<MonthlySpending>>, ApiError> {
    let query = parse_query(query)?;
    let year = query.year.unwrap_or_else(|| Utc::now().year());

    Ok(Json(AggregationService::monthly_summary(
        state.store.bills(),
        year,
    )?))
}

#[cfg(test)]
mod integration_tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use chrono::NaiveDate;
    use http_body_util::BodyExt;
    use nepfin_core::aggregation::{AccountType, Bill, TransactionType};
    use nepfin_shared::CompanyConfig;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::{AppState, BillStore, create_router};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_state() -> AppState {
        let mut telecom = Bill::new(
            date(2024, 3, 5),
            "Office Admin",
            dec!(3000),
            TransactionType::Debit,
            AccountType::Expense,
        );
        telecom.vendor = Some("Nepal Telecom".to_string());
        let bills = vec![
            telecom,
            Bill::new(
                date(2024, 3, 6),
                "Cost of Goods",
                dec!(2000),
                TransactionType::Debit,
                AccountType::Expense,
            ),
            Bill::new(
                date(2024, 4, 2),
                "Cost of Goods",
                dec!(700),
                TransactionType::Debit,
                AccountType::Expense,
            ),
        ];
        AppState::new(BillStore::from_bills(bills), CompanyConfig::default())
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let response = create_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    async fn post_json(uri: &str, body: &Value) -> (StatusCode, Value) {
        send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    fn amount(value: &Value) -> Decimal {
        value.as_str().unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn test_expense_summary() {
        let (status, body) = post_json(
            "/api/v1/reports/expense-summary/",
            &json!({"start_date": "2024-03-01", "end_date": "2024-03-31"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_bills"], 2);
        assert_eq!(amount(&body["total_amount"]), dec!(5000));
        assert_eq!(body["date_range"], "2024-03-01 to 2024-03-31");
        assert_eq!(body["categories"][0]["category_name"], "Office Admin");
        assert_eq!(body["uncategorized_bills"], 0);
    }

    #[tokio::test]
    async fn test_expense_summary_filters() {
        let (status, body) = post_json(
            "/api/v1/reports/expense-summary/",
            &json!({
                "start_date": "2024-03-01",
                "end_date": "2024-04-30",
                "categories": ["cost of goods"],
                "max_amount": "1000",
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_bills"], 1);
        assert_eq!(amount(&body["total_amount"]), dec!(700));

        let (_, body) = post_json(
            "/api/v1/reports/expense-summary/",
            &json!({"start_date": "2024-03-01", "end_date": "2024-04-30", "vendors": ["telecom"]}),
        )
        .await;
        assert_eq!(body["total_bills"], 1);
    }

    #[tokio::test]
    async fn test_expense_summary_requires_dates() {
        let (status, body) =
            post_json("/api/v1/reports/expense-summary/", &json!({"categories": []})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");

        let (status, body) = post_json(
            "/api/v1/reports/expense-summary/",
            &json!({"start_date": "not-a-date", "end_date": "2024-03-31"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_monthly_summary() {
        let (status, body) = send(
            Request::get("/api/v1/reports/monthly-summary/?year=2024")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let months = body.as_array().unwrap();
        assert_eq!(months.len(), 12);
        assert_eq!(months[2]["month_name"], "March");
        assert_eq!(months[2]["bill_count"], 2);
        assert_eq!(amount(&months[2]["total_amount"]), dec!(5000));
        assert_eq!(amount(&months[3]["total_amount"]), dec!(700));
    }
}
