//! HTTP client for the financial endpoints.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use reqwest::{Client, RequestBuilder, Response, header};
use tracing::{debug, warn};

use crate::error::{ClientError, extract_error_message};
use crate::session::Session;
use nepfin_core::aggregation::{MonthlySpending, PeriodReport, TrialBalance};
use nepfin_core::export::{ExportFormat, FileScope, export_filename};
use nepfin_core::ledger::{LEDGER_FILE_STEM, Ledger};
use nepfin_core::period::{DateRange, Period};
use nepfin_core::statements::{StatementKind, StatementViewModel};

/// Request timeout for file downloads.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// A statement to fetch or download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementRequest {
    /// Balance sheet as of a date.
    BalanceSheet {
        /// Reporting date.
        as_of_date: NaiveDate,
        /// Comparison date; the server defaults to one year earlier.
        comparison_date: Option<NaiveDate>,
    },
    /// Income statement over a period.
    IncomeStatement {
        /// Reporting period.
        range: DateRange,
        /// Comparison period; the server defaults to one year earlier.
        comparison: Option<DateRange>,
    },
    /// Cash flow statement over a period.
    CashFlow {
        /// Reporting period.
        range: DateRange,
        /// Comparison period; the server defaults to one year earlier.
        comparison: Option<DateRange>,
    },
}

impl StatementRequest {
    /// Statement kind requested.
    #[must_use]
    pub const fn kind(&self) -> StatementKind {
        match self {
            Self::BalanceSheet { .. } => StatementKind::BalanceSheet,
            Self::IncomeStatement { .. } => StatementKind::IncomeStatement,
            Self::CashFlow { .. } => StatementKind::CashFlow,
        }
    }

    fn path(&self) -> &'static str {
        match self {
            Self::BalanceSheet { .. } => "/financial/balance-sheet/",
            Self::IncomeStatement { .. } => "/financial/income-statement/",
            Self::CashFlow { .. } => "/financial/nrb/cash-flow/",
        }
    }

    fn scope(&self) -> FileScope {
        match self {
            Self::BalanceSheet { as_of_date, .. } => FileScope::AsOf(*as_of_date),
            Self::IncomeStatement { range, .. } | Self::CashFlow { range, .. } => {
                FileScope::Range(*range)
            }
        }
    }

    fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::BalanceSheet {
                as_of_date,
                comparison_date,
            } => {
                let mut query = vec![("as_of_date", as_of_date.to_string())];
                if let Some(date) = comparison_date {
                    query.push(("comparison_date", date.to_string()));
                }
                query
            }
            Self::IncomeStatement { range, comparison } | Self::CashFlow { range, comparison } => {
                let mut query = range_query(*range);
                if let Some(previous) = comparison {
                    query.push(("comparison_start_date", previous.start_date.to_string()));
                    query.push(("comparison_end_date", previous.end_date.to_string()));
                }
                query
            }
        }
    }
}

fn range_query(range: DateRange) -> Vec<(&'static str, String)> {
    vec![
        ("start_date", range.start_date.to_string()),
        ("end_date", range.end_date.to_string()),
    ]
}

/// A downloaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// File name from `Content-Disposition`, or the naming convention.
    pub filename: String,
    /// Response content type.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl Download {
    /// Writes the file into `dir` under its file name.
    pub async fn save_in(&self, dir: impl AsRef<Path>) -> std::io::Result<PathBuf> {
        // strip any directory components sent by the server
        let name = Path::new(&self.filename)
            .file_name()
            .map_or_else(|| PathBuf::from("download"), PathBuf::from);
        let path = dir.as_ref().join(name);
        tokio::fs::write(&path, &self.bytes).await?;
        Ok(path)
    }
}

/// Extracts the file name from a `Content-Disposition` header value.
///
/// ```
/// use nepfin_client::filename_from_disposition;
///
/// assert_eq!(
///     filename_from_disposition(r#"attachment; filename="balance_sheet_2024-03-31.csv""#),
///     Some("balance_sheet_2024-03-31.csv".to_string())
/// );
/// assert_eq!(filename_from_disposition("inline"), None);
/// ```
#[must_use]
pub fn filename_from_disposition(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

/// Client for the `/api/v1/financial` endpoints.
#[derive(Debug, Clone)]
pub struct FinancialClient {
    http: Client,
    base_url: String,
    session: Arc<Session>,
}

impl FinancialClient {
    /// Creates a client for the server at `base_url`.
    pub fn new(base_url: impl Into<String>, session: Arc<Session>) -> Result<Self, ClientError> {
        let http = Client::builder().gzip(true).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Session used for bearer authentication.
    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    async fn request(&self, path: &str, query: &[(&str, String)]) -> RequestBuilder {
        let request = self
            .http
            .get(format!("{}/api/v1{path}", self.base_url))
            .query(query);
        match self.session.bearer().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(&body);
        warn!(status = status.as_u16(), %message, "Request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Fetches the dashboard aggregates for a period.
    pub async fn period_report(&self, period: &Period) -> Result<PeriodReport, ClientError> {
        let mut query = vec![("year", period.year().to_string())];
        match period {
            Period::Monthly { month, .. } => query.push(("month", month.to_string())),
            Period::Quarterly { quarter, .. } => query.push(("quarter", quarter.to_string())),
            Period::Yearly { .. } => {}
        }

        let path = format!("/financial/{}/", period.period_type().as_str());
        let request = self.request(&path, &query).await;
        Ok(Self::send(request).await?.json().await?)
    }

    /// Fetches the trial balance as of a date.
    pub async fn trial_balance(&self, as_of_date: NaiveDate) -> Result<TrialBalance, ClientError> {
        let query = [("as_of_date", as_of_date.to_string())];
        let request = self.request("/financial/trial-balance/", &query).await;
        Ok(Self::send(request).await?.json().await?)
    }

    /// Fetches spending per month of `year`.
    pub async fn monthly_summary(&self, year: i32) -> Result<Vec<MonthlySpending>, ClientError> {
        let query = [("year", year.to_string())];
        let request = self.request("/reports/monthly-summary/", &query).await;
        Ok(Self::send(request).await?.json().await?)
    }

    /// Fetches a statement view model.
    pub async fn statement(
        &self,
        request: &StatementRequest,
    ) -> Result<StatementViewModel, ClientError> {
        let builder = self.request(request.path(), &request.query()).await;
        Ok(Self::send(builder).await?.json().await?)
    }

    /// Fetches the transaction ledger for a period.
    pub async fn ledger(&self, range: DateRange) -> Result<Ledger, ClientError> {
        let builder = self
            .request("/financial/export-transactions/", &range_query(range))
            .await;
        Ok(Self::send(builder).await?.json().await?)
    }

    /// Downloads a statement rendered in `format`.
    pub async fn download(
        &self,
        request: &StatementRequest,
        format: ExportFormat,
    ) -> Result<Download, ClientError> {
        let mut query = request.query();
        query.push(("format", format.as_str().to_string()));
        let fallback = export_filename(request.kind().file_stem(), request.scope(), format);
        self.download_from(request.path(), &query, fallback).await
    }

    /// Downloads the transaction ledger rendered in `format`.
    pub async fn download_ledger(
        &self,
        range: DateRange,
        format: ExportFormat,
    ) -> Result<Download, ClientError> {
        let mut query = range_query(range);
        query.push(("format", format.as_str().to_string()));
        let fallback = export_filename(LEDGER_FILE_STEM, FileScope::Range(range), format);
        self.download_from("/financial/export-transactions/", &query, fallback)
            .await
    }

    async fn download_from(
        &self,
        path: &str,
        query: &[(&str, String)],
        fallback: String,
    ) -> Result<Download, ClientError> {
        let request = self.request(path, query).await.timeout(DOWNLOAD_TIMEOUT);
        let response = Self::send(request).await?;

        let header_value = |name: header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let filename = header_value(header::CONTENT_DISPOSITION)
            .and_then(|v| filename_from_disposition(&v))
            .unwrap_or(fallback);
        let content_type = header_value(header::CONTENT_TYPE);

        let bytes = response.bytes().await?.to_vec();
        debug!(%filename, bytes = bytes.len(), "Downloaded file");

        Ok(Download {
            filename,
            content_type,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(r#"attachment; filename="cash_flow_2024-01-01_2024-12-31.csv""#, Some("cash_flow_2024-01-01_2024-12-31.csv"))]
    #[case("attachment; filename=ledger.csv", Some("ledger.csv"))]
    #[case(r#"attachment; filename="""#, None)]
    #[case("attachment", None)]
    fn test_filename_from_disposition(#[case] value: &str, #[case] expected: Option<&str>) {
        assert_eq!(filename_from_disposition(value).as_deref(), expected);
    }

    #[test]
    fn test_balance_sheet_query() {
        let request = StatementRequest::BalanceSheet {
            as_of_date: date(2024, 3, 31),
            comparison_date: None,
        };
        assert_eq!(
            request.query(),
            vec![("as_of_date", "2024-03-31".to_string())]
        );
        assert_eq!(request.scope(), FileScope::AsOf(date(2024, 3, 31)));
    }

    #[test]
    fn test_range_query_with_comparison() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 12, 31)).unwrap();
        let request = StatementRequest::CashFlow {
            range,
            comparison: Some(range.one_year_earlier().unwrap()),
        };
        let query = request.query();
        assert_eq!(query.len(), 4);
        assert_eq!(query[2], ("comparison_start_date", "2023-01-01".to_string()));
        assert_eq!(request.path(), "/financial/nrb/cash-flow/");
        assert_eq!(request.kind(), StatementKind::CashFlow);
    }

    #[tokio::test]
    async fn test_save_in_strips_directories() {
        let download = Download {
            filename: "../../etc/balance_sheet.csv".into(),
            content_type: None,
            bytes: b"a,b\n".to_vec(),
        };
        let dir = std::env::temp_dir();
        let path = download.save_in(&dir).await.unwrap();
        assert_eq!(path, dir.join("balance_sheet.csv"));
        tokio::fs::remove_file(path).await.unwrap();
    }
}
