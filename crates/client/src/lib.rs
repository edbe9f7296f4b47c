//! HTTP client for Nepfin.
//!
//! This crate provides:
//! - `FinancialClient` for dashboard reports, statements and downloads
//! - An explicit bearer `Session`
//! - `PeriodReportLoader`, which drops out-of-order responses

pub mod client;
pub mod error;
pub mod loader;
pub mod session;

pub use client::{
    DOWNLOAD_TIMEOUT, Download, FinancialClient, StatementRequest, filename_from_disposition,
};
pub use error::{ClientError, GENERIC_ERROR_MESSAGE, extract_error_message};
pub use loader::{PeriodReportLoader, ReportSource};
pub use session::Session;
