//! Export error types.

use thiserror::Error;

use super::format::ExportFormat;

/// Errors raised while rendering an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No renderer ships for this format.
    #[error("export format not supported: {0}")]
    Unsupported(ExportFormat),

    /// Unknown format name.
    #[error("unknown export format: {0}")]
    UnknownFormat(String),

    /// CSV writer failure.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook writer failure.
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// JSON serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Buffer flush failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
