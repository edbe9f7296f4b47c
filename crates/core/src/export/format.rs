//! Export formats and file naming.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::ExportError;
use crate::period::DateRange;

/// Output format of a statement request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// The view model itself.
    #[default]
    Json,
    /// Comma separated values.
    Csv,
    /// PDF document.
    Pdf,
    /// Excel workbook.
    Excel,
}

impl ExportFormat {
    /// Query parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Pdf => "pdf",
            Self::Excel => "excel",
        }
    }

    /// File extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Pdf => "pdf",
            Self::Excel => "xlsx",
        }
    }

    /// MIME type of the rendered file.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv; charset=utf-8",
            Self::Pdf => "application/pdf",
            Self::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "pdf" => Ok(Self::Pdf),
            "excel" | "xlsx" => Ok(Self::Excel),
            _ => Err(ExportError::UnknownFormat(s.to_string())),
        }
    }
}

/// Date part of an export file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileScope {
    /// Point-in-time statements such as the balance sheet.
    AsOf(NaiveDate),
    /// Statements over a period.
    Range(DateRange),
}

impl fmt::Display for FileScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AsOf(date) => write!(f, "{date}"),
            Self::Range(range) => write!(f, "{}_{}", range.start_date, range.end_date),
        }
    }
}

/// Builds `{stem}_{date-or-range}.{ext}`.
///
/// ```
/// use chrono::NaiveDate;
/// use nepfin_core::export::{ExportFormat, FileScope, export_filename};
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
/// assert_eq!(
///     export_filename("balance_sheet", FileScope::AsOf(date), ExportFormat::Excel),
///     "balance_sheet_2024-03-31.xlsx"
/// );
/// ```
#[must_use]
pub fn export_filename(stem: &str, scope: FileScope, format: ExportFormat) -> String {
    format!("{stem}_{scope}.{}", format.extension())
}
