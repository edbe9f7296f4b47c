//! Exporter trait and lookup.

use super::delimited::CsvExporter;
use super::error::ExportError;
use super::format::ExportFormat;
use super::json::JsonExporter;
use super::xlsx::XlsxExporter;
use crate::ledger::Ledger;
use crate::statements::StatementViewModel;

/// Title printed above the ledger.
pub const LEDGER_TITLE: &str = "Transaction Ledger";

/// Renders view models and ledgers into a downloadable file body.
pub trait StatementExporter: Send + Sync {
    /// Format this exporter produces.
    fn format(&self) -> ExportFormat;

    /// Renders a statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn render_statement(&self, model: &StatementViewModel) -> Result<Vec<u8>, ExportError>;

    /// Renders a transaction ledger.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    fn render_ledger(&self, company_name: &str, ledger: &Ledger) -> Result<Vec<u8>, ExportError>;
}

/// Returns the exporter for a format.
///
/// # Errors
///
/// Returns [`ExportError::Unsupported`] for PDF.
pub fn exporter_for(format: ExportFormat) -> Result<Box<dyn StatementExporter>, ExportError> {
    match format {
        ExportFormat::Json => Ok(Box::new(JsonExporter)),
        ExportFormat::Csv => Ok(Box::new(CsvExporter)),
        ExportFormat::Excel => Ok(Box::new(XlsxExporter)),
        ExportFormat::Pdf => Err(ExportError::Unsupported(format)),
    }
}
