//! JSON exporter.

use super::error::ExportError;
use super::exporter::StatementExporter;
use super::format::ExportFormat;
use crate::ledger::Ledger;
use crate::statements::StatementViewModel;

/// Writes the view model or ledger as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl StatementExporter for JsonExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Json
    }

    fn render_statement(&self, model: &StatementViewModel) -> Result<Vec<u8>, ExportError> {
        Ok(serde_json::to_vec_pretty(model)?)
    }

    fn render_ledger(&self, _company_name: &str, ledger: &Ledger) -> Result<Vec<u8>, ExportError> {
        Ok(serde_json::to_vec_pretty(ledger)?)
    }
}
