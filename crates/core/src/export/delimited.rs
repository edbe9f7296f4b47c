//! CSV exporter.
//!
//! Statements use the four-column layout (Particulars, Schedule, Current,
//! Previous) under a header block of company, title, period and currency,
//! with the schedule footer as the last record.

use csv::{Writer, WriterBuilder};

use super::error::ExportError;
use super::exporter::{LEDGER_TITLE, StatementExporter};
use super::format::ExportFormat;
use crate::ledger::{LEDGER_COLUMNS, Ledger};
use crate::statements::{RowKind, StatementViewModel, format_amount};

/// Indentation applied to line item labels.
const INDENT: &str = "  ";

/// Writes statements and ledgers as CSV.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl CsvExporter {
    fn writer() -> Writer<Vec<u8>> {
        WriterBuilder::new().flexible(true).from_writer(Vec::new())
    }

    fn finish(writer: Writer<Vec<u8>>) -> Result<Vec<u8>, ExportError> {
        writer
            .into_inner()
            .map_err(|e| {
                let source = e.error();
                ExportError::Io(std::io::Error::new(source.kind(), source.to_string()))
            })
    }
}

impl StatementExporter for CsvExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Csv
    }

    fn render_statement(&self, model: &StatementViewModel) -> Result<Vec<u8>, ExportError> {
        let header = &model.header;
        let mut writer = Self::writer();

        writer.write_record([header.company_name.as_str()])?;
        writer.write_record([header.title.as_str()])?;
        writer.write_record([header.period_caption.as_str()])?;
        writer.write_record([format!("Currency: {}", header.currency)])?;
        writer.write_record([
            "Particulars",
            "Schedule",
            header.current_column.as_str(),
            header.comparison_column.as_str(),
        ])?;

        for row in &model.rows {
            let label = match row.row_kind {
                RowKind::LineItem => format!("{INDENT}{}", row.label),
                _ => row.label.clone(),
            };
            let schedule = row.schedule_number.map(|n| n.to_string()).unwrap_or_default();
            writer.write_record([
                label.as_str(),
                schedule.as_str(),
                row.current_display.as_str(),
                row.comparison_display.as_str(),
            ])?;
        }

        writer.write_record([model.footer.as_str()])?;
        Self::finish(writer)
    }

    fn render_ledger(&self, company_name: &str, ledger: &Ledger) -> Result<Vec<u8>, ExportError> {
        let mut writer = Self::writer();

        writer.write_record([company_name])?;
        writer.write_record([LEDGER_TITLE])?;
        writer.write_record([ledger.period.caption()])?;
        writer.write_record(LEDGER_COLUMNS)?;

        for row in &ledger.rows {
            writer.write_record(row.cells())?;
        }

        writer.write_record([
            "Total".to_string(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            format_amount(Some(ledger.total_debit)),
            format_amount(Some(ledger.total_credit)),
            format_amount(Some(ledger.closing_balance)),
            String::new(),
        ])?;

        Self::finish(writer)
    }
}
