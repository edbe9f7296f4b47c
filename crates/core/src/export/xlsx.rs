//! Excel workbook exporter.
//!
//! Same layout as the CSV export, but amounts are written as numbers with
//! an accounting format so the sheet stays summable. Zero and missing
//! amounts keep their `-` placeholder as text.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use super::error::ExportError;
use super::exporter::{LEDGER_TITLE, StatementExporter};
use super::format::ExportFormat;
use crate::ledger::{LEDGER_COLUMNS, Ledger};
use crate::statements::{RowKind, StatementViewModel, format_amount, round_amount};

const AMOUNT_FORMAT: &str = "#,##0.00;(#,##0.00);\"-\"";

/// Cell formats shared by one workbook.
struct Styles {
    bold: Format,
    line: Format,
    amount: Format,
    bold_amount: Format,
}

impl Styles {
    fn new() -> Self {
        Self {
            bold: Format::new().set_bold(),
            line: Format::new().set_indent(1),
            amount: Format::new().set_num_format(AMOUNT_FORMAT),
            bold_amount: Format::new().set_bold().set_num_format(AMOUNT_FORMAT),
        }
    }
}

/// Writes an amount as a number, or its display text when it rounds to
/// zero or is missing.
fn write_amount(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    amount: Option<Decimal>,
    format: &Format,
) -> Result<(), XlsxError> {
    let value = amount
        .map(round_amount)
        .filter(|a| !a.is_zero())
        .and_then(|a| a.to_f64());
    match value {
        Some(value) => sheet.write_number_with_format(row, col, value, format)?,
        None => sheet.write_string_with_format(row, col, format_amount(amount), format)?,
    };
    Ok(())
}

/// Writes statements and ledgers as `.xlsx` workbooks.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxExporter;

impl StatementExporter for XlsxExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Excel
    }

    fn render_statement(&self, model: &StatementViewModel) -> Result<Vec<u8>, ExportError> {
        let styles = Styles::new();
        let header = &model.header;
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(model.kind.file_stem())?;
        sheet.set_column_width(0, 50)?;
        sheet.set_column_width(1, 10)?;
        sheet.set_column_width(2, 20)?;
        sheet.set_column_width(3, 20)?;

        sheet.write_string_with_format(0, 0, &header.company_name, &styles.bold)?;
        sheet.write_string_with_format(1, 0, &header.title, &styles.bold)?;
        sheet.write_string(2, 0, &header.period_caption)?;
        sheet.write_string(3, 0, format!("Currency: {}", header.currency))?;
        let columns = [
            "Particulars",
            "Schedule",
            header.current_column.as_str(),
            header.comparison_column.as_str(),
        ];
        for (col, title) in (0u16..).zip(columns) {
            sheet.write_string_with_format(4, col, title, &styles.bold)?;
        }

        let mut row = 5;
        for line in &model.rows {
            let (label_format, amount_format) = match line.row_kind {
                RowKind::LineItem => (&styles.line, &styles.amount),
                RowKind::SectionHeader | RowKind::Subtotal | RowKind::Total => {
                    (&styles.bold, &styles.bold_amount)
                }
                RowKind::Spacer => {
                    row += 1;
                    continue;
                }
            };
            sheet.write_string_with_format(row, 0, &line.label, label_format)?;
            if let Some(number) = line.schedule_number {
                sheet.write_number(row, 1, number)?;
            }
            if line.row_kind != RowKind::SectionHeader {
                write_amount(sheet, row, 2, line.current_amount, amount_format)?;
                write_amount(sheet, row, 3, line.comparison_amount, amount_format)?;
            }
            row += 1;
        }

        sheet.write_string(row, 0, &model.footer)?;
        Ok(workbook.save_to_buffer()?)
    }

    fn render_ledger(&self, company_name: &str, ledger: &Ledger) -> Result<Vec<u8>, ExportError> {
        let styles = Styles::new();
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("transaction_ledger")?;
        sheet.set_column_width(2, 25)?;
        sheet.set_column_width(3, 20)?;
        sheet.set_column_width(8, 30)?;

        sheet.write_string_with_format(0, 0, company_name, &styles.bold)?;
        sheet.write_string_with_format(1, 0, LEDGER_TITLE, &styles.bold)?;
        sheet.write_string(2, 0, ledger.period.caption())?;
        for (col, title) in (0u16..).zip(LEDGER_COLUMNS) {
            sheet.write_string_with_format(3, col, title, &styles.bold)?;
        }

        let mut row = 4;
        for line in &ledger.rows {
            sheet.write_string(row, 0, line.date.to_string())?;
            sheet.write_string(row, 1, &line.invoice_number)?;
            sheet.write_string(row, 2, &line.vendor)?;
            sheet.write_string(row, 3, &line.category)?;
            sheet.write_string(row, 4, line.transaction_type.as_str())?;
            write_amount(sheet, row, 5, line.debit, &styles.amount)?;
            write_amount(sheet, row, 6, line.credit, &styles.amount)?;
            write_amount(sheet, row, 7, Some(line.balance), &styles.amount)?;
            sheet.write_string(row, 8, &line.notes)?;
            row += 1;
        }

        sheet.write_string_with_format(row, 0, "Total", &styles.bold)?;
        write_amount(sheet, row, 5, Some(ledger.total_debit), &styles.bold_amount)?;
        write_amount(sheet, row, 6, Some(ledger.total_credit), &styles.bold_amount)?;
        write_amount(sheet, row, 7, Some(ledger.closing_balance), &styles.bold_amount)?;

        Ok(workbook.save_to_buffer()?)
    }
}
