//! Ledger construction.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::aggregation::{Bill, TransactionType};
use crate::period::DateRange;
use crate::statements::format_amount;

/// Ledger column headers in print order.
pub const LEDGER_COLUMNS: [&str; 9] = [
    "Date",
    "Invoice #",
    "Vendor",
    "Category",
    "Type",
    "Debit",
    "Credit",
    "Balance",
    "Notes",
];

/// Stem used in ledger export file names.
pub const LEDGER_FILE_STEM: &str = "transaction_ledger";

/// One ledger line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Source bill.
    pub bill_id: Uuid,
    /// Bill date.
    pub date: NaiveDate,
    /// Invoice number, empty when absent.
    pub invoice_number: String,
    /// Vendor, empty when absent.
    pub vendor: String,
    /// Category, empty when absent.
    pub category: String,
    /// Debit or credit.
    pub transaction_type: TransactionType,
    /// Debit amount, for debit bills.
    pub debit: Option<Decimal>,
    /// Credit amount, for credit bills.
    pub credit: Option<Decimal>,
    /// Running balance after this line.
    pub balance: Decimal,
    /// Notes, empty when absent.
    pub notes: String,
}

impl LedgerRow {
    /// Display cells in [`LEDGER_COLUMNS`] order.
    #[must_use]
    pub fn cells(&self) -> [String; 9] {
        [
            self.date.to_string(),
            self.invoice_number.clone(),
            self.vendor.clone(),
            self.category.clone(),
            self.transaction_type.as_str().to_string(),
            format_amount(self.debit),
            format_amount(self.credit),
            format_amount(Some(self.balance)),
            self.notes.clone(),
        ]
    }
}

/// Transaction ledger over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    /// Range covered.
    pub period: DateRange,
    /// Lines sorted by date.
    pub rows: Vec<LedgerRow>,
    /// Sum of debits.
    pub total_debit: Decimal,
    /// Sum of credits.
    pub total_credit: Decimal,
    /// Balance after the last line.
    pub closing_balance: Decimal,
}

impl Ledger {
    /// Builds the ledger from bills dated inside `period`.
    ///
    /// Bills on the same date keep their input order.
    #[must_use]
    pub fn from_bills(bills: &[Bill], period: DateRange) -> Self {
        let mut selected: Vec<&Bill> = bills.iter().filter(|b| b.within(&period)).collect();
        selected.sort_by_key(|b| b.bill_date);

        let mut balance = Decimal::ZERO;
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;

        let rows = selected
            .into_iter()
            .map(|bill| {
                let (debit, credit) = match bill.transaction_type {
                    TransactionType::Debit => {
                        total_debit = total_debit.saturating_add(bill.amount_npr);
                        (Some(bill.amount_npr), None)
                    }
                    TransactionType::Credit => {
                        total_credit = total_credit.saturating_add(bill.amount_npr);
                        (None, Some(bill.amount_npr))
                    }
                };
                balance = balance.saturating_add(bill.signed_amount());

                LedgerRow {
                    bill_id: bill.id,
                    date: bill.bill_date,
                    invoice_number: bill.invoice_number.clone().unwrap_or_default(),
                    vendor: bill.vendor.clone().unwrap_or_default(),
                    category: bill.category.clone().unwrap_or_default(),
                    transaction_type: bill.transaction_type,
                    debit,
                    credit,
                    balance,
                    notes: bill.notes.clone().unwrap_or_default(),
                }
            })
            .collect();

        Self {
            period,
            rows,
            total_debit,
            total_credit,
            closing_balance: balance,
        }
    }

    /// Returns true if no bills fall in the range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
