//! Static schedule tables for the balance sheet and cash flow statement.
//!
//! Unlike expenses, these lines are never keyword classified: each line has a
//! fixed label, a fixed schedule number (or none) and a fixed set of bill
//! category names that feed it.

use serde::{Deserialize, Serialize};

/// Balance sheet section, in print order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceSheetSection {
    /// Non-current assets.
    NonCurrentAssets,
    /// Current assets.
    CurrentAssets,
    /// Equity.
    Equity,
    /// Non-current liabilities.
    NonCurrentLiabilities,
    /// Current liabilities.
    CurrentLiabilities,
}

impl BalanceSheetSection {
    /// All sections in print order.
    pub const ALL: [Self; 5] = [
        Self::NonCurrentAssets,
        Self::CurrentAssets,
        Self::Equity,
        Self::NonCurrentLiabilities,
        Self::CurrentLiabilities,
    ];

    /// Section heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::NonCurrentAssets => "Non Current Assets",
            Self::CurrentAssets => "Current Assets",
            Self::Equity => "Equity",
            Self::NonCurrentLiabilities => "Non Current Liabilities",
            Self::CurrentLiabilities => "Current Liabilities",
        }
    }

    /// Subtotal label printed under the section.
    #[must_use]
    pub const fn subtotal_label(self) -> &'static str {
        match self {
            Self::NonCurrentAssets => "Total Non-Current Assets",
            Self::CurrentAssets => "Total Current Assets",
            Self::Equity => "Total Equity",
            Self::NonCurrentLiabilities => "Total Non-Current Liabilities",
            Self::CurrentLiabilities => "Total Current Liabilities",
        }
    }

    /// Lines belonging to this section, in print order.
    #[must_use]
    pub const fn lines(self) -> &'static [BalanceSheetLine] {
        use BalanceSheetLine as L;
        match self {
            Self::NonCurrentAssets => &[L::PropertyPlantEquipment, L::OtherReceivables],
            Self::CurrentAssets => &[
                L::Investments,
                L::LoansAndAdvances,
                L::Inventories,
                L::AdvanceIncomeTax,
                L::TradeReceivables,
                L::Cash,
                L::VatReceivable,
            ],
            Self::Equity => &[L::ShareCapital, L::Reserves],
            Self::NonCurrentLiabilities => &[L::NonCurrentLoans, L::Provisions],
            Self::CurrentLiabilities => &[
                L::CurrentLoans,
                L::TradePayables,
                L::IncomeTaxLiability,
                L::VatPayable,
            ],
        }
    }
}

/// A balance sheet line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceSheetLine {
    /// Property, plant and equipment.
    PropertyPlantEquipment,
    /// Non-current other receivables.
    OtherReceivables,
    /// Short-term investments.
    Investments,
    /// Loans and advances given.
    LoansAndAdvances,
    /// Inventories.
    Inventories,
    /// Advance income tax paid.
    AdvanceIncomeTax,
    /// Trade and other receivables.
    TradeReceivables,
    /// Cash and cash equivalents.
    Cash,
    /// VAT receivable.
    VatReceivable,
    /// Share capital.
    ShareCapital,
    /// Reserves (retained earnings).
    Reserves,
    /// Long-term loans and borrowings.
    NonCurrentLoans,
    /// Provisions.
    Provisions,
    /// Short-term loans and borrowings.
    CurrentLoans,
    /// Trade and other payables.
    TradePayables,
    /// Income tax liability.
    IncomeTaxLiability,
    /// VAT payable.
    VatPayable,
}

impl BalanceSheetLine {
    /// Printed label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PropertyPlantEquipment => "Property, Plant & Equipment",
            Self::OtherReceivables => "Other Receivables",
            Self::Investments => "Investments",
            Self::LoansAndAdvances => "Loans And Advances",
            Self::Inventories => "Inventories",
            Self::AdvanceIncomeTax => "Advance Income Tax",
            Self::TradeReceivables => "Trade & Other Receivables",
            Self::Cash => "Cash & Cash Equivalents",
            Self::VatReceivable => "Vat Receivable",
            Self::ShareCapital => "Share Capital",
            Self::Reserves => "Reserves",
            Self::NonCurrentLoans | Self::CurrentLoans => "Loans & Borrowings",
            Self::Provisions => "Provisions",
            Self::TradePayables => "Trade & Other Payables",
            Self::IncomeTaxLiability => "Income Tax Liability",
            Self::VatPayable => "Vat Payable",
        }
    }

    /// Fixed schedule number, if the line carries one.
    #[must_use]
    pub const fn schedule(self) -> Option<u8> {
        match self {
            Self::PropertyPlantEquipment => Some(1),
            Self::Inventories => Some(2),
            Self::AdvanceIncomeTax => Some(3),
            Self::TradeReceivables => Some(4),
            Self::Cash => Some(5),
            Self::ShareCapital => Some(6),
            Self::NonCurrentLoans => Some(7),
            Self::CurrentLoans => Some(8),
            Self::TradePayables => Some(9),
            Self::IncomeTaxLiability => Some(10),
            Self::VatPayable => Some(11),
            Self::Provisions => Some(12),
            Self::OtherReceivables
            | Self::Investments
            | Self::LoansAndAdvances
            | Self::VatReceivable
            | Self::Reserves => None,
        }
    }

    /// Bill category names (matched case-insensitively) that feed this line.
    ///
    /// Reserves has no categories; it is derived from revenue less expenses.
    #[must_use]
    pub const fn category_names(self) -> &'static [&'static str] {
        match self {
            Self::PropertyPlantEquipment => &[
                "Fixed Assets",
                "Property and Equipment",
                "Equipment",
                "Furniture",
                "Property, Plant & Equipment",
            ],
            Self::OtherReceivables => &["Other Receivables"],
            Self::Investments => &["Investments"],
            Self::LoansAndAdvances => &["Loans and Advances"],
            Self::Inventories => &["Inventory", "Stock"],
            Self::AdvanceIncomeTax => &["Advance Tax", "Tax Receivable"],
            Self::TradeReceivables => &["Accounts Receivable", "Trade Receivables", "Receivables"],
            Self::Cash => &["Cash", "Bank", "Cash and Bank"],
            Self::VatReceivable => &["VAT Receivable", "Input VAT"],
            Self::ShareCapital => &["Share Capital", "Capital"],
            Self::Reserves => &[],
            Self::NonCurrentLoans => &["Long-term Loans", "Long-term Borrowings"],
            Self::Provisions => &["Provisions"],
            Self::CurrentLoans => &["Short-term Loans", "Short-term Borrowings"],
            Self::TradePayables => &["Accounts Payable", "Trade Payables", "Payables"],
            Self::IncomeTaxLiability => &["Income Tax Payable", "Tax Liability"],
            Self::VatPayable => &["VAT Payable", "Output VAT"],
        }
    }
}

/// Cash flow lines that carry a schedule number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashFlowLine {
    /// Profit/(loss) before tax.
    ProfitBeforeTax,
    /// Depreciation and amortization add-back.
    Depreciation,
    /// Income tax paid.
    IncomeTaxPaid,
    /// Purchase of property, plant and equipment.
    PurchaseOfProperty,
    /// Proceeds from borrowings.
    ProceedsFromBorrowings,
    /// Dividends paid.
    DividendsPaid,
}

impl CashFlowLine {
    /// All scheduled lines in print order.
    pub const ALL: [Self; 6] = [
        Self::ProfitBeforeTax,
        Self::Depreciation,
        Self::IncomeTaxPaid,
        Self::PurchaseOfProperty,
        Self::ProceedsFromBorrowings,
        Self::DividendsPaid,
    ];

    /// Printed label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ProfitBeforeTax => "Profit/(Loss) Before Tax",
            Self::Depreciation => "Depreciation and Amortization",
            Self::IncomeTaxPaid => "Less: Income Tax Paid",
            Self::PurchaseOfProperty => "Purchase of Property, Plant & Equipment",
            Self::ProceedsFromBorrowings => "Proceeds from Borrowings",
            Self::DividendsPaid => "Dividends Paid",
        }
    }

    /// Fixed schedule number.
    #[must_use]
    pub const fn schedule(self) -> u8 {
        match self {
            Self::ProfitBeforeTax => 18,
            Self::Depreciation => 19,
            Self::IncomeTaxPaid => 20,
            Self::PurchaseOfProperty => 21,
            Self::ProceedsFromBorrowings => 22,
            Self::DividendsPaid => 23,
        }
    }
}
