//! Keyword classification of income statement categories.

use serde::{Deserialize, Serialize};

/// A schedule number with its canonical display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry {
    /// Schedule number.
    pub number: u8,
    /// Canonical display name.
    pub name: &'static str,
}

/// Keywords that map a category onto one schedule.
#[derive(Debug, Clone, Copy)]
pub struct KeywordGroup {
    /// Lowercase substrings, any of which selects this group.
    pub keywords: &'static [&'static str],
    /// Target schedule.
    pub schedule: ScheduleEntry,
}

/// Revenue from operations, schedule 10.
pub const REVENUE_FROM_OPERATIONS: ScheduleEntry = ScheduleEntry {
    number: 10,
    name: "Revenue from Operations",
};

/// Other income, schedule 11.
pub const OTHER_INCOME: ScheduleEntry = ScheduleEntry {
    number: 11,
    name: "Other Income",
};

/// Income tax expense, schedule 17.
pub const INCOME_TAX: ScheduleEntry = ScheduleEntry {
    number: 17,
    name: "Income Tax Expense",
};

/// Expense keyword groups in match order. First match wins, so this order is
/// part of the contract for categories that hit several groups.
pub const EXPENSE_SCHEDULES: &[KeywordGroup] = &[
    KeywordGroup {
        keywords: &["cost", "cogs"],
        schedule: ScheduleEntry {
            number: 12,
            name: "Cost of Sales",
        },
    },
    KeywordGroup {
        keywords: &["admin"],
        schedule: ScheduleEntry {
            number: 13,
            name: "Administrative Expenses",
        },
    },
    KeywordGroup {
        keywords: &["selling", "distribution"],
        schedule: ScheduleEntry {
            number: 14,
            name: "Selling and Distribution Expenses",
        },
    },
    KeywordGroup {
        keywords: &["finance", "interest"],
        schedule: ScheduleEntry {
            number: 15,
            name: "Finance Costs",
        },
    },
    KeywordGroup {
        keywords: &["depreciation", "amortization"],
        schedule: ScheduleEntry {
            number: 16,
            name: "Depreciation & Amortization",
        },
    },
];

/// Revenue keywords that move a category into Other Income.
const OTHER_INCOME_KEYWORDS: &[&str] = &[
    "other",
    "interest income",
    "non-operating",
    "commission",
    "fee",
];

/// Result of classifying a category name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRef {
    /// Schedule number, `None` when no keyword matched.
    pub number: Option<u8>,
    /// Label to print: the canonical name, or the original category name.
    pub display_name: String,
}

impl ScheduleRef {
    /// Returns true if a schedule was assigned.
    #[must_use]
    pub const fn is_classified(&self) -> bool {
        self.number.is_some()
    }
}

impl From<ScheduleEntry> for ScheduleRef {
    fn from(entry: ScheduleEntry) -> Self {
        Self {
            number: Some(entry.number),
            display_name: entry.name.to_string(),
        }
    }
}

/// Revenue bucket on the income statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevenueClass {
    /// Schedule 10.
    Operations,
    /// Schedule 11.
    Other,
}

/// Classifies an expense category into schedules 12-16.
///
/// Matching is a case-insensitive substring test against
/// [`EXPENSE_SCHEDULES`] in order. Unmatched names pass through unchanged
/// without a schedule number.
#[must_use]
pub fn classify_expense(category: &str) -> ScheduleRef {
    let lowered = category.to_lowercase();

    EXPENSE_SCHEDULES
        .iter()
        .find(|group| group.keywords.iter().any(|k| lowered.contains(k)))
        .map_or_else(
            || ScheduleRef {
                number: None,
                display_name: category.to_string(),
            },
            |group| group.schedule.into(),
        )
}

/// Classifies a revenue category into operations (10) or other income (11).
#[must_use]
pub fn classify_revenue(category: &str) -> RevenueClass {
    let lowered = category.to_lowercase();

    if OTHER_INCOME_KEYWORDS.iter().any(|k| lowered.contains(k)) {
        RevenueClass::Other
    } else {
        RevenueClass::Operations
    }
}
