//! Derives filtered views of the ledger by date range and category.

use std::{fmt, ops::RangeInclusive};

use serde::{Deserialize, Deserializer};
use time::Date;

use crate::ledger::Transaction;

/// The token that selects every category.
pub const ALL_CATEGORIES: &str = "All";

/// Restricts a view to a single category, or selects all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Keep transactions of every category.
    #[default]
    All,
    /// Keep only transactions whose category is exactly this string.
    Only(String),
}

impl CategoryFilter {
    /// Parse the value of a category selector, where [ALL_CATEGORIES] or an
    /// empty string selects every category.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_owned())
        }
    }

    fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(CategoryFilter::parse(&value))
    }
}

/// The selection applied to the ledger to produce a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFilter {
    /// The inclusive date range.
    pub date_range: RangeInclusive<Date>,
    /// The category restriction.
    pub category: CategoryFilter,
}

impl ViewFilter {
    /// Create a filter for the dates `start..=end` and `category`.
    pub fn new(start: Date, end: Date, category: CategoryFilter) -> Self {
        Self {
            date_range: start..=end,
            category,
        }
    }

    /// Whether `transaction` belongs in the view.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.date_range.contains(&transaction.date) && self.category.matches(&transaction.category)
    }
}

/// Select the transactions of `ledger` that match `view_filter`, keeping
/// ledger order.
pub fn filter(ledger: &[Transaction], view_filter: &ViewFilter) -> Vec<Transaction> {
    ledger
        .iter()
        .filter(|transaction| view_filter.matches(transaction))
        .cloned()
        .collect()
}

/// The distinct categories of `ledger` in the order they were first seen.
pub fn categories_in(ledger: &[Transaction]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();

    for transaction in ledger {
        if !categories.contains(&transaction.category) {
            categories.push(transaction.category.clone());
        }
    }

    categories
}

/// The earliest and latest transaction dates, or `None` for an empty ledger.
pub fn date_bounds(ledger: &[Transaction]) -> Option<RangeInclusive<Date>> {
    let first = ledger.iter().map(|transaction| transaction.date).min()?;
    let last = ledger.iter().map(|transaction| transaction.date).max()?;

    Some(first..=last)
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::ledger::Transaction;

    use super::{CategoryFilter, ViewFilter, categories_in, date_bounds, filter};

    fn transaction(amount: f64, category: &str, date: Date) -> Transaction {
        Transaction {
            amount,
            category: category.to_owned(),
            date,
            description: String::new(),
        }
    }

    fn get_test_ledger() -> Vec<Transaction> {
        vec![
            transaction(1.0, "Food", date!(2024 - 12 - 31)),
            transaction(2.0, "Food", date!(2025 - 01 - 01)),
            transaction(3.0, "Transport", date!(2025 - 01 - 15)),
            transaction(4.0, "Food", date!(2025 - 01 - 31)),
            transaction(5.0, "Transport", date!(2025 - 02 - 01)),
        ]
    }

    #[test]
    fn all_keeps_every_transaction_within_inclusive_range() {
        let ledger = get_test_ledger();
        let view_filter = ViewFilter::new(
            date!(2025 - 01 - 01),
            date!(2025 - 01 - 31),
            CategoryFilter::All,
        );

        let view = filter(&ledger, &view_filter);

        let amounts: Vec<f64> = view.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn category_further_restricts_the_view() {
        let ledger = get_test_ledger();
        let view_filter = ViewFilter::new(
            date!(2025 - 01 - 01),
            date!(2025 - 01 - 31),
            CategoryFilter::Only("Food".to_owned()),
        );

        let view = filter(&ledger, &view_filter);

        let amounts: Vec<f64> = view.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![2.0, 4.0]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ledger = get_test_ledger();
        let view_filter = ViewFilter::new(
            date!(2025 - 01 - 01),
            date!(2025 - 02 - 01),
            CategoryFilter::Only("Transport".to_owned()),
        );

        let once = filter(&ledger, &view_filter);
        let twice = filter(&once, &view_filter);

        assert_eq!(once, twice);
    }

    #[test]
    fn inverted_range_is_empty() {
        let ledger = get_test_ledger();
        let view_filter = ViewFilter::new(
            date!(2025 - 02 - 01),
            date!(2025 - 01 - 01),
            CategoryFilter::All,
        );

        assert!(filter(&ledger, &view_filter).is_empty());
    }

    #[test]
    fn parses_all_token() {
        assert_eq!(CategoryFilter::parse("All"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("Lazer"),
            CategoryFilter::Only("Lazer".to_owned())
        );
    }

    #[test]
    fn categories_are_listed_in_first_seen_order() {
        let ledger = get_test_ledger();

        assert_eq!(categories_in(&ledger), vec!["Food", "Transport"]);
    }

    #[test]
    fn date_bounds_span_the_ledger() {
        assert_eq!(
            date_bounds(&get_test_ledger()),
            Some(date!(2024 - 12 - 31)..=date!(2025 - 02 - 01))
        );
        assert_eq!(date_bounds(&[]), None);
    }
}
