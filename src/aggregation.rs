//! Reduces a view into per-category totals, a time series for trend charts
//! and the status of a monthly spending goal.

use std::collections::BTreeMap;

use time::Date;

use crate::ledger::Transaction;

/// Share of the goal at which spending is considered close to the goal.
const GOAL_WARNING_RATIO: f64 = 0.8;

/// One transaction as a point on the amount-over-time chart.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    /// The day of the transaction.
    pub date: Date,
    /// The category, used to split the chart into one line per category.
    pub category: String,
    /// The transaction amount.
    pub amount: f64,
}

/// Sums transaction amounts per category.
///
/// # Returns
/// A map from the exact category string to the sum of its amounts, in sorted
/// category order.
pub fn aggregate_by_category(view: &[Transaction]) -> BTreeMap<String, f64> {
    let mut totals = BTreeMap::new();

    for transaction in view {
        *totals.entry(transaction.category.clone()).or_insert(0.0) += transaction.amount;
    }

    totals
}

/// Converts category totals into each category's share of the overall total.
///
/// Shares are fractions in `0.0..=1.0` when every total is non-negative.
/// Returns an empty vector if the overall total is zero.
pub fn category_shares(totals: &BTreeMap<String, f64>) -> Vec<(String, f64)> {
    let overall: f64 = totals.values().sum();

    if overall == 0.0 {
        return Vec::new();
    }

    totals
        .iter()
        .map(|(category, total)| (category.clone(), total / overall))
        .collect()
}

/// Lists the view as `(date, category, amount)` points sorted by date.
///
/// Transactions on the same day keep their ledger order. Days without
/// transactions are absent, no gap filling is done.
pub fn time_series(view: &[Transaction]) -> Vec<TimeSeriesPoint> {
    let mut points: Vec<TimeSeriesPoint> = view
        .iter()
        .map(|transaction| TimeSeriesPoint {
            date: transaction.date,
            category: transaction.category.clone(),
            amount: transaction.amount,
        })
        .collect();

    points.sort_by_key(|point| point.date);
    points
}

/// The sum of all amounts in the view.
pub fn total_amount(view: &[Transaction]) -> f64 {
    view.iter().map(|transaction| transaction.amount).sum()
}

/// How the spending in a view compares to a monthly goal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[allow(missing_docs)]
pub enum GoalStatus {
    /// Spending has reached or passed the goal.
    Exceeded { total: f64, goal: f64 },
    /// Spending has reached 80% of the goal.
    Near { total: f64, goal: f64 },
    /// Spending is below 80% of the goal.
    Within { total: f64, goal: f64 },
}

/// Compare the total spending of `view` against `goal`.
///
/// Returns `None` if `goal` is not a positive number, meaning no goal was set.
pub fn goal_status(view: &[Transaction], goal: f64) -> Option<GoalStatus> {
    if !(goal.is_finite() && goal > 0.0) {
        return None;
    }

    let total = total_amount(view);

    let status = if total >= goal {
        GoalStatus::Exceeded { total, goal }
    } else if total >= goal * GOAL_WARNING_RATIO {
        GoalStatus::Near { total, goal }
    } else {
        GoalStatus::Within { total, goal }
    };

    Some(status)
}
