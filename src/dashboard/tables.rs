//! Table views for dashboard data display.

use std::collections::BTreeMap;

use maud::{Markup, html};
use time::{Date, Duration};

use crate::{
    aggregation::{GoalStatus, category_shares},
    forecast::Forecast,
    html::{
        CATEGORY_BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        format_currency, format_percentage,
    },
    ledger::Transaction,
};

const TABLE_STYLE: &str = "w-full text-sm text-left text-gray-500 dark:text-gray-400";
const TABLE_CELL_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TABLE_CELL_YELLOW_STYLE: &str = "text-yellow-600 dark:text-yellow-400";
const TABLE_CELL_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// The rows of the view, in ledger order.
pub(super) fn view_table(view: &[Transaction]) -> Markup {
    html! {
        div id="view-table" class="w-full" {
            h3 class="text-xl font-semibold mb-4" { "Transactions" }

            div class="overflow-x-auto rounded-lg shadow" {
                table class=(TABLE_STYLE) {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        }
                    }
                    tbody {
                        @for transaction in view {
                            tr class=(TABLE_ROW_STYLE) {
                                td class=(TABLE_CELL_STYLE) { (transaction.date) }
                                td class=(TABLE_CELL_STYLE) { (transaction.description) }
                                td class=(TABLE_CELL_STYLE) {
                                    span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
                                }
                                td class=(TABLE_CELL_STYLE) { (format_currency(transaction.amount)) }
                            }
                        }

                        @if view.is_empty() {
                            tr class=(TABLE_ROW_STYLE) {
                                td colspan="4" class={(TABLE_CELL_STYLE) " text-center"} {
                                    "No transactions match the filter."
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The total and share of each category.
pub(super) fn category_totals_table(totals: &BTreeMap<String, f64>) -> Markup {
    let shares: BTreeMap<String, f64> = category_shares(totals).into_iter().collect();

    html! {
        div id="category-totals" class="w-full" {
            h3 class="text-xl font-semibold mb-4" { "Totals by Category" }

            div class="overflow-x-auto rounded-lg shadow" {
                table class=(TABLE_STYLE) {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Total" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Share" }
                        }
                    }
                    tbody {
                        @for (category, total) in totals {
                            tr class=(TABLE_ROW_STYLE) {
                                td class=(TABLE_CELL_STYLE) { (category) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(*total)) }
                                td class=(TABLE_CELL_STYLE) {
                                    @match shares.get(category) {
                                        Some(share) => { (format_percentage(*share)) }
                                        None => { "-" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The projected amount for each forecast day, dated from `last_date`.
pub(super) fn forecast_table(forecast: &Forecast, last_date: Date) -> Markup {
    html! {
        div id="forecast-table" class="w-full" {
            h3 class="text-xl font-semibold mb-4" { "Forecast for the Next 7 Days" }

            div class="overflow-x-auto rounded-lg shadow" {
                table class=(TABLE_STYLE) {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Day" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Predicted Amount" }
                        }
                    }
                    tbody {
                        @for point in &forecast.points {
                            tr class=(TABLE_ROW_STYLE) {
                                td class=(TABLE_CELL_STYLE) { "+" (point.day) }
                                td class=(TABLE_CELL_STYLE) { (last_date + Duration::days(point.day)) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(point.amount)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// The spending goal banner, coloured by how close the total is to the goal.
pub(super) fn goal_status_view(status: GoalStatus) -> Markup {
    let (style, message, total, goal) = match status {
        GoalStatus::Exceeded { total, goal } => {
            (TABLE_CELL_RED_STYLE, "Goal exceeded", total, goal)
        }
        GoalStatus::Near { total, goal } => {
            (TABLE_CELL_YELLOW_STYLE, "Close to the goal", total, goal)
        }
        GoalStatus::Within { total, goal } => {
            (TABLE_CELL_GREEN_STYLE, "Within the goal", total, goal)
        }
    };

    html! {
        div id="goal-status" class="w-full mb-4 p-4 rounded-lg bg-white dark:bg-gray-800 shadow" {
            p class={"font-semibold " (style)} { (message) }
            p {
                "Spent " (format_currency(total)) " of " (format_currency(goal))
                " (" (format_percentage(total / goal)) ")."
            }
        }
    }
}
