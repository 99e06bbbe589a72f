//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions for rendering the dashboard UI

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
// axum_extra's Query treats empty fields, e.g. a cleared date input, as None.
use axum_extra::extract::Query;
use maud::{Markup, html};
use time::Date;

use crate::{
    Error,
    aggregation::{aggregate_by_category, goal_status, time_series, total_amount},
    charts::{
        DashboardChart, amount_over_time_chart, category_shares_chart, category_totals_chart,
        charts_script, charts_view, forecast_chart,
    },
    dashboard::{
        DashboardState,
        filter::FilterQuery,
        tables::{category_totals_table, forecast_table, goal_status_view, view_table},
    },
    endpoints,
    forecast::{ForecastUnavailable, forecast},
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, ECHARTS_SCRIPT, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base, currency_input_styles,
        format_currency, link,
    },
    ledger::Transaction,
    navigation::NavBar,
    timezone::local_today,
    view::{ALL_CATEGORIES, CategoryFilter, ViewFilter, categories_in, filter},
};

/// Holds all the data needed to render the dashboard.
struct DashboardData {
    view_filter: ViewFilter,
    goal: Option<f64>,
    categories: Vec<String>,
    charts: Vec<DashboardChart>,
    tables: Vec<Markup>,
    total: f64,
    forecast_notice: Option<ForecastUnavailable>,
    goal_status: Option<Markup>,
}

/// Display a page with the filtered ledger, its aggregates, charts and forecast.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, Error> {
    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::LedgerLockError)?
        .load()
        .inspect_err(|error| tracing::error!("could not load the ledger: {error}"))?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    if ledger.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar).into_response());
    }

    let today = local_today(&state.local_timezone)?;
    let data = build_dashboard_data(&ledger, &query, today);

    Ok(dashboard_view(nav_bar, &data).into_response())
}

/// Filters the ledger and builds all data needed for the dashboard display.
fn build_dashboard_data(
    ledger: &[Transaction],
    query: &FilterQuery,
    today: Date,
) -> DashboardData {
    let view_filter = query.view_filter(ledger, today);
    let view = filter(ledger, &view_filter);

    let totals = aggregate_by_category(&view);
    let series = time_series(&view);
    let view_categories = categories_in(&view);

    let mut charts = vec![
        DashboardChart {
            id: "category-totals-chart",
            options: category_totals_chart(&totals).to_string(),
        },
        DashboardChart {
            id: "category-shares-chart",
            options: category_shares_chart(&totals).to_string(),
        },
        DashboardChart {
            id: "amount-over-time-chart",
            options: amount_over_time_chart(&series, &view_categories).to_string(),
        },
    ];
    let mut tables = vec![category_totals_table(&totals)];

    // The forecast starts the day after the latest date in the view.
    let last_date = series.last().map(|point| point.date);
    let forecast_notice = match (forecast(&view), last_date) {
        (Ok(forecast), Some(last_date)) => {
            tracing::debug!(
                "Forecast slope {} and intercept {} over {} transactions",
                forecast.slope,
                forecast.intercept,
                view.len()
            );
            charts.push(DashboardChart {
                id: "forecast-chart",
                options: forecast_chart(&forecast, last_date).to_string(),
            });
            tables.push(forecast_table(&forecast, last_date));
            None
        }
        (Ok(_), None) => Some(ForecastUnavailable::EmptyView),
        (Err(reason), _) => {
            tracing::debug!("Forecast unavailable: {reason}");
            Some(reason)
        }
    };

    tables.push(view_table(&view));

    let goal = query.goal.filter(|goal| *goal > 0.0);
    let goal_status = goal
        .and_then(|goal| goal_status(&view, goal))
        .map(goal_status_view);

    DashboardData {
        view_filter,
        goal,
        categories: categories_in(ledger),
        charts,
        tables,
        total: total_amount(&view),
        forecast_notice,
        goal_status,
    }
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "adding a transaction");

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once you add some transactions.
                Get started by " (new_transaction_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// The date range, category and goal inputs. Submitting reloads the page
/// with the inputs in the query string.
fn filter_form(view_filter: &ViewFilter, categories: &[String], goal: Option<f64>) -> Markup {
    let selected_category = view_filter.category.to_string();

    html!(
        form
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            class="w-full grid grid-cols-1 md:grid-cols-5 gap-4 items-end mb-8"
        {
            div
            {
                label for="start" class=(FORM_LABEL_STYLE) { "From" }
                input
                    name="start"
                    id="start"
                    type="date"
                    value=(view_filter.date_range.start())
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="end" class=(FORM_LABEL_STYLE) { "To" }
                input
                    name="end"
                    id="end"
                    type="date"
                    value=(view_filter.date_range.end())
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }
                select name="category" id="category" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option
                        value=(ALL_CATEGORIES)
                        selected[view_filter.category == CategoryFilter::All]
                    {
                        (ALL_CATEGORIES)
                    }

                    @for category in categories {
                        option value=(category) selected[*category == selected_category] {
                            (category)
                        }
                    }
                }
            }

            div
            {
                label for="goal" class=(FORM_LABEL_STYLE) { "Monthly Goal" }
                div class="input-wrapper w-full"
                {
                    input
                        name="goal"
                        id="goal"
                        type="number"
                        min="0"
                        step="0.01"
                        placeholder="0.00"
                        value=[goal]
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }
        }
    )
}

/// Links to download the current view.
fn export_links(view_filter: &ViewFilter) -> Markup {
    let query_string = FilterQuery::query_string(view_filter);

    html!(
        div id="exports" class="w-full flex flex-row gap-4 mb-4"
        {
            a
                href={(endpoints::EXPORT_SPREADSHEET) "?" (query_string)}
                class=(BUTTON_SECONDARY_STYLE)
            {
                "Download Spreadsheet"
            }

            a
                href={(endpoints::EXPORT_REPORT) "?" (query_string)}
                class=(BUTTON_SECONDARY_STYLE)
            {
                "Download Report"
            }
        }
    )
}

/// Renders the main dashboard page with the filter, charts and tables.
fn dashboard_view(nav_bar: NavBar, data: &DashboardData) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (filter_form(&data.view_filter, &data.categories, data.goal))

            div class="w-full flex flex-row justify-between items-center mb-4"
            {
                p id="view-total" class="text-lg"
                {
                    "Total: "
                    span class="font-semibold" { (format_currency(data.total)) }
                }
            }

            @if let Some(goal_status) = &data.goal_status {
                (goal_status)
            }

            (export_links(&data.view_filter))

            (charts_view(&data.charts))

            @if let Some(reason) = data.forecast_notice {
                div
                    id="forecast-notice"
                    class="w-full mb-4 p-4 rounded-lg text-yellow-800 bg-yellow-50
                        dark:bg-gray-800 dark:text-yellow-300"
                {
                    p class="font-semibold" { "Insufficient data for a forecast" }
                    p { "Cannot forecast spending because " (reason) "." }
                }
            }

            div class="w-full grid grid-cols-1 gap-8"
            {
                @for table in &data.tables {
                    (table)
                }
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        charts_script(&data.charts),
        currency_input_styles(),
    ];

    base("Dashboard", &scripts, &content)
}
