//! Chart generation and rendering for the dashboard.
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with a corresponding HTML container and JavaScript initialization code:
//! - **Category totals**: bar chart of the summed amount per category
//! - **Category shares**: pie chart of each category's share of the total
//! - **Amount over time**: one line per category on a time axis
//! - **Forecast**: the projected amount for each of the next seven days

use std::collections::BTreeMap;

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    datatype::CompositeValue,
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, JsFunction,
        Label, Tooltip, Trigger,
    },
    series::{Bar, Line, Pie},
};
use maud::{Markup, PreEscaped, html};
use time::{Date, Duration};

use crate::{
    aggregation::{TimeSeriesPoint, category_shares},
    forecast::Forecast,
    html::HeadElement,
};

/// A chart with its HTML container ID and ECharts configuration.
pub(crate) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for charts.
///
/// # Arguments
/// * `charts` - The charts to render containers for
///
/// # Returns
/// Maud markup containing a grid of chart container divs.
pub(crate) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
///
/// # Arguments
/// * `charts` - The charts to generate initialization scripts for
///
/// # Returns
/// HeadElement containing the initialization JavaScript.
pub(crate) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id,
                escape_script_text(&chart.options)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Escapes `<` so free text in the options, such as a category named
/// `</script>`, cannot close the surrounding script element.
fn escape_script_text(options: &str) -> String {
    options.replace('<', "\\u003c")
}

pub(crate) fn category_totals_chart(totals: &BTreeMap<String, f64>) -> Chart {
    let labels: Vec<String> = totals.keys().cloned().collect();
    let values: Vec<f64> = totals.values().copied().collect();

    Chart::new()
        .title(Title::new().text("Spending by Category"))
        .tooltip(currency_tooltip())
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Total").data(values))
}

/// Pie chart of each category's percentage of the overall total.
pub(crate) fn category_shares_chart(totals: &BTreeMap<String, f64>) -> Chart {
    let shares = category_shares(totals);
    let data: Vec<(f64, &str)> = shares
        .iter()
        .map(|(category, share)| ((share * 10_000.0).round() / 100.0, category.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Share of Spending"))
        .tooltip(Tooltip::new().trigger(Trigger::Item).formatter("{b}: {c}%"))
        .legend(Legend::new().bottom("1%"))
        .series(
            Pie::new()
                .name("Share")
                .radius("60%")
                .label(Label::new().formatter("{b}: {c}%"))
                .data(data),
        )
}

/// Line chart of transaction amounts over time with one line per category.
///
/// `categories` controls the order of the lines and the legend.
pub(crate) fn amount_over_time_chart(series: &[TimeSeriesPoint], categories: &[String]) -> Chart {
    let mut chart = Chart::new()
        .title(Title::new().text("Amount over Time").left(20).top("1%"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().left(250).top("1%"))
        .grid(default_grid().top(90))
        .x_axis(Axis::new().type_(AxisType::Time))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        );

    for category in categories {
        let data: Vec<Vec<CompositeValue>> = series
            .iter()
            .filter(|point| &point.category == category)
            .map(|point| {
                vec![
                    CompositeValue::from(point.date.to_string()),
                    CompositeValue::from(point.amount),
                ]
            })
            .collect();

        chart = chart.series(
            Line::new()
                .name(category.as_str())
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(data),
        );
    }

    chart
}

/// Line chart of the projected amount on each of the days after `last_date`.
pub(crate) fn forecast_chart(forecast: &Forecast, last_date: Date) -> Chart {
    let labels: Vec<String> = forecast
        .points
        .iter()
        .map(|point| (last_date + Duration::days(point.day)).to_string())
        .collect();
    let values: Vec<f64> = forecast
        .points
        .iter()
        .map(|point| (point.amount * 100.0).round() / 100.0)
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Forecast")
                .subtext("Next seven days, linear trend"),
        )
        .tooltip(currency_tooltip())
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Forecast").data(values))
}

fn default_grid() -> Grid {
    Grid::new()
        .left("3%")
        .right("4%")
        .bottom("3%")
        .contain_label(true)
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('pt-BR', {
              style: 'currency',
              currency: 'BRL'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
