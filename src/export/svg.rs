//! Server-rendered SVG charts for the downloadable report.
//!
//! The report must open without network access, so the charts are drawn here
//! instead of by ECharts in the browser.

use std::{collections::BTreeMap, f64::consts::PI};

use maud::{Markup, html};
use time::Date;

use crate::{
    aggregation::{TimeSeriesPoint, category_shares},
    html::{format_currency, format_percentage},
};

/// The default ECharts palette, so the report matches the dashboard.
const PALETTE: [&str; 9] = [
    "#5470c6", "#91cc75", "#fac858", "#ee6666", "#73c0de", "#3ba272", "#fc8452", "#9a60b4",
    "#ea7ccc",
];

const WIDTH: f64 = 760.0;
const HEIGHT: f64 = 360.0;
const LEGEND_X: f64 = 580.0;

fn color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// Pie chart of each category's share of the total.
///
/// Categories with a non-positive share have no slice but are listed in the
/// legend.
pub(super) fn category_shares_svg(totals: &BTreeMap<String, f64>) -> Markup {
    const CENTER: (f64, f64) = (200.0, 185.0);
    const RADIUS: f64 = 150.0;

    let shares = category_shares(totals);
    let mut start = -PI / 2.0;
    let mut slices = Vec::new();

    for (index, (_, share)) in shares.iter().enumerate() {
        if *share <= 0.0 {
            continue;
        }

        let sweep = share.min(1.0) * 2.0 * PI;
        slices.push((color(index), slice_path(CENTER, RADIUS, start, sweep)));
        start += sweep;
    }

    html! {
        svg
            id="category-shares-chart"
            xmlns="http://www.w3.org/2000/svg"
            viewBox={"0 0 " (WIDTH) " " (HEIGHT)}
            width=(WIDTH)
            height=(HEIGHT)
            role="img"
        {
            title { "Share of Spending" }

            @for (fill, slice) in &slices {
                @match slice {
                    Some(d) => {
                        path d=(d) fill=(fill) stroke="#ffffff" stroke-width="1" {}
                    }
                    None => {
                        circle cx=(CENTER.0) cy=(CENTER.1) r=(RADIUS) fill=(fill) {}
                    }
                }
            }

            @for (index, (category, share)) in shares.iter().enumerate() {
                (legend_entry(index, &format!("{category}: {}", format_percentage(*share))))
            }
        }
    }
}

/// The SVG path of a slice starting at angle `start` spanning `sweep`
/// radians, or `None` for a full circle, which an arc cannot draw.
fn slice_path(center: (f64, f64), radius: f64, start: f64, sweep: f64) -> Option<String> {
    if sweep >= 2.0 * PI - 1e-9 {
        return None;
    }

    let end = start + sweep;
    let (x1, y1) = (
        center.0 + radius * start.cos(),
        center.1 + radius * start.sin(),
    );
    let (x2, y2) = (center.0 + radius * end.cos(), center.1 + radius * end.sin());
    let large_arc = u8::from(sweep > PI);

    Some(format!(
        "M {:.2} {:.2} L {x1:.2} {y1:.2} A {radius:.2} {radius:.2} 0 {large_arc} 1 {x2:.2} {y2:.2} Z",
        center.0, center.1
    ))
}

/// Line chart of amounts over time with one line per category.
pub(super) fn amount_over_time_svg(series: &[TimeSeriesPoint], categories: &[String]) -> Markup {
    let plot = PlotArea::new(series);

    html! {
        svg
            id="amount-over-time-chart"
            xmlns="http://www.w3.org/2000/svg"
            viewBox={"0 0 " (WIDTH) " " (HEIGHT)}
            width=(WIDTH)
            height=(HEIGHT)
            role="img"
        {
            title { "Amount over Time" }

            line
                x1=(PlotArea::LEFT) y1=(PlotArea::BOTTOM)
                x2=(PlotArea::RIGHT) y2=(PlotArea::BOTTOM)
                stroke="#6b7280" {}
            line
                x1=(PlotArea::LEFT) y1=(PlotArea::TOP)
                x2=(PlotArea::LEFT) y2=(PlotArea::BOTTOM)
                stroke="#6b7280" {}

            @if let Some(plot) = &plot {
                text x=(PlotArea::LEFT - 6.0) y=(PlotArea::TOP + 4.0) text-anchor="end" font-size="11" {
                    (format_currency(plot.max_amount))
                }
                text x=(PlotArea::LEFT - 6.0) y=(PlotArea::BOTTOM) text-anchor="end" font-size="11" {
                    (format_currency(plot.min_amount))
                }
                text x=(PlotArea::LEFT) y=(PlotArea::BOTTOM + 18.0) font-size="11" {
                    (plot.first_date)
                }
                text x=(PlotArea::RIGHT) y=(PlotArea::BOTTOM + 18.0) text-anchor="end" font-size="11" {
                    (plot.last_date)
                }

                @for (index, category) in categories.iter().enumerate() {
                    @let points = plot.points(series, category);
                    @let coordinates = points
                        .iter()
                        .map(|(x, y)| format!("{x:.1},{y:.1}"))
                        .collect::<Vec<_>>()
                        .join(" ");
                    polyline
                        points=(coordinates)
                        fill="none"
                        stroke=(color(index))
                        stroke-width="2" {}
                    @for (x, y) in &points {
                        circle cx=(format!("{x:.1}")) cy=(format!("{y:.1}")) r="3" fill=(color(index)) {}
                    }
                }
            }

            @for (index, category) in categories.iter().enumerate() {
                (legend_entry(index, category))
            }
        }
    }
}

/// Maps dates and amounts onto the drawing area of the line chart.
struct PlotArea {
    first_date: Date,
    last_date: Date,
    min_amount: f64,
    max_amount: f64,
}

impl PlotArea {
    const LEFT: f64 = 90.0;
    const RIGHT: f64 = 560.0;
    const TOP: f64 = 30.0;
    const BOTTOM: f64 = 320.0;

    /// `None` for an empty series.
    fn new(series: &[TimeSeriesPoint]) -> Option<Self> {
        let first_date = series.iter().map(|point| point.date).min()?;
        let last_date = series.iter().map(|point| point.date).max()?;
        let min_amount = series
            .iter()
            .map(|point| point.amount)
            .fold(0.0, f64::min);
        let max_amount = series
            .iter()
            .map(|point| point.amount)
            .fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            first_date,
            last_date,
            min_amount,
            max_amount: if max_amount > min_amount {
                max_amount
            } else {
                min_amount + 1.0
            },
        })
    }

    fn x(&self, date: Date) -> f64 {
        let span = (self.last_date - self.first_date).whole_days();

        if span == 0 {
            return (Self::LEFT + Self::RIGHT) / 2.0;
        }

        let offset = (date - self.first_date).whole_days() as f64 / span as f64;
        Self::LEFT + offset * (Self::RIGHT - Self::LEFT)
    }

    fn y(&self, amount: f64) -> f64 {
        let fraction = (amount - self.min_amount) / (self.max_amount - self.min_amount);
        Self::BOTTOM - fraction * (Self::BOTTOM - Self::TOP)
    }

    fn points(&self, series: &[TimeSeriesPoint], category: &str) -> Vec<(f64, f64)> {
        series
            .iter()
            .filter(|point| point.category == category)
            .map(|point| (self.x(point.date), self.y(point.amount)))
            .collect()
    }
}

fn legend_entry(index: usize, label: &str) -> Markup {
    let y = 40.0 + index as f64 * 22.0;

    html! {
        rect x=(LEGEND_X) y=(y - 10.0) width="12" height="12" fill=(color(index)) {}
        text x=(LEGEND_X + 18.0) y=(y) font-size="12" { (label) }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::aggregation::TimeSeriesPoint;

    use super::{amount_over_time_svg, category_shares_svg};

    fn count(html: &Html, selector: &str) -> usize {
        html.select(&Selector::parse(selector).unwrap()).count()
    }

    #[test]
    fn pie_has_a_slice_per_category() {
        let totals = BTreeMap::from([("Food".to_owned(), 120.0), ("Transport".to_owned(), 30.0)]);

        let html = Html::parse_fragment(&category_shares_svg(&totals).into_string());

        assert_eq!(count(&html, "svg path"), 2);
        let legend: Vec<String> = html
            .select(&Selector::parse("svg text").unwrap())
            .map(|text| text.text().collect())
            .collect();
        assert_eq!(legend, vec!["Food: 80.0%", "Transport: 20.0%"]);
    }

    #[test]
    fn single_category_is_a_full_circle() {
        let totals = BTreeMap::from([("Food".to_owned(), 120.0)]);

        let html = Html::parse_fragment(&category_shares_svg(&totals).into_string());

        assert_eq!(count(&html, "svg path"), 0);
        assert_eq!(count(&html, "svg circle"), 1);
    }

    #[test]
    fn line_chart_has_a_line_per_category() {
        let series = vec![
            TimeSeriesPoint {
                date: date!(2025 - 01 - 01),
                category: "Food".to_owned(),
                amount: 50.0,
            },
            TimeSeriesPoint {
                date: date!(2025 - 01 - 02),
                category: "Transport".to_owned(),
                amount: 30.0,
            },
            TimeSeriesPoint {
                date: date!(2025 - 01 - 03),
                category: "Food".to_owned(),
                amount: 70.0,
            },
        ];
        let categories = vec!["Food".to_owned(), "Transport".to_owned()];

        let html = Html::parse_fragment(&amount_over_time_svg(&series, &categories).into_string());

        let lines: Vec<String> = html
            .select(&Selector::parse("svg polyline").unwrap())
            .map(|line| line.value().attr("points").unwrap_or_default().to_owned())
            .collect();
        assert_eq!(lines.len(), 2);
        // Food spans the whole x axis, from the lowest to the highest amount shown.
        assert_eq!(lines[0], "90.0,112.9 560.0,30.0");
        assert_eq!(count(&html, "svg circle"), 3);
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("2025-01-01"));
        assert!(text.contains("2025-01-03"));
    }

    #[test]
    fn empty_series_draws_only_the_axes() {
        let html = Html::parse_fragment(&amount_over_time_svg(&[], &[]).into_string());

        assert_eq!(count(&html, "svg line"), 2);
        assert_eq!(count(&html, "svg polyline"), 0);
    }
}
