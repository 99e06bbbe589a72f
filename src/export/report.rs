//! Renders a view as a self-contained HTML document with a table and charts.

use maud::{DOCTYPE, Markup, html};

use crate::{
    aggregation::{aggregate_by_category, time_series},
    export::svg::{amount_over_time_svg, category_shares_svg},
    html::format_currency,
    ledger::{LEDGER_COLUMNS, Transaction},
    view::{ViewFilter, categories_in},
};

/// The document title.
const REPORT_TITLE: &str = "Relatório Financeiro";

const REPORT_STYLE: &str = r#"
    body { font-family: sans-serif; margin: 2rem; color: #111827; }
    table { border-collapse: collapse; width: 100%; margin-bottom: 2rem; }
    th, td { border: 1px solid #d1d5db; padding: 0.4rem 0.8rem; text-align: left; }
    th { background: #f3f4f6; }
    svg { display: block; max-width: 100%; height: auto; margin-bottom: 2rem; }
"#;

/// Build the report for `view`, the transactions selected by `view_filter`.
///
/// The document has no scripts or external resources, the charts are inline
/// SVG images.
pub(super) fn report_document(view: &[Transaction], view_filter: &ViewFilter) -> Markup {
    let totals = aggregate_by_category(view);
    let series = time_series(view);

    html! {
        (DOCTYPE)
        html lang="pt-BR"
        {
            head
            {
                meta charset="UTF-8";
                title { (REPORT_TITLE) }
                style { (REPORT_STYLE) }
            }

            body
            {
                h1 { (REPORT_TITLE) }

                p
                {
                    (view_filter.date_range.start()) " to " (view_filter.date_range.end())
                    ", category " (view_filter.category)
                }

                table id="report-table"
                {
                    thead
                    {
                        tr
                        {
                            @for column in LEDGER_COLUMNS {
                                th { (column) }
                            }
                        }
                    }
                    tbody
                    {
                        @for transaction in view {
                            tr
                            {
                                td { (format_currency(transaction.amount)) }
                                td { (transaction.category) }
                                td { (transaction.date) }
                                td { (transaction.description) }
                            }
                        }
                    }
                }

                (category_shares_svg(&totals))
                (amount_over_time_svg(&series, &categories_in(view)))
            }
        }
    }
}
