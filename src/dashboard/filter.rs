//! The query string that selects a view of the ledger.

use serde::{Deserialize, Serialize, Serializer};
use time::Date;

use crate::{
    ledger::Transaction,
    view::{CategoryFilter, ViewFilter, date_bounds},
};

/// The filter inputs shared by the dashboard and the export endpoints.
///
/// Missing or empty fields fall back to the defaults chosen by
/// [FilterQuery::view_filter].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterQuery {
    /// The first day of the view, inclusive.
    #[serde(default)]
    pub start: Option<Date>,
    /// The last day of the view, inclusive.
    #[serde(default)]
    pub end: Option<Date>,
    /// A single category or "All".
    #[serde(default, serialize_with = "serialize_category")]
    pub category: Option<CategoryFilter>,
    /// The monthly spending goal, zero or absent for no goal.
    #[serde(default)]
    pub goal: Option<f64>,
}

fn serialize_category<S>(category: &Option<CategoryFilter>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match category {
        Some(category) => serializer.serialize_str(&category.to_string()),
        None => serializer.serialize_none(),
    }
}

impl FilterQuery {
    /// Resolve the query into a [ViewFilter] over `ledger`.
    ///
    /// The range defaults to the earliest ledger date through the later of
    /// `today` and the latest ledger date. An empty ledger defaults to `today`
    /// for both ends.
    pub fn view_filter(&self, ledger: &[Transaction], today: Date) -> ViewFilter {
        let bounds = date_bounds(ledger);

        let start = self
            .start
            .or_else(|| bounds.as_ref().map(|bounds| *bounds.start()))
            .unwrap_or(today);
        let end = self.end.unwrap_or_else(|| match &bounds {
            Some(bounds) => today.max(*bounds.end()),
            None => today,
        });

        ViewFilter::new(start, end, self.category.clone().unwrap_or_default())
    }

    /// The query string that reproduces `view_filter`, for links to exports.
    pub fn query_string(view_filter: &ViewFilter) -> String {
        let query = FilterQuery {
            start: Some(*view_filter.date_range.start()),
            end: Some(*view_filter.date_range.end()),
            category: Some(view_filter.category.clone()),
            goal: None,
        };

        serde_urlencoded::to_string(&query).unwrap_or_else(|error| {
            tracing::error!("could not encode the filter as a query string: {error}");
            String::new()
        })
    }
}
