//! Alerts for displaying success and error messages after HTMX requests.
//!
//! Alerts are swapped into the `#alert-container` element of the base page.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

/// A dismissable message shown at the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Alert {
    Success { message: String, details: String },
    Error { message: String, details: String },
}

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Markup {
        let (is_error, message, details) = match self {
            Alert::Success { message, details } => (false, message, details),
            Alert::Error { message, details } => (true, message, details),
        };

        let style = if is_error {
            "p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
            dark:bg-gray-800 dark:text-red-400"
        } else {
            "p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 \
            dark:bg-gray-800 dark:text-green-400"
        };

        // Template adapted from https://flowbite.com/docs/components/alerts/
        html!(
            div
                role="alert"
                class=(style)
                onclick="this.remove()"
            {
                span class="font-medium" { (message) }

                @if !details.is_empty() {
                    " " (details)
                }
            }
        )
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_shows_message_and_details() {
        let html = Alert::Error {
            message: "Could not save".to_owned(),
            details: "The ledger file is read only.".to_owned(),
        }
        .into_html()
        .into_string();

        let fragment = Html::parse_fragment(&html);
        let alert = fragment
            .select(&Selector::parse("div[role=alert]").unwrap())
            .next()
            .expect("no alert found");
        let text = alert.text().collect::<String>();

        assert!(alert.value().attr("class").unwrap().contains("text-red-800"));
        assert_eq!(text, "Could not save The ledger file is read only.");
    }

    #[test]
    fn success_alert_without_details() {
        let html = Alert::Success {
            message: "Saved".to_owned(),
            details: String::new(),
        }
        .into_html()
        .into_string();

        let fragment = Html::parse_fragment(&html);
        let text = fragment
            .select(&Selector::parse("div[role=alert]").unwrap())
            .next()
            .expect("no alert found")
            .text()
            .collect::<String>();

        assert_eq!(text, "Saved");
    }
}
