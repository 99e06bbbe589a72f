//! Defines the route handler for the page for creating a new transaction.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        currency_input_styles, loading_spinner,
    },
    navigation::NavBar,
    suggestion::{FallbackReason, Suggestion},
    timezone::local_today,
    transaction::{
        TransactionState,
        category_select::{CATEGORY_SELECT_ID, category_select},
    },
};

fn create_transaction_view(today: Date) -> Markup {
    let create_transaction_route = endpoints::TRANSACTIONS_API;
    let suggestion_route = endpoints::SUGGESTION_API;
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let spinner = loading_spinner();
    // Nothing has been typed yet, so the selector starts on the default category.
    let category_select = category_select(&Suggestion::Fallback(FallbackReason::EmptyDescription));

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(create_transaction_route)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "New Transaction" }

                div
                {
                    label
                        for="description"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Description"
                    }

                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="Description"
                        autofocus
                        hx-get=(suggestion_route)
                        hx-trigger="keyup changed delay:300ms"
                        hx-target={"#" (CATEGORY_SELECT_ID)}
                        hx-target-error="#alert-container"
                        hx-swap="outerHTML"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label
                        for="amount"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Amount"
                    }

                    // w-full needed to ensure input takes the full width when prefilled with a value
                    div class="input-wrapper w-full"
                    {
                        input
                            name="amount"
                            id="amount"
                            type="number"
                            step="0.01"
                            placeholder="0.00"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label
                        for="date"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Date"
                    }

                    input
                        name="date"
                        id="date"
                        type="date"
                        required
                        value=(today)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                (category_select)

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Add Transaction"
                }
            }
        }
    };

    base("New Transaction", &[currency_input_styles()], &content)
}

/// Renders the page for creating a transaction.
pub async fn get_create_transaction_page(
    State(state): State<TransactionState>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;

    Ok(create_transaction_view(today).into_response())
}

#[cfg(test)]
mod view_tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use scraper::{Html, Selector};
    use tempfile::TempDir;
    use time::OffsetDateTime;

    use crate::{
        endpoints,
        ledger::LedgerStore,
        test_utils::{
            assert_content_type, assert_form_input, assert_form_input_with_value,
            assert_form_submit_button, assert_hx_endpoint, assert_status_ok, assert_valid_html,
            must_get_form, parse_html_document,
        },
        transaction::{TransactionState, get_create_transaction_page},
    };

    fn get_test_state(dir: &TempDir) -> TransactionState {
        TransactionState {
            ledger: Arc::new(Mutex::new(LedgerStore::new(dir.path().join("ledger.csv")))),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn new_transaction_returns_form() {
        let dir = TempDir::new().unwrap();

        let response = get_create_transaction_page(State(get_test_state(&dir)))
            .await
            .unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        assert_correct_form(&document);
    }

    #[tokio::test]
    async fn invalid_timezone_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut state = get_test_state(&dir);
        state.local_timezone = "Not/AZone".to_owned();

        let result = get_create_transaction_page(State(state)).await;

        assert!(result.is_err());
    }

    #[track_caller]
    fn assert_correct_form(document: &Html) {
        let form = must_get_form(document);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");

        let today = OffsetDateTime::now_utc().date().to_string();
        assert_form_input(&form, "amount", "number");
        assert_form_input_with_value(&form, "date", "date", &today);
        assert_form_submit_button(&form);

        let description = form
            .select(&Selector::parse("input[name=description]").unwrap())
            .next()
            .expect("no description input");
        assert_hx_endpoint(&description, endpoints::SUGGESTION_API, "hx-get");

        let selected = form
            .select(&Selector::parse("select[name=category] option[selected]").unwrap())
            .next()
            .expect("no selected category");
        assert_eq!(selected.value().attr("value"), Some("Outros"));
    }
}
