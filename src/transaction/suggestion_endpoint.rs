//! Defines the endpoint that suggests a category for a description.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
// axum_extra's Query treats a missing or empty field as None.
use axum_extra::extract::Query;
use serde::Deserialize;

use crate::{
    Error,
    suggestion::suggest,
    transaction::{TransactionState, category_select::category_select},
};

/// The query string sent while typing a description.
#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    /// The description typed so far.
    #[serde(default)]
    pub description: Option<String>,
}

/// Returns the category selector with the category suggested for the
/// description pre-selected.
///
/// The classifier is trained on the current ledger for every request.
pub async fn get_suggestion_endpoint(
    State(state): State<TransactionState>,
    Query(query): Query<SuggestionQuery>,
) -> Response {
    let ledger = match state.ledger.lock() {
        Ok(store) => store.load(),
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    let ledger = match ledger {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not load the ledger for a suggestion: {error}");
            return error.into_alert_response();
        }
    };

    let description = query.description.unwrap_or_default();
    let suggestion = suggest(&ledger, &description);

    category_select(&suggestion).into_response()
}
