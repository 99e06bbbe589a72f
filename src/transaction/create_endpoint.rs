//! Defines the endpoint for creating a new transaction.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::Date;

use crate::{
    Error, alert::Alert, endpoints, ledger::Transaction, transaction::TransactionState,
};

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The value of the transaction in reais.
    pub amount: f64,
    /// The date when the transaction ocurred.
    pub date: Date,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: Option<String>,
    /// The category chosen in the selector.
    #[serde(default)]
    pub category: Option<String>,
}

/// A route handler for creating a new transaction, redirects to the dashboard on success.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let transaction = match Transaction::new(
        form.amount,
        form.category.as_deref().unwrap_or_default(),
        form.date,
        form.description.as_deref().unwrap_or_default(),
    ) {
        Ok(transaction) => transaction,
        Err(error) => {
            tracing::warn!("rejected new transaction: {error}");
            return error.into_alert_response();
        }
    };

    let category = transaction.category.clone();

    let store = match state.ledger.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::LedgerLockError.into_alert_response();
        }
    };

    if let Err(error) = store.append(transaction) {
        tracing::error!("could not append transaction: {error}");

        return error.into_alert_response();
    }

    (
        StatusCode::SEE_OTHER,
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        Alert::Success {
            message: "Transaction added".to_owned(),
            details: format!("Stored under {category}."),
        },
    )
        .into_response()
}
