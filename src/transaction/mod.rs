//! Entering new transactions.
//!
//! This module contains:
//! - The page with the form for a new transaction
//! - The endpoint that validates the form and appends it to the ledger
//! - The endpoint that suggests a category while the description is typed

mod category_select;
mod create_endpoint;
mod create_page;
mod suggestion_endpoint;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;

use crate::{AppState, ledger::LedgerStore};

pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_create_transaction_page;
pub use suggestion_endpoint::get_suggestion_endpoint;

/// The state needed to suggest and create transactions.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The ledger to read the training data from and append transactions to.
    pub ledger: Arc<Mutex<LedgerStore>>,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}
