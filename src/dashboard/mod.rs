//! Dashboard module
//!
//! Shows the filtered view of the ledger together with:
//! - Per-category totals and shares
//! - Amount over time by category
//! - A seven day forecast, or a notice when there is too little data
//! - The status of the monthly spending goal
//! - Links to export the view

mod filter;
mod handlers;
mod tables;

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;

use crate::{AppState, ledger::LedgerStore};

pub use filter::FilterQuery;
pub use handlers::get_dashboard_page;

/// The state needed for displaying the dashboard page and exports.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The ledger to derive the view from.
    pub ledger: Arc<Mutex<LedgerStore>>,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}
