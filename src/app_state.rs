//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex};

use crate::ledger::LedgerStore;

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,

    /// The ledger file. Requests take the lock for the whole read-modify-write
    /// of an append so concurrent requests cannot lose rows.
    pub ledger: Arc<Mutex<LedgerStore>>,
}

impl AppState {
    /// Create a new [AppState] backed by `ledger`.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "America/Sao_Paulo".
    pub fn new(ledger: LedgerStore, local_timezone: &str) -> Self {
        Self {
            local_timezone: local_timezone.to_owned(),
            ledger: Arc::new(Mutex::new(ledger)),
        }
    }
}
