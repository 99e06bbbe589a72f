//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The page with the filtered transactions, charts, forecast and exports.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for entering a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route to append a transaction to the ledger.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route that returns the category selector for a description.
pub const SUGGESTION_API: &str = "/api/suggestion";

/// The route to download the current view as a spreadsheet.
pub const EXPORT_SPREADSHEET: &str = "/export/spreadsheet";
/// The route to download the current view as a document report.
pub const EXPORT_REPORT: &str = "/export/report";
