//! Downloads of the dashboard's current view.
//!
//! The view is resolved from the same query parameters as the dashboard, so
//! the export links on the dashboard download exactly what is displayed.

mod report;
mod spreadsheet;
mod svg;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Query;

use crate::{
    Error,
    dashboard::{DashboardState, FilterQuery},
    ledger::Transaction,
    timezone::local_today,
    view::{ViewFilter, filter},
};

use report::report_document;
use spreadsheet::spreadsheet_bytes;

const SPREADSHEET_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const SPREADSHEET_FILE_NAME: &str = "relatorio_financeiro.xlsx";
const REPORT_CONTENT_TYPE: &str = "text/html; charset=utf-8";
const REPORT_FILE_NAME: &str = "relatorio_financeiro.html";

/// Download the current view as an Excel workbook.
pub async fn export_spreadsheet(
    State(state): State<DashboardState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, Error> {
    let (view, _) = load_view(&state, &query)?;
    let bytes = spreadsheet_bytes(&view)?;

    Ok(attachment(SPREADSHEET_CONTENT_TYPE, SPREADSHEET_FILE_NAME, bytes))
}

/// Download the current view as a self-contained HTML report.
pub async fn export_report(
    State(state): State<DashboardState>,
    Query(query): Query<FilterQuery>,
) -> Result<Response, Error> {
    let (view, view_filter) = load_view(&state, &query)?;
    let document = report_document(&view, &view_filter).into_string();

    tracing::info!("Exported {} transactions to a report", view.len());

    Ok(attachment(
        REPORT_CONTENT_TYPE,
        REPORT_FILE_NAME,
        document.into_bytes(),
    ))
}

fn load_view(
    state: &DashboardState,
    query: &FilterQuery,
) -> Result<(Vec<Transaction>, ViewFilter), Error> {
    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::LedgerLockError)?
        .load()
        .inspect_err(|error| tracing::error!("could not load the ledger: {error}"))?;

    let today = local_today(&state.local_timezone)?;
    let view_filter = query.view_filter(&ledger, today);

    Ok((filter(&ledger, &view_filter), view_filter))
}

fn attachment(content_type: &'static str, file_name: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
