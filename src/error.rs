//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{alert::Alert, internal_server_error::InternalServerError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The ledger file exists but could not be opened, created or written.
    ///
    /// The string is the underlying I/O error message.
    #[error("could not access the ledger file: {0}")]
    LedgerIo(String),

    /// A row in the ledger file could not be parsed as a transaction.
    ///
    /// The string is the underlying CSV error message, which includes the
    /// position of the offending record.
    #[error("the ledger file is malformed: {0}")]
    LedgerFormat(String),

    /// A transaction amount was NaN or infinite.
    #[error("{0} is not a valid amount")]
    NonFiniteAmount(f64),

    /// A transaction was given an empty category.
    #[error("the category cannot be empty")]
    EmptyCategory,

    /// Could not acquire the ledger lock
    #[error("could not acquire the ledger lock")]
    LedgerLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The spreadsheet export could not be generated.
    #[error("could not create the spreadsheet: {0}")]
    SpreadsheetExport(String),
}

impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(value: rust_xlsxwriter::XlsxError) -> Self {
        tracing::error!("an unhandled spreadsheet error occurred: {}", value);
        Error::SpreadsheetExport(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::LedgerFormat(reason) => InternalServerError {
                description: "Unreadable Ledger",
                fix: &format!(
                    "The ledger file could not be parsed ({reason}). Fix or remove the \
                    offending row and reload the page."
                ),
            }
            .into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::LedgerLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidTimezoneError(timezone) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Invalid Timezone Settings".to_owned(),
                    details: format!(
                        "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                    ),
                },
            ),
            Error::NonFiniteAmount(amount) => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid amount".to_owned(),
                    details: format!("{amount} is not a number. Enter an amount such as 12.50."),
                },
            ),
            Error::EmptyCategory => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Missing category".to_owned(),
                    details: "Choose a category for the transaction.".to_owned(),
                },
            ),
            Error::LedgerFormat(reason) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Could not read the ledger".to_owned(),
                    details: format!(
                        "The ledger file is malformed ({reason}). Fix the file and try again."
                    ),
                },
            ),
            Error::LedgerIo(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Could not save the transaction".to_owned(),
                    details: "The ledger file could not be written, \
                        check the server logs for more details."
                        .to_owned(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
