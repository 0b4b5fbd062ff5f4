//! Kiosk Ledger is a web app for recording the transactions of a small
//! mobile money and subscription kiosk.
//!
//! The manager records deposits, withdrawals and sales through a form and
//! every transaction is appended to a CSV ledger. The admin space shows the
//! total income, expense and profit over the whole history.
//!
//! This library provides a router that directly serves HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod admin;
mod alert;
mod app_state;
pub mod authorization;
pub mod catalog;
mod clock;
mod endpoints;
mod history;
mod html;
mod internal_server_error;
pub mod ledger;
mod logging;
mod manager;
mod navigation;
mod not_found;
pub mod report;
mod routing;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use clock::get_local_offset;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

use crate::{
    alert::Alert, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The ledger file exists but could not be read.
    ///
    /// A missing ledger file is not an error, it is treated as an empty ledger.
    #[error("could not read the ledger: {0}")]
    LedgerReadError(String),

    /// The ledger could not be written to disk.
    #[error("could not save the ledger: {0}")]
    LedgerWriteError(String),

    /// The header row of the ledger file does not match the expected columns.
    #[error("the ledger has the columns {0:?}, which do not match the expected columns")]
    UnexpectedColumns(Vec<String>),

    /// A row of the ledger file could not be parsed.
    ///
    /// `row` is the 1-based line number in the file, counting the header.
    #[error("row {row} of the ledger is malformed: {reason}")]
    MalformedRow {
        /// The line number of the row.
        row: usize,
        /// What was wrong with the row.
        reason: String,
    },

    /// A record that does not fit the ledger schema was appended.
    #[error("invalid transaction record: {0}")]
    InvalidRecord(String),

    /// The service catalog could not be read or is inconsistent.
    #[error("invalid service catalog: {0}")]
    InvalidCatalog(String),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The time of entry could not be formatted.
    #[error("could not format the time of entry: {0}")]
    InvalidTimestamp(String),

    /// The ledger amounts in the named direction add up to more than a
    /// [rust_decimal::Decimal] can hold.
    #[error("the {0} total is too large to compute")]
    TotalOverflow(String),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            error @ (Error::LedgerReadError(_)
            | Error::UnexpectedColumns(_)
            | Error::MalformedRow { .. }) => {
                tracing::error!("Could not load the ledger: {error}");
                InternalServerError {
                    description: "Could not load the transactions",
                    fix: "The ledger file could not be read. Check the server logs for details.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidTimezoneError(timezone) => Alert::error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            )
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
            Error::InvalidRecord(reason) => Alert::error("Transaction invalide", &reason)
                .into_response_with_status(StatusCode::UNPROCESSABLE_ENTITY),
            Error::LedgerReadError(_)
            | Error::UnexpectedColumns(_)
            | Error::MalformedRow { .. } => Alert::error(
                "Could not load the transactions",
                "The ledger file could not be read. Check the server logs for details.",
            )
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
            Error::LedgerWriteError(_) => Alert::error(
                "Could not save the transaction",
                "The ledger file could not be written. Check the server logs for details.",
            )
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
            error @ Error::TotalOverflow(_) => {
                tracing::error!("Could not compute the totals: {error}");
                Alert::error(
                    "Could not compute the totals",
                    "The recorded amounts are too large to add up. Check the ledger file.",
                )
                .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR)
            }
            error => {
                tracing::error!("An unexpected error occurred: {error}");
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
                .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
