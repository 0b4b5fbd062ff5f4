//! Records a transaction submitted by the manager.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HX_TRIGGER;
use maud::html;

use crate::{
    AppState, Error,
    alert::Alert,
    catalog::Catalog,
    clock::EntryTimestamp,
    history::history_table_oob,
    ledger::{CsvLedgerStore, Ledger},
};

use super::{
    page::TRANSACTION_ADDED_EVENT,
    submission::{Submission, TransactionForm},
};

/// The state needed to record a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// Where the transactions are stored.
    pub ledger_store: CsvLedgerStore,
    /// The services offered by the kiosk.
    pub catalog: Arc<Catalog>,
    /// The local timezone as a canonical timezone name, e.g. "Africa/Libreville".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger_store: state.ledger_store.clone(),
            catalog: state.catalog.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for recording a new transaction.
///
/// Responds with a success alert and the refreshed history table, or a 422
/// alert if the submission is rejected. Rejected submissions never touch the ledger.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let submission = match Submission::validate(form, &state.catalog) {
        Ok(submission) => submission,
        Err(error) => {
            tracing::warn!("Rejected transaction: {error}");
            return error.into_response();
        }
    };

    match record_transaction(submission, &state) {
        Ok(ledger) => {
            let alert = Alert::success("Transaction ajoutée avec succès!", "").into_html();

            (
                [(HX_TRIGGER, TRANSACTION_ADDED_EVENT)],
                html! {
                    (alert)
                    (history_table_oob(&ledger))
                },
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("Could not record transaction: {error}");
            error.into_alert_response()
        }
    }
}

/// Load the ledger, append the submission and save it, returning the new ledger.
fn record_transaction(
    submission: Submission,
    state: &CreateTransactionState,
) -> Result<Ledger, Error> {
    let timestamp = EntryTimestamp::now(&state.local_timezone)?;
    let record = submission.into_record(timestamp);

    let ledger = state.ledger_store.load()?.append(record)?;
    state.ledger_store.save(&ledger)?;

    tracing::debug!(
        "Recorded transaction {} of {}",
        ledger.len(),
        state.ledger_store.path().display()
    );

    Ok(ledger)
}
