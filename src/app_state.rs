//! Implements a struct that holds the state of the server.

use std::{path::PathBuf, sync::Arc};

use axum::extract::FromRef;

use crate::{
    authorization::{Authorizer, SharedSecret},
    catalog::Catalog,
    ledger::CsvLedgerStore,
};

/// The state of the server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Where the transactions are stored.
    pub ledger_store: CsvLedgerStore,

    /// The services and transaction types offered by the kiosk.
    pub catalog: Arc<Catalog>,

    /// Decides who may open the admin space.
    pub authorizer: Arc<dyn Authorizer>,

    /// The local timezone as a canonical timezone name, e.g. "Africa/Libreville".
    pub local_timezone: String,
}

impl AppState {
    /// Create a new [AppState] for the ledger at `ledger_path`.
    ///
    /// `admin_password` is the secret that opens the admin space.
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Africa/Libreville".
    pub fn new(
        ledger_path: impl Into<PathBuf>,
        catalog: Catalog,
        admin_password: &str,
        local_timezone: &str,
    ) -> Self {
        Self::with_authorizer(
            ledger_path,
            catalog,
            Arc::new(SharedSecret::new(admin_password)),
            local_timezone,
        )
    }

    /// Create a new [AppState] that checks admin credentials with `authorizer`.
    pub fn with_authorizer(
        ledger_path: impl Into<PathBuf>,
        catalog: Catalog,
        authorizer: Arc<dyn Authorizer>,
        local_timezone: &str,
    ) -> Self {
        Self {
            ledger_store: CsvLedgerStore::new(ledger_path),
            catalog: Arc::new(catalog),
            authorizer,
            local_timezone: local_timezone.to_owned(),
        }
    }
}

impl FromRef<AppState> for Arc<Catalog> {
    fn from_ref(state: &AppState) -> Self {
        state.catalog.clone()
    }
}
