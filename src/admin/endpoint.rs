//! Checks the admin password and returns the dashboard.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use serde::Deserialize;

use crate::{
    AppState,
    alert::Alert,
    authorization::{Authorization, Authorizer},
    ledger::CsvLedgerStore,
};

use super::{dashboard::dashboard_view, page::AWAITING_PASSWORD_MESSAGE};

/// The notice shown when the password is wrong.
pub const WRONG_PASSWORD_MESSAGE: &str = "Mot de passe incorrect!";

/// The state needed to open the admin dashboard.
#[derive(Debug, Clone)]
pub struct AdminState {
    /// Where the transactions are stored.
    pub ledger_store: CsvLedgerStore,
    /// Decides whether the password opens the dashboard.
    pub authorizer: Arc<dyn Authorizer>,
}

impl FromRef<AppState> for AdminState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger_store: state.ledger_store.clone(),
            authorizer: state.authorizer.clone(),
        }
    }
}

/// The password submitted from the admin page.
#[derive(Debug, Default, Deserialize)]
pub struct AdminForm {
    /// The password as typed, possibly empty.
    #[serde(default)]
    pub password: String,
}

/// Handler for the admin password form.
///
/// Every request is checked on its own: no session is kept once the
/// dashboard has been shown.
pub async fn post_admin_password(
    State(state): State<AdminState>,
    Form(form): Form<AdminForm>,
) -> Response {
    match state.authorizer.authorize(&form.password) {
        Authorization::AwaitingCredential => {
            Alert::warning(AWAITING_PASSWORD_MESSAGE).into_response_with_status(StatusCode::OK)
        }
        Authorization::Denied => {
            tracing::warn!("Rejected an admin password");
            Alert::error_simple(WRONG_PASSWORD_MESSAGE)
                .into_response_with_status(StatusCode::UNAUTHORIZED)
        }
        Authorization::Granted => match state.ledger_store.load().and_then(|ledger| {
            tracing::debug!("Showing the dashboard for {} transactions", ledger.len());
            dashboard_view(&ledger)
        }) {
            Ok(dashboard) => dashboard.into_response(),
            Err(error) => {
                tracing::error!("Could not show the dashboard: {error}");
                error.into_alert_response()
            }
        },
    }
}
