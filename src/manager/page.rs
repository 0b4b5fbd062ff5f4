//! The manager's page for recording transactions.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    AppState, Error,
    catalog::{Catalog, EntryType},
    endpoints,
    history::history_table,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        PAGE_CONTAINER_STYLE, base, loading_spinner,
    },
    ledger::{CsvLedgerStore, Ledger},
    navigation::NavBar,
};

/// The event sent to the form after a transaction was recorded.
pub const TRANSACTION_ADDED_EVENT: &str = "transaction-added";

/// The id of the element holding the type select.
const TYPE_FIELD_ID: &str = "type-field";

/// The state needed for the manager's page.
#[derive(Debug, Clone)]
pub struct ManagerPageState {
    /// Where the transactions are stored.
    pub ledger_store: CsvLedgerStore,
    /// The services offered by the kiosk.
    pub catalog: Arc<Catalog>,
}

impl FromRef<AppState> for ManagerPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger_store: state.ledger_store.clone(),
            catalog: state.catalog.clone(),
        }
    }
}

/// Renders the page with the new transaction form and the transaction history.
pub async fn get_manager_page(State(state): State<ManagerPageState>) -> Result<Response, Error> {
    let ledger = state.ledger_store.load().inspect_err(|error| {
        tracing::error!("Could not load the ledger for the manager page: {error}")
    })?;

    Ok(manager_view(&state.catalog, &ledger).into_response())
}

fn manager_view(catalog: &Catalog, ledger: &Ledger) -> Markup {
    let nav_bar = NavBar::new(endpoints::MANAGER_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-6" { "Espace Gérant" }

            div class=(FORM_CONTAINER_STYLE)
            {
                (transaction_form(catalog))
            }

            (history_table(ledger))
        }
    };

    base("Espace Gérant", &content)
}

fn transaction_form(catalog: &Catalog) -> Markup {
    let spinner = loading_spinner();

    html! {
        form
            hx-post=(endpoints::TRANSACTIONS_API)
            hx-target="#alert-container"
            hx-target-error="#alert-container"
            // Keep the event name in sync with TRANSACTION_ADDED_EVENT.
            "hx-on:transaction-added"="this.reset(); htmx.trigger('#category', 'change')"
            class="w-full space-y-4 md:space-y-6"
        {
            h2 class="text-xl font-bold" { "Ajouter des Nouvelles Transactions" }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Catégorie" }

                select
                    name="category"
                    id="category"
                    required
                    hx-get=(endpoints::TRANSACTION_TYPES_API)
                    hx-trigger="change"
                    hx-target={ "#" (TYPE_FIELD_ID) }
                    hx-swap="outerHTML"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" { "Sélectionner une catégorie" }

                    @for service in catalog.services() {
                        option value=(service.name) { (service.name) }
                    }
                }
            }

            div
            {
                label for="amount" class=(FORM_LABEL_STYLE) { "Montant" }

                input
                    name="amount"
                    id="amount"
                    type="number"
                    min="0"
                    step="0.01"
                    placeholder="0.00"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (type_field(&[]))

            div
            {
                label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                input
                    name="description"
                    id="description"
                    type="text"
                    placeholder="Description"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
            {
                span id="indicator" class="inline htmx-indicator" { (spinner) }
                " Ajouter Transaction"
            }
        }
    }
}

/// The type select for a category offering `entry_types`.
///
/// The select is disabled when there is nothing to choose from.
fn type_field(entry_types: &[EntryType]) -> Markup {
    html! {
        div id=(TYPE_FIELD_ID)
        {
            label for="type_" class=(FORM_LABEL_STYLE) { "Type" }

            select
                name="type_"
                id="type_"
                disabled[entry_types.is_empty()]
                class=(FORM_TEXT_INPUT_STYLE)
            {
                option value="" { "" }

                @for entry_type in entry_types {
                    option value=(entry_type.label) { (entry_type.label) }
                }
            }
        }
    }
}

/// The query for the types offered by a category.
#[derive(Debug, Default, Deserialize)]
pub struct TypesQuery {
    /// The selected category, empty when the placeholder is selected.
    #[serde(default)]
    pub category: String,
}

/// Returns the type select for the selected category.
pub async fn get_transaction_types(
    State(catalog): State<Arc<Catalog>>,
    Query(query): Query<TypesQuery>,
) -> Markup {
    type_field(catalog.types_for(&query.category))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::extract::{Query, State};
    use scraper::{Html, Selector};

    use crate::{
        catalog::Catalog,
        endpoints,
        ledger::CsvLedgerStore,
        test_utils::{
            assert_content_type, assert_form_input, assert_form_submit_button_with_text,
            assert_hx_endpoint, assert_status_ok, assert_valid_html, ledger_path,
            parse_html_document, must_get_form,
        },
    };

    use super::{
        ManagerPageState, TRANSACTION_ADDED_EVENT, TypesQuery, get_manager_page,
        get_transaction_types,
    };

    fn page_state(dir: &tempfile::TempDir) -> ManagerPageState {
        ManagerPageState {
            ledger_store: CsvLedgerStore::new(ledger_path(dir)),
            catalog: Arc::new(Catalog::default()),
        }
    }

    #[tokio::test]
    async fn manager_page_has_transaction_form() {
        let dir = tempfile::tempdir().unwrap();

        let response = get_manager_page(State(page_state(&dir))).await.unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_API, "hx-post");
        assert_form_input(&form, "amount", "number");
        assert_form_submit_button_with_text(&form, "Ajouter Transaction");
        assert!(
            form.value()
                .attr(&format!("hx-on:{TRANSACTION_ADDED_EVENT}"))
                .is_some(),
            "want form to reset itself after a transaction is added"
        );

        let options = form
            .select(&Selector::parse("select#category option").unwrap())
            .map(|option| option.value().attr("value").unwrap_or_default().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(
            options,
            vec![
                "",
                "Airtel Money",
                "Moov Money",
                "Canal +",
                "Recette Journalière"
            ]
        );
    }

    #[tokio::test]
    async fn manager_page_shows_history() {
        let dir = tempfile::tempdir().unwrap();

        let response = get_manager_page(State(page_state(&dir))).await.unwrap();

        let document = parse_html_document(response).await;
        let history = document
            .select(&Selector::parse("section#history").unwrap())
            .next();
        assert!(history.is_some(), "want history section, got none");
    }

    #[tokio::test]
    async fn manager_page_fails_on_unreadable_ledger() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(ledger_path(&dir), "not,the,right,columns\n").unwrap();

        let result = get_manager_page(State(page_state(&dir))).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn types_fragment_lists_types_of_category() {
        let query = TypesQuery {
            category: "Recette Journalière".to_owned(),
        };

        let markup =
            get_transaction_types(State(Arc::new(Catalog::default())), Query(query)).await;

        let fragment = Html::parse_fragment(&markup.into_string());
        let select = fragment
            .select(&Selector::parse("select[name=type_]").unwrap())
            .next()
            .expect("No type select found");
        assert_eq!(select.value().attr("disabled"), None);

        let labels = select
            .select(&Selector::parse("option").unwrap())
            .map(|option| option.text().collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(
            labels,
            vec!["", "Secretariat", "Transfert Airtel", "Transfert Moov"]
        );
    }

    #[tokio::test]
    async fn types_fragment_is_disabled_for_unknown_category() {
        for category in ["", "Orange Money"] {
            let query = TypesQuery {
                category: category.to_owned(),
            };

            let markup =
                get_transaction_types(State(Arc::new(Catalog::default())), Query(query)).await;

            let fragment = Html::parse_fragment(&markup.into_string());
            let select = fragment
                .select(&Selector::parse("select[name=type_]").unwrap())
                .next()
                .expect("No type select found");
            assert!(select.value().attr("disabled").is_some());
            assert_eq!(
                select.select(&Selector::parse("option").unwrap()).count(),
                1,
                "category {category:?}"
            );
        }
    }
}
