//! The transaction history table shown in both the manager and admin spaces.

use maud::{Markup, html};

use crate::{
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    ledger::{Ledger, TransactionRecord},
};

/// The id of the element wrapping the history table, used for out-of-band swaps.
pub const HISTORY_ID: &str = "history";

/// Render every row of `ledger` in file order, one column per ledger column.
pub fn history_table(ledger: &Ledger) -> Markup {
    history_section(ledger, false)
}

/// Render the history table so that HTMX replaces the one already on the page.
pub fn history_table_oob(ledger: &Ledger) -> Markup {
    history_section(ledger, true)
}

fn history_section(ledger: &Ledger, out_of_band: bool) -> Markup {
    html! {
        section
            id=(HISTORY_ID)
            hx-swap-oob=[out_of_band.then_some("true")]
            class="w-full max-w-screen-xl mt-8"
        {
            h2 class="text-xl font-semibold mb-4" { "Historique des Transactions" }

            div class="relative overflow-x-auto shadow-md rounded"
            {
                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            @for column in ledger.columns() {
                                th scope="col" class=(TABLE_CELL_STYLE) { (column) }
                            }
                        }
                    }

                    tbody
                    {
                        @for record in ledger.records() {
                            (history_row(record))
                        }

                        @if ledger.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td
                                    colspan=(ledger.columns().len())
                                    class={ (TABLE_CELL_STYLE) " text-center" }
                                {
                                    "Aucune transaction enregistrée."
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn history_row(record: &TransactionRecord) -> Markup {
    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE) { (record.date) }
            td class=(TABLE_CELL_STYLE) { (record.time) }
            td class=(TABLE_CELL_STYLE) { (record.category) }
            td class=(TABLE_CELL_STYLE) { (record.entry_type) }
            td class={ (TABLE_CELL_STYLE) " text-right" } { (format_currency(record.amount)) }
            td class=(TABLE_CELL_STYLE) { (record.direction.marker()) }
            td class=(TABLE_CELL_STYLE) { (record.description) }
        }
    }
}
