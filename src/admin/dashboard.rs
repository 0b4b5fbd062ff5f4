//! The admin dashboard: headline totals, a breakdown per service and the full history.

use maud::{Markup, html};

use crate::{
    Error,
    alert::Alert,
    history::history_table,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    ledger::Ledger,
    report::{CategoryTotals, Report, Summary, breakdown_by_category, summarize},
};

const METRIC_STYLE: &str = "flex flex-col p-4 rounded-lg shadow-sm bg-white dark:bg-gray-800";

/// Render the dashboard for `ledger`.
///
/// An empty ledger only shows a warning.
///
/// # Errors
///
/// Returns [crate::Error::TotalOverflow] if the totals cannot be computed.
pub fn dashboard_view(ledger: &Ledger) -> Result<Markup, Error> {
    let markup = match summarize(ledger)? {
        Report::NoData => Alert::warning("No transactions to show.").into_html(),
        Report::Totals(summary) => html! {
            (metrics(&summary))
            (breakdown_table(&breakdown_by_category(ledger)?))
            (history_table(ledger))
        },
    };

    Ok(markup)
}

fn metrics(summary: &Summary) -> Markup {
    html! {
        section id="metrics" class="grid grid-cols-1 sm:grid-cols-3 gap-4 w-full max-w-screen-xl"
        {
            (metric("Revenu Total", &format_currency(summary.inflow)))
            (metric("Dépense Totale", &format_currency(summary.outflow)))
            (metric("Profit", &format_currency(summary.net())))
        }
    }
}

fn metric(label: &str, value: &str) -> Markup {
    html! {
        div class=(METRIC_STYLE) data-metric=(label)
        {
            span class="text-sm text-gray-500 dark:text-gray-400" { (label) }
            span class="text-2xl font-semibold" { (value) }
        }
    }
}

fn breakdown_table(breakdown: &[CategoryTotals]) -> Markup {
    html! {
        section id="breakdown" class="w-full max-w-screen-xl mt-8"
        {
            h2 class="text-xl font-semibold mb-4" { "Par Catégorie" }

            div class="relative overflow-x-auto shadow-md rounded"
            {
                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Catégorie" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Transactions" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Revenu" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Dépense" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Profit" }
                        }
                    }

                    tbody
                    {
                        @for totals in breakdown {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE) { (totals.category) }
                                td class=(TABLE_CELL_STYLE) { (totals.count) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(totals.summary.inflow)) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(totals.summary.outflow)) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(totals.summary.net())) }
                            }
                        }
                    }
                }
            }
        }
    }
}
