//! The transaction ledger.
//!
//! This module contains:
//! - The [TransactionRecord] model and its CSV row mapping
//! - The [Ledger] table value that operations take and return
//! - The [CsvLedgerStore] that loads and saves the table

mod record;
mod store;
mod table;

pub use record::{COLUMNS, DATE_FORMAT, Direction, TIME_FORMAT, TransactionRecord};
pub use store::CsvLedgerStore;
pub use table::Ledger;
