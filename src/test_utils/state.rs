use std::path::PathBuf;

use rust_decimal::Decimal;
use tempfile::TempDir;
use time::macros::date;

use crate::{
    AppState,
    catalog::Catalog,
    ledger::{CsvLedgerStore, Direction, Ledger, TransactionRecord},
};

pub(crate) const TEST_ADMIN_PASSWORD: &str = "adminpassword";

/// An app state backed by a ledger file in a fresh temporary directory.
///
/// The directory is deleted when the returned [TempDir] is dropped.
pub(crate) fn test_state() -> (AppState, TempDir) {
    let dir = tempfile::tempdir().expect("Could not create temporary directory");
    let state = AppState::new(
        ledger_path(&dir),
        Catalog::default(),
        TEST_ADMIN_PASSWORD,
        "Etc/UTC",
    );

    (state, dir)
}

pub(crate) fn ledger_path(dir: &TempDir) -> PathBuf {
    dir.path().join("transactions.csv")
}

pub(crate) fn record(
    category: &str,
    entry_type: &str,
    amount: Decimal,
    direction: Direction,
) -> TransactionRecord {
    TransactionRecord::new(
        date!(2024 - 05 - 01),
        "09:30",
        category,
        entry_type,
        amount,
        direction,
        "",
    )
}

/// Save `records` as the ledger of `store`.
pub(crate) fn seed_ledger(store: &CsvLedgerStore, records: Vec<TransactionRecord>) {
    let ledger = records
        .into_iter()
        .try_fold(Ledger::empty(), Ledger::append)
        .expect("Could not build ledger");

    store.save(&ledger).expect("Could not save ledger");
}
