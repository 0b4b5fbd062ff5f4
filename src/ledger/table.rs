//! The ledger table: every recorded transaction in insertion order.

use rust_decimal::Decimal;

use crate::{
    Error,
    ledger::record::{COLUMNS, TransactionRecord},
};

/// A snapshot of the ledger.
///
/// A `Ledger` is a plain value: it is [loaded](crate::ledger::CsvLedgerStore::load),
/// passed into an operation such as [Ledger::append], returned from it, and
/// [saved](crate::ledger::CsvLedgerStore::save). Nothing else holds on to the
/// current table between requests.
///
/// Rows are kept in insertion order, which is the only ordering. There is no
/// uniqueness constraint on any field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<TransactionRecord>,
}

impl Ledger {
    /// The canonical columns, in the order they are stored.
    pub const COLUMNS: [&str; 7] = COLUMNS;

    /// A ledger with the canonical columns and no rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_records(records: Vec<TransactionRecord>) -> Self {
        Self { records }
    }

    /// The column names of the table.
    pub fn columns(&self) -> &'static [&'static str] {
        &Self::COLUMNS
    }

    /// Append `record` as the last row and return the new table.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidRecord] if `record` does not fit the ledger
    /// schema, in which case the table is not changed.
    pub fn append(mut self, record: TransactionRecord) -> Result<Self, Error> {
        validate_record(&record)?;
        self.records.push(record);

        Ok(self)
    }

    /// The rows of the table in insertion order.
    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    /// The number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn validate_record(record: &TransactionRecord) -> Result<(), Error> {
    if record.amount < Decimal::ZERO {
        return Err(Error::InvalidRecord(format!(
            "amount must not be negative, got {}",
            record.amount
        )));
    }

    match record.blank_required_column() {
        Some(column) => Err(Error::InvalidRecord(format!("{column} must not be empty"))),
        None => Ok(()),
    }
}
