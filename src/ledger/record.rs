//! Defines the transaction record, the only entity stored in the ledger.

use std::str::FromStr;

use csv::StringRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// The ledger's columns in the order they are read and written.
pub const COLUMNS: [&str; 7] = [
    "date",
    "time",
    "category",
    "type",
    "amount",
    "transaction_type",
    "description",
];

/// The format of the `date` column, e.g. "2024-05-01".
pub const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The format of the `time` column, e.g. "14:05".
pub const TIME_FORMAT: &[BorrowedFormatItem] = format_description!("[hour]:[minute]");

const VARIATION_SELECTOR: char = '\u{FE0F}';

/// Whether money came into or went out of the till.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Money received, e.g. a mobile money deposit or a subscription sale.
    Inflow,
    /// Money paid out, e.g. a mobile money withdrawal.
    Outflow,
}

impl Direction {
    /// The marker written to the `transaction_type` column for income ("⬇️").
    pub const INFLOW_MARKER: &str = "\u{2B07}\u{FE0F}";
    /// The marker written to the `transaction_type` column for expenses ("⬆️").
    pub const OUTFLOW_MARKER: &str = "\u{2B06}\u{FE0F}";

    /// The marker stored in the ledger for this direction.
    pub fn marker(self) -> &'static str {
        match self {
            Direction::Inflow => Self::INFLOW_MARKER,
            Direction::Outflow => Self::OUTFLOW_MARKER,
        }
    }

    /// Parse a ledger marker.
    ///
    /// The emoji variation selector is optional since some editors strip it.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker.trim_end_matches(VARIATION_SELECTOR) {
            "\u{2B07}" => Some(Direction::Inflow),
            "\u{2B06}" => Some(Direction::Outflow),
            _ => None,
        }
    }
}

/// A deposit, withdrawal, subscription or other sale recorded at the kiosk.
///
/// Records are created once by the manager's form, appended to the
/// [ledger](crate::ledger::Ledger) and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    /// The day the transaction was recorded.
    pub date: Date,
    /// The wall-clock time of entry formatted as "HH:MM".
    ///
    /// This is kept as text since the ledger never computes with it.
    pub time: String,
    /// The service the transaction belongs to, e.g. "Airtel Money".
    pub category: String,
    /// The category-dependent sub-label, e.g. "Dépôt".
    pub entry_type: String,
    /// The amount of money in FCFA. Never negative.
    pub amount: Decimal,
    /// Whether the money came in or went out.
    pub direction: Direction,
    /// Free text entered by the manager, possibly empty.
    pub description: String,
}

impl TransactionRecord {
    /// Create a new record.
    ///
    /// The record is only checked against the ledger schema when it is
    /// [appended](crate::ledger::Ledger::append).
    pub fn new(
        date: Date,
        time: &str,
        category: &str,
        entry_type: &str,
        amount: Decimal,
        direction: Direction,
        description: &str,
    ) -> Self {
        Self {
            date,
            time: time.to_owned(),
            category: category.to_owned(),
            entry_type: entry_type.to_owned(),
            amount,
            direction,
            description: description.to_owned(),
        }
    }

    /// The first of the time, category and type columns that is blank, if any.
    pub(crate) fn blank_required_column(&self) -> Option<&'static str> {
        [
            ("time", &self.time),
            ("category", &self.category),
            ("type", &self.entry_type),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(column, _)| column)
    }

    /// The record's fields in the order given by [COLUMNS].
    pub fn to_csv_row(&self) -> [String; 7] {
        [
            self.date.to_string(),
            self.time.clone(),
            self.category.clone(),
            self.entry_type.clone(),
            self.amount.to_string(),
            self.direction.marker().to_owned(),
            self.description.clone(),
        ]
    }

    /// Parse a CSV row laid out according to [COLUMNS].
    ///
    /// `row_number` is the 1-based line number in the file and is only used
    /// for error messages.
    ///
    /// # Errors
    ///
    /// Returns [Error::MalformedRow] if the row has the wrong number of
    /// fields, the date or amount cannot be parsed, the amount is negative,
    /// or the directional marker is not recognised.
    pub fn from_csv_row(row: &StringRecord, row_number: usize) -> Result<Self, Error> {
        let malformed = |reason: String| Error::MalformedRow {
            row: row_number,
            reason,
        };

        if row.len() != COLUMNS.len() {
            return Err(malformed(format!(
                "expected {} fields, got {}",
                COLUMNS.len(),
                row.len()
            )));
        }

        let raw_date = row.get(0).unwrap_or("");
        let time = row.get(1).unwrap_or("");
        let category = row.get(2).unwrap_or("");
        let entry_type = row.get(3).unwrap_or("");
        let raw_amount = row.get(4).unwrap_or("");
        let raw_marker = row.get(5).unwrap_or("");
        let description = row.get(6).unwrap_or("");

        let date = Date::parse(raw_date, DATE_FORMAT)
            .map_err(|error| malformed(format!("invalid date \"{raw_date}\": {error}")))?;

        let amount = Decimal::from_str(raw_amount)
            .map_err(|error| malformed(format!("invalid amount \"{raw_amount}\": {error}")))?;

        if amount < Decimal::ZERO {
            return Err(malformed(format!("negative amount {amount}")));
        }

        let direction = Direction::from_marker(raw_marker)
            .ok_or_else(|| malformed(format!("unknown transaction type \"{raw_marker}\"")))?;

        let record = Self::new(
            date,
            time,
            category,
            entry_type,
            amount,
            direction,
            description,
        );

        if let Some(column) = record.blank_required_column() {
            return Err(malformed(format!("{column} must not be empty")));
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use csv::StringRecord;
    use rust_decimal::Decimal;
    use time::macros::date;

    use crate::Error;

    use super::{Direction, TransactionRecord};

    fn row(fields: &[&str]) -> StringRecord {
        StringRecord::from(fields.to_vec())
    }

    #[test]
    fn parses_row_written_by_the_ledger() {
        let want = TransactionRecord::new(
            date!(2024 - 05 - 01),
            "09:30",
            "Airtel Money",
            "Dépôt",
            Decimal::new(50000, 2),
            Direction::Inflow,
            "client régulier",
        );

        let got = TransactionRecord::from_csv_row(&StringRecord::from(want.to_csv_row().to_vec()), 2)
            .expect("could not parse row");

        assert_eq!(want, got);
    }

    #[test]
    fn parses_float_amounts_and_empty_description() {
        let got = TransactionRecord::from_csv_row(
            &row(&["2024-05-01", "18:02", "Moov Money", "Retrait", "1500.0", "⬆️", ""]),
            3,
        )
        .unwrap();

        assert_eq!(got.amount, Decimal::new(1500, 0));
        assert_eq!(got.direction, Direction::Outflow);
        assert_eq!(got.description, "");
    }

    #[test]
    fn accepts_marker_without_variation_selector() {
        assert_eq!(Direction::from_marker("\u{2B07}"), Some(Direction::Inflow));
        assert_eq!(Direction::from_marker("\u{2B06}"), Some(Direction::Outflow));
        assert_eq!(Direction::from_marker("income"), None);
    }

    #[test]
    fn rejects_invalid_date() {
        let result = TransactionRecord::from_csv_row(
            &row(&["01/05/2024", "09:30", "Canal +", "Abonnement", "5000", "⬇️", ""]),
            4,
        );

        assert!(
            matches!(result, Err(Error::MalformedRow { row: 4, .. })),
            "want malformed row 4, got {result:?}"
        );
    }

    #[test]
    fn rejects_negative_amount() {
        let result = TransactionRecord::from_csv_row(
            &row(&["2024-05-01", "09:30", "Canal +", "Abonnement", "-5", "⬇️", ""]),
            2,
        );

        assert!(matches!(result, Err(Error::MalformedRow { row: 2, .. })));
    }

    #[test]
    fn rejects_unknown_marker() {
        let result = TransactionRecord::from_csv_row(
            &row(&["2024-05-01", "09:30", "Canal +", "Abonnement", "5", "income", ""]),
            2,
        );

        assert!(matches!(result, Err(Error::MalformedRow { row: 2, .. })));
    }

    #[test]
    fn rejects_blank_time_category_or_type() {
        let rows = [
            ["2024-05-01", "", "Canal +", "Abonnement", "5", "⬇️", ""],
            ["2024-05-01", "09:30", " ", "Abonnement", "5", "⬇️", ""],
            ["2024-05-01", "09:30", "Canal +", "", "5", "⬇️", ""],
        ];

        for fields in rows {
            let result = TransactionRecord::from_csv_row(&row(&fields), 3);

            assert!(
                matches!(result, Err(Error::MalformedRow { row: 3, .. })),
                "want malformed row 3 for {fields:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn keeps_description_whitespace() {
        let got = TransactionRecord::from_csv_row(
            &row(&["2024-05-01", "09:30", "Canal +", "Abonnement", "5", "⬇️", "  client  "]),
            2,
        )
        .unwrap();

        assert_eq!(got.description, "  client  ");
    }

    #[test]
    fn rejects_wrong_field_count() {
        let result = TransactionRecord::from_csv_row(&row(&["2024-05-01", "09:30"]), 7);

        assert!(matches!(result, Err(Error::MalformedRow { row: 7, .. })));
    }
}
