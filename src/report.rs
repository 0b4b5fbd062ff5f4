//! Aggregates the ledger into income, expense and profit totals.
//!
//! Totals always cover the entire history. There is no date range, no
//! currency conversion and no rounding: amounts are summed exactly and only
//! rounded to two decimals when displayed.

use rust_decimal::Decimal;

use crate::{
    Error,
    ledger::{Direction, Ledger, TransactionRecord},
};

/// Money in and money out over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// The sum of all inflow amounts.
    pub inflow: Decimal,
    /// The sum of all outflow amounts.
    pub outflow: Decimal,
}

impl Summary {
    /// Sum the amounts of `records` by direction.
    ///
    /// # Errors
    ///
    /// Returns [Error::TotalOverflow] if a running total no longer fits in a [Decimal].
    pub fn of<'a>(records: impl IntoIterator<Item = &'a TransactionRecord>) -> Result<Self, Error> {
        records
            .into_iter()
            .try_fold(Self::default(), |summary, record| summary.with(record))
    }

    /// Inflow minus outflow, i.e. the profit.
    ///
    /// Both totals are non-negative so the difference always fits.
    pub fn net(&self) -> Decimal {
        self.inflow - self.outflow
    }

    /// Add two summaries field by field, or `None` if either total overflows.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(Self {
            inflow: self.inflow.checked_add(rhs.inflow)?,
            outflow: self.outflow.checked_add(rhs.outflow)?,
        })
    }

    fn with(self, record: &TransactionRecord) -> Result<Self, Error> {
        let (total, direction) = match record.direction {
            Direction::Inflow => (self.inflow, "inflow"),
            Direction::Outflow => (self.outflow, "outflow"),
        };

        let total = total
            .checked_add(record.amount)
            .ok_or_else(|| Error::TotalOverflow(direction.to_owned()))?;

        Ok(match record.direction {
            Direction::Inflow => Self {
                inflow: total,
                ..self
            },
            Direction::Outflow => Self {
                outflow: total,
                ..self
            },
        })
    }
}

/// The result of aggregating the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// The ledger has no rows, there is nothing to show.
    NoData,
    /// The totals over every row of the ledger.
    Totals(Summary),
}

/// Compute the totals for the whole ledger.
///
/// An empty ledger gives [Report::NoData] rather than zero totals so that
/// callers can show an empty state instead of a row of zeros.
///
/// # Errors
///
/// Returns [Error::TotalOverflow] if the amounts are too large to be summed.
pub fn summarize(ledger: &Ledger) -> Result<Report, Error> {
    if ledger.is_empty() {
        return Ok(Report::NoData);
    }

    Summary::of(ledger.records()).map(Report::Totals)
}

/// The totals for a single category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotals {
    /// The category name, e.g. "Canal +".
    pub category: String,
    /// The number of transactions in the category.
    pub count: usize,
    /// Money in and out for the category.
    pub summary: Summary,
}

/// Compute totals per category, in the order each category first appears in the ledger.
///
/// # Errors
///
/// Returns [Error::TotalOverflow] if a category's amounts are too large to be summed.
pub fn breakdown_by_category(ledger: &Ledger) -> Result<Vec<CategoryTotals>, Error> {
    let mut breakdown: Vec<CategoryTotals> = Vec::new();

    for record in ledger.records() {
        let position = breakdown
            .iter()
            .position(|totals| totals.category == record.category);

        let totals = match position {
            Some(position) => &mut breakdown[position],
            None => {
                breakdown.push(CategoryTotals {
                    category: record.category.clone(),
                    count: 0,
                    summary: Summary::default(),
                });
                let last = breakdown.len() - 1;
                &mut breakdown[last]
            }
        };

        totals.count += 1;
        totals.summary = totals.summary.with(record)?;
    }

    Ok(breakdown)
}
