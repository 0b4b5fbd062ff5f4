//! Checks a submitted transaction form against the service catalog.

use std::str::FromStr;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    alert::Alert,
    catalog::Catalog,
    clock::EntryTimestamp,
    ledger::{Direction, TransactionRecord},
};

/// The largest amount, in FCFA, accepted for a single transaction.
///
/// Far above any kiosk transaction, and low enough that the ledger totals
/// stay within [Decimal]'s range.
// 1_000_000_000_000 == 0xE8_D4A5_1000
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// The form data for recording a transaction.
///
/// Every field defaults to an empty string so that a form submitted before
/// a select was filled in is rejected with a message instead of a parse error.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionForm {
    /// The service, e.g. "Airtel Money".
    #[serde(default)]
    pub category: String,
    /// The transaction type offered by the service, e.g. "Dépôt".
    #[serde(default)]
    pub type_: String,
    /// The amount in FCFA as typed by the manager.
    #[serde(default)]
    pub amount: String,
    /// Optional free text.
    #[serde(default)]
    pub description: String,
}

/// Why a submitted transaction was rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// No category was selected.
    #[error("Veuillez sélectionner une catégorie.")]
    MissingCategory,

    /// The category is not one of the kiosk's services.
    #[error("La catégorie \"{0}\" n'existe pas.")]
    UnknownCategory(String),

    /// The amount is not a number.
    #[error("Le montant \"{0}\" n'est pas un nombre valide.")]
    InvalidAmount(String),

    /// The amount is zero or negative.
    #[error("Le montant doit être supérieur à zéro.")]
    NonPositiveAmount,

    /// The amount is above [MAX_AMOUNT].
    #[error("Le montant ne doit pas dépasser {} FCFA.", MAX_AMOUNT)]
    AmountTooLarge,

    /// No type was selected.
    #[error("Veuillez sélectionner un type.")]
    MissingType,

    /// The type is not offered by the selected service.
    #[error("Le type \"{entry_type}\" n'est pas disponible pour {category}.")]
    TypeNotOffered {
        /// The selected category.
        category: String,
        /// The submitted type.
        entry_type: String,
    },
}

impl IntoResponse for SubmissionError {
    fn into_response(self) -> Response {
        Alert::error("Transaction refusée", &self.to_string())
            .into_response_with_status(StatusCode::UNPROCESSABLE_ENTITY)
    }
}

/// A submission that passed every check, ready to be stamped and recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    category: String,
    entry_type: String,
    amount: Decimal,
    direction: Direction,
    description: String,
}

impl Submission {
    /// Check `form` against `catalog`.
    ///
    /// The category is checked first, then the amount, then the type, so
    /// the manager is told about the first field to fix in form order.
    ///
    /// # Errors
    ///
    /// Returns the first [SubmissionError] found.
    pub fn validate(form: TransactionForm, catalog: &Catalog) -> Result<Self, SubmissionError> {
        let category = form.category.trim();
        if category.is_empty() {
            return Err(SubmissionError::MissingCategory);
        }
        if catalog.service(category).is_none() {
            return Err(SubmissionError::UnknownCategory(category.to_owned()));
        }

        let amount = parse_amount(&form.amount)?;

        let entry_type = form.type_.trim();
        if entry_type.is_empty() {
            return Err(SubmissionError::MissingType);
        }
        let direction = catalog.direction_of(category, entry_type).ok_or_else(|| {
            SubmissionError::TypeNotOffered {
                category: category.to_owned(),
                entry_type: entry_type.to_owned(),
            }
        })?;

        Ok(Self {
            category: category.to_owned(),
            entry_type: entry_type.to_owned(),
            amount,
            direction,
            description: form.description,
        })
    }

    /// Turn the submission into a ledger record entered at `timestamp`.
    pub fn into_record(self, timestamp: EntryTimestamp) -> TransactionRecord {
        TransactionRecord {
            date: timestamp.date,
            time: timestamp.time,
            category: self.category,
            entry_type: self.entry_type,
            amount: self.amount,
            direction: self.direction,
            description: self.description,
        }
    }
}

fn parse_amount(text: &str) -> Result<Decimal, SubmissionError> {
    let text = text.trim();
    let amount = Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| SubmissionError::InvalidAmount(text.to_owned()))?;

    if amount <= Decimal::ZERO {
        return Err(SubmissionError::NonPositiveAmount);
    }
    if amount > MAX_AMOUNT {
        return Err(SubmissionError::AmountTooLarge);
    }

    Ok(amount)
}
