//! The services offered by the kiosk and the transaction types each allows.
//!
//! The manager's form only accepts categories and types listed here, and the
//! catalog decides whether a (category, type) pair is money coming in or
//! going out. The list changes between revisions of the business, so it can
//! be replaced at start-up with a JSON file.

use std::{collections::HashSet, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, ledger::Direction};

/// A transaction type offered by a service, e.g. "Dépôt" for Airtel Money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryType {
    /// The label shown in the form and stored in the `type` column.
    pub label: String,
    /// Whether transactions of this type bring money in or pay money out.
    pub direction: Direction,
}

/// A service sold at the kiosk, i.e. a transaction category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// The name shown in the form and stored in the `category` column.
    pub name: String,
    /// The types the manager can choose from for this service.
    pub entry_types: Vec<EntryType>,
}

/// The closed set of categories and types accepted by the manager's form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    services: Vec<Service>,
}

#[derive(Deserialize)]
struct RawCatalog {
    services: Vec<Service>,
}

impl Catalog {
    /// Create a catalog from a list of services.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidCatalog] if there are no services, a service
    /// or type name is empty or repeated, or a service has no types.
    pub fn new(services: Vec<Service>) -> Result<Self, Error> {
        if services.is_empty() {
            return Err(Error::InvalidCatalog(
                "the catalog must list at least one service".to_owned(),
            ));
        }

        let mut service_names = HashSet::new();

        for service in &services {
            if service.name.trim().is_empty() {
                return Err(Error::InvalidCatalog(
                    "service names must not be empty".to_owned(),
                ));
            }

            if !service_names.insert(service.name.as_str()) {
                return Err(Error::InvalidCatalog(format!(
                    "the service \"{}\" is listed more than once",
                    service.name
                )));
            }

            if service.entry_types.is_empty() {
                return Err(Error::InvalidCatalog(format!(
                    "the service \"{}\" has no transaction types",
                    service.name
                )));
            }

            let mut labels = HashSet::new();

            for entry_type in &service.entry_types {
                if entry_type.label.trim().is_empty() {
                    return Err(Error::InvalidCatalog(format!(
                        "the service \"{}\" has a transaction type with an empty label",
                        service.name
                    )));
                }

                if !labels.insert(entry_type.label.as_str()) {
                    return Err(Error::InvalidCatalog(format!(
                        "the service \"{}\" lists the type \"{}\" more than once",
                        service.name, entry_type.label
                    )));
                }
            }
        }

        Ok(Self { services })
    }

    /// Parse a catalog from JSON of the form
    /// `{"services": [{"name": "...", "entry_types": [{"label": "...", "direction": "inflow"}]}]}`.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidCatalog] if the JSON is malformed or the
    /// catalog fails the checks in [Catalog::new].
    pub fn from_json_str(text: &str) -> Result<Self, Error> {
        let raw: RawCatalog = serde_json::from_str(text)
            .map_err(|error| Error::InvalidCatalog(format!("could not parse JSON: {error}")))?;

        Self::new(raw.services)
    }

    /// Read a catalog from a JSON file, see [Catalog::from_json_str].
    pub fn from_json_file(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|error| {
            Error::InvalidCatalog(format!("could not read {}: {error}", path.display()))
        })?;

        Self::from_json_str(&text)
    }

    /// The services in display order.
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Find the service named `category`.
    pub fn service(&self, category: &str) -> Option<&Service> {
        self.services
            .iter()
            .find(|service| service.name == category)
    }

    /// The types allowed for `category`, or an empty slice for an unknown category.
    pub fn types_for(&self, category: &str) -> &[EntryType] {
        self.service(category)
            .map(|service| service.entry_types.as_slice())
            .unwrap_or_default()
    }

    /// The direction of money for a (category, type) pair, if the pair is in the catalog.
    pub fn direction_of(&self, category: &str, entry_type: &str) -> Option<Direction> {
        self.types_for(category)
            .iter()
            .find(|candidate| candidate.label == entry_type)
            .map(|candidate| candidate.direction)
    }
}

impl Default for Catalog {
    /// The kiosk's mobile money, TV subscription and daily takings services.
    fn default() -> Self {
        let mobile_money = |name: &str| Service {
            name: name.to_owned(),
            entry_types: vec![
                entry_type("Dépôt", Direction::Inflow),
                entry_type("Retrait", Direction::Outflow),
            ],
        };

        Self {
            services: vec![
                mobile_money("Airtel Money"),
                mobile_money("Moov Money"),
                Service {
                    name: "Canal +".to_owned(),
                    entry_types: vec![
                        entry_type("Abonnement", Direction::Inflow),
                        entry_type("Achat de Kits", Direction::Inflow),
                    ],
                },
                Service {
                    name: "Recette Journalière".to_owned(),
                    entry_types: vec![
                        entry_type("Secretariat", Direction::Inflow),
                        entry_type("Transfert Airtel", Direction::Inflow),
                        entry_type("Transfert Moov", Direction::Inflow),
                    ],
                },
            ],
        }
    }
}

fn entry_type(label: &str, direction: Direction) -> EntryType {
    EntryType {
        label: label.to_owned(),
        direction,
    }
}
