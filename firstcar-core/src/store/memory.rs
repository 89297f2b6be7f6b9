//! In-memory catalog snapshots, typically loaded from a JSON export.

use std::{collections::HashSet, convert::Infallible, io::Read};

use thiserror::Error;

use crate::{Vehicle, VehicleError};

use super::{CatalogFilter, CatalogStore};

/// Errors raised while building a [`MemoryCatalog`].
#[derive(Debug, Error)]
pub enum MemoryCatalogError {
    /// The JSON payload could not be decoded.
    #[error("failed to parse catalog JSON: {source}")]
    Parse {
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// A row violated a catalog invariant.
    #[error(transparent)]
    InvalidVehicle(#[from] VehicleError),
    /// Two rows shared an identifier.
    #[error("vehicle id {id} appears more than once")]
    DuplicateId {
        /// Repeated identifier.
        id: String,
    },
}

/// Catalog held entirely in memory, preserving insertion order.
///
/// # Examples
/// ```
/// use firstcar_core::{CatalogFilter, CatalogStore, MemoryCatalog};
///
/// # fn main() -> Result<(), firstcar_core::MemoryCatalogError> {
/// let json = r#"[{"id":"rav4","make":"Toyota","model":"RAV4","years":[2022],
///     "msrpMin":28000,"msrpMax":36000,"bodyStyle":"suv","drivetrain":"AWD"}]"#;
/// let catalog = MemoryCatalog::from_json_reader(json.as_bytes())?;
/// assert_eq!(catalog.len(), 1);
/// assert_eq!(catalog.fetch_vehicles(&CatalogFilter::all()).unwrap()[0].model, "RAV4");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryCatalog {
    vehicles: Vec<Vehicle>,
}

impl MemoryCatalog {
    /// Validate rows and build a catalog.
    ///
    /// # Errors
    /// Returns [`MemoryCatalogError::InvalidVehicle`] for rows breaking an
    /// invariant and [`MemoryCatalogError::DuplicateId`] for repeated ids.
    pub fn new<I>(vehicles: I) -> Result<Self, MemoryCatalogError>
    where
        I: IntoIterator<Item = Vehicle>,
    {
        let vehicles: Vec<Vehicle> = vehicles.into_iter().collect();
        ensure_valid_rows(&vehicles)?;
        Ok(Self { vehicles })
    }

    /// Decode a JSON array of vehicles and validate it.
    ///
    /// # Errors
    /// Returns [`MemoryCatalogError::Parse`] for malformed JSON and any error
    /// [`MemoryCatalog::new`] raises.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, MemoryCatalogError> {
        let vehicles: Vec<Vehicle> = serde_json::from_reader(reader)
            .map_err(|source| MemoryCatalogError::Parse { source })?;
        Self::new(vehicles)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Report whether the catalog has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Borrow the rows in catalog order.
    #[must_use]
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }
}

fn ensure_valid_rows(vehicles: &[Vehicle]) -> Result<(), MemoryCatalogError> {
    let mut seen = HashSet::with_capacity(vehicles.len());
    for vehicle in vehicles {
        vehicle.validate()?;
        if !seen.insert(vehicle.id.as_str()) {
            return Err(MemoryCatalogError::DuplicateId {
                id: vehicle.id.clone(),
            });
        }
    }
    Ok(())
}

impl CatalogStore for MemoryCatalog {
    type Error = Infallible;

    fn fetch_vehicles(&self, filter: &CatalogFilter) -> Result<Vec<Vehicle>, Self::Error> {
        self.vehicles.as_slice().fetch_vehicles(filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(id: &str) -> Vehicle {
        Vehicle::builder(id, "Kia", "Forte")
            .years([2022])
            .msrp(19_000, 23_000)
            .build()
            .expect("valid row")
    }

    #[rstest]
    fn keeps_insertion_order() {
        let catalog = MemoryCatalog::new([row("b"), row("a"), row("c")]).expect("catalog");
        let ids: Vec<_> = catalog.vehicles().iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["b", "a", "c"]);
    }

    #[rstest]
    fn rejects_duplicate_ids() {
        let err = MemoryCatalog::new([row("a"), row("a")]).unwrap_err();
        assert!(matches!(err, MemoryCatalogError::DuplicateId { id } if id == "a"));
    }

    #[rstest]
    fn rejects_rows_without_years() {
        let json = r#"[{"id":"x","make":"Kia","model":"Soul","years":[],
            "msrpMin":1,"msrpMax":2,"bodyStyle":"hatchback","drivetrain":"FWD"}]"#;
        let err = MemoryCatalog::from_json_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            MemoryCatalogError::InvalidVehicle(VehicleError::NoYears { .. })
        ));
    }

    #[rstest]
    fn reports_malformed_json() {
        let err = MemoryCatalog::from_json_reader("{ nope".as_bytes()).unwrap_err();
        assert!(matches!(err, MemoryCatalogError::Parse { .. }));
    }
}
