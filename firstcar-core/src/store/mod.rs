//! Data access traits for the vehicle catalog.
//!
//! The `CatalogStore` trait defines a read-only interface for retrieving
//! [`Vehicle`] snapshots. The ranking engine always asks for the full
//! catalog; the [`CatalogFilter`] predicates exist for maintenance tooling.

use std::convert::Infallible;

use crate::Vehicle;

mod memory;
#[cfg(feature = "store-sqlite")]
mod sqlite;

pub use memory::{MemoryCatalog, MemoryCatalogError};
#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteCatalogError, SqliteCatalogStore, VEHICLES_TABLE};

/// Optional predicates narrowing a catalog read.
///
/// The default filter matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    /// Case-insensitive make.
    pub make: Option<String>,
    /// Case-insensitive model.
    pub model: Option<String>,
    /// Model year the row must cover.
    pub year: Option<u16>,
    /// Keep only rows lacking pricing, a safety rating or descriptive details.
    pub missing_enrichment: bool,
}

impl CatalogFilter {
    /// Filter matching every vehicle.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Report whether `vehicle` satisfies every set predicate.
    #[must_use]
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        let make_ok = self
            .make
            .as_deref()
            .is_none_or(|make| vehicle.make.trim().eq_ignore_ascii_case(make.trim()));
        let model_ok = self
            .model
            .as_deref()
            .is_none_or(|model| vehicle.model.trim().eq_ignore_ascii_case(model.trim()));
        let year_ok = self.year.is_none_or(|year| vehicle.covers_year(year));
        let enrichment_ok = !self.missing_enrichment || needs_enrichment(vehicle);
        make_ok && model_ok && year_ok && enrichment_ok
    }
}

fn needs_enrichment(vehicle: &Vehicle) -> bool {
    vehicle.msrp_max == 0 || vehicle.safety_nhtsa_overall.is_none() || vehicle.details.is_empty()
}

/// Read-only access to catalog snapshots.
///
/// Each call returns a fresh snapshot in a stable order; callers must not
/// assume anything is cached between calls.
///
/// # Examples
///
/// ```rust
/// use std::convert::Infallible;
/// use firstcar_core::{CatalogFilter, CatalogStore, Vehicle};
///
/// struct Fixed(Vec<Vehicle>);
///
/// impl CatalogStore for Fixed {
///     type Error = Infallible;
///
///     fn fetch_vehicles(&self, filter: &CatalogFilter) -> Result<Vec<Vehicle>, Infallible> {
///         Ok(self.0.iter().filter(|v| filter.matches(v)).cloned().collect())
///     }
/// }
///
/// let kona = Vehicle::builder("kona", "Hyundai", "Kona").years([2023]).build().unwrap();
/// let store = Fixed(vec![kona.clone()]);
/// assert_eq!(store.fetch_vehicles(&CatalogFilter::all()).unwrap(), vec![kona]);
/// ```
pub trait CatalogStore {
    /// Error raised when the snapshot cannot be read.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Return every vehicle satisfying `filter`, in catalog order.
    ///
    /// # Errors
    /// Implementations report backend failures through [`Self::Error`].
    fn fetch_vehicles(&self, filter: &CatalogFilter) -> Result<Vec<Vehicle>, Self::Error>;
}

impl<T: CatalogStore + ?Sized> CatalogStore for &T {
    type Error = T::Error;

    fn fetch_vehicles(&self, filter: &CatalogFilter) -> Result<Vec<Vehicle>, Self::Error> {
        (**self).fetch_vehicles(filter)
    }
}

impl CatalogStore for [Vehicle] {
    type Error = Infallible;

    fn fetch_vehicles(&self, filter: &CatalogFilter) -> Result<Vec<Vehicle>, Self::Error> {
        Ok(self
            .iter()
            .filter(|vehicle| filter.matches(vehicle))
            .cloned()
            .collect())
    }
}
