//! Core domain types for the first-car matching engine.
//!
//! These models validate on construction so that scoring and ranking can
//! assume well-formed catalog rows and descriptors. Constructors return
//! `Result` to surface invalid input early.
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod profile;
pub mod ranking;
pub mod scorer;
pub mod store;
pub mod tags;
pub mod vehicle;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use profile::{
    BudgetPreference, ExtrasPreference, PreferenceProfile, Priority, SafetyLevel,
    SafetyPreference, UsagePreference,
};
pub use ranking::{
    DescriptorError, MAX_MODEL_YEAR, MIN_MODEL_YEAR, RankingResult, VehicleDescriptor,
};
pub use scorer::{ScoreBreakdown, ScoredVehicle, Scorer};
pub use store::{CatalogFilter, CatalogStore, MemoryCatalog, MemoryCatalogError};
#[cfg(feature = "store-sqlite")]
#[cfg_attr(docsrs, doc(cfg(feature = "store-sqlite")))]
pub use store::{SqliteCatalogError, SqliteCatalogStore, VEHICLES_TABLE};
pub use tags::{ExtrasTag, UnknownTag, UsageTag};
pub use vehicle::{BodyStyle, Drivetrain, Vehicle, VehicleBuilder, VehicleDetails, VehicleError};
