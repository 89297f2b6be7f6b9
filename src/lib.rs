//! Facade crate for the first-car recommendation engine.
//!
//! This crate re-exports the domain model and the ranking engine, and exposes
//! the SQLite catalog and test fixtures behind feature flags.

#![forbid(unsafe_code)]

pub use firstcar_core::{
    BodyStyle, BudgetPreference, CatalogFilter, CatalogStore, DescriptorError, Drivetrain,
    ExtrasPreference, ExtrasTag, MemoryCatalog, MemoryCatalogError, PreferenceProfile, Priority,
    RankingResult, SafetyLevel, SafetyPreference, ScoreBreakdown, ScoredVehicle, Scorer,
    UsagePreference, UsageTag, Vehicle, VehicleDescriptor, VehicleDetails,
};

#[cfg(feature = "store-sqlite")]
pub use firstcar_core::{SqliteCatalogError, SqliteCatalogStore};

#[cfg(feature = "test-support")]
pub use firstcar_core::test_support;

pub use firstcar_scorer::{
    AnswerIssue, GeneratorResponse, GeneratorSnapshot, MatchScorer, NormalizedPreferences,
    PreferenceContext, RankingConfig, RankingEngine, RankingError, RawAnswer,
    RecommendationGenerator, normalize,
};
