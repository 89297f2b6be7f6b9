//! Preference normalization, match scoring and ranking for first-car
//! shortlists.
//!
//! The crate provides three cooperating pieces:
//! - **Normalization** turns raw quiz answers into a typed
//!   [`PreferenceProfile`](firstcar_core::PreferenceProfile) plus a prose
//!   [`PreferenceContext`], reporting ignored answers as [`AnswerIssue`]s.
//! - **Scoring** rates every vehicle on four axes (budget, safety, usage and
//!   extras) and weights each by the parent's priority. [`MatchScorer`]
//!   implements the [`Scorer`](firstcar_core::Scorer) trait.
//! - **Ranking** sorts the whole catalog, returns the top N, or places a
//!   specific make/model/year in the full order. [`RankingEngine`] reads a
//!   fresh snapshot from an injected
//!   [`CatalogStore`](firstcar_core::CatalogStore) on every call.
//!
//! # Examples
//!
//! ```
//! use firstcar_core::test_support::sample_catalog;
//! use firstcar_core::MemoryCatalog;
//! use firstcar_scorer::{RankingEngine, RawAnswer, normalize};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let normalized = normalize(&[
//!     RawAnswer::single("budget", "20k-25k").with_priority(5),
//!     RawAnswer::single("safety", "max").with_priority(4),
//! ]);
//! let engine = RankingEngine::new(MemoryCatalog::new(sample_catalog())?);
//! let shortlist = engine.shortlist(&normalized.profile)?;
//! assert_eq!(shortlist.len(), 4);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod answers;
mod axes;
mod engine;
mod error;
mod normalizer;
mod snapshot;
mod tables;

pub use answers::{AnswerKind, AnswerPriority, RawAnswer};
pub use axes::{
    EXTRAS_TAG_WEIGHT, NO_TAG_MATCH_PENALTY, USAGE_TAG_WEIGHT, score_budget, score_extras,
    score_safety, score_tag_overlap, score_usage,
};
pub use engine::{
    DEFAULT_LEADERBOARD_SIZE, DEFAULT_TOP_LIMIT, MAX_LEADERBOARD_SIZE, MatchScorer,
    RankingConfig, RankingEngine, rank_catalog, rank_vehicle_against_profile, top_vehicles,
};
pub use error::RankingError;
pub use normalizer::{AnswerIssue, NormalizedPreferences, PreferenceContext, normalize};
pub use snapshot::{
    CandidateSummary, ENGINE_VERSION, GeneratorResponse, GeneratorSnapshot,
    RecommendationGenerator, SnapshotMetadata,
};
