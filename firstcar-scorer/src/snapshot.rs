//! Hand-off to the recommendation text generator.
//!
//! The engine packages the ranked shortlist and the parent's preferences into
//! a [`GeneratorSnapshot`]. Whatever turns that into prose implements
//! [`RecommendationGenerator`]; its output is kept as opaque text.

use std::{collections::BTreeSet, error::Error as StdError};

use firstcar_core::{BodyStyle, Drivetrain, PreferenceProfile, ScoreBreakdown, ScoredVehicle};
use serde::{Deserialize, Serialize};

use crate::{NormalizedPreferences, PreferenceContext};

/// Version recorded in snapshot metadata.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A shortlisted vehicle trimmed to the fields worth describing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSummary {
    /// Catalog identifier.
    pub id: String,
    /// Manufacturer.
    pub make: String,
    /// Model name.
    pub model: String,
    /// Trim level, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim: Option<String>,
    /// Model years covered.
    pub years: BTreeSet<u16>,
    /// Cheapest configuration.
    pub msrp_min: u32,
    /// Most expensive configuration.
    pub msrp_max: u32,
    /// Body style.
    pub body_style: BodyStyle,
    /// Driven wheels.
    pub drivetrain: Drivetrain,
    /// IIHS Top Safety Pick.
    pub safety_iihs_top_safety_pick: bool,
    /// NHTSA overall stars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_nhtsa_overall: Option<u8>,
    /// Total match score.
    pub score: f64,
    /// Per-axis contributions.
    pub score_breakdown: ScoreBreakdown,
}

impl From<&ScoredVehicle> for CandidateSummary {
    fn from(scored: &ScoredVehicle) -> Self {
        let vehicle = &scored.vehicle;
        Self {
            id: vehicle.id.clone(),
            make: vehicle.make.clone(),
            model: vehicle.model.clone(),
            trim: vehicle.trim.clone(),
            years: vehicle.years.clone(),
            msrp_min: vehicle.msrp_min,
            msrp_max: vehicle.msrp_max,
            body_style: vehicle.body_style,
            drivetrain: vehicle.drivetrain,
            safety_iihs_top_safety_pick: vehicle.safety_iihs_top_safety_pick,
            safety_nhtsa_overall: vehicle.safety_nhtsa_overall,
            score: scored.score,
            score_breakdown: scored.score_breakdown,
        }
    }
}

/// Bookkeeping attached to a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    /// Number of candidates included.
    pub candidate_count: usize,
    /// Number of vehicles scored to pick them.
    pub catalog_size: usize,
    /// Engine version that produced the ranking.
    pub engine_version: String,
}

/// Payload handed to the text generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorSnapshot {
    /// Typed preferences used for scoring.
    pub preferences: PreferenceProfile,
    /// Prose summaries of the answers.
    pub context: PreferenceContext,
    /// Shortlisted vehicles, best first.
    pub candidates: Vec<CandidateSummary>,
    /// Counts and version.
    pub metadata: SnapshotMetadata,
}

impl GeneratorSnapshot {
    /// Bundle normalized answers with a ranked shortlist.
    #[must_use]
    pub fn new(
        normalized: &NormalizedPreferences,
        candidates: &[ScoredVehicle],
        catalog_size: usize,
    ) -> Self {
        Self {
            preferences: normalized.profile.clone(),
            context: normalized.context.clone(),
            candidates: candidates.iter().map(CandidateSummary::from).collect(),
            metadata: SnapshotMetadata {
                candidate_count: candidates.len(),
                catalog_size,
                engine_version: ENGINE_VERSION.to_owned(),
            },
        }
    }
}

/// Free-text output of a [`RecommendationGenerator`].
///
/// # Examples
/// ```
/// use firstcar_scorer::GeneratorResponse;
///
/// let response = GeneratorResponse::new("Here you go:\n{\"picks\": [\"civic\"]}");
/// assert_eq!(response.parsed().expect("embedded JSON")["picks"][0], "civic");
/// assert!(GeneratorResponse::new("no structure here").parsed().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratorResponse {
    raw: String,
}

impl GeneratorResponse {
    /// Wrap generator output.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// Output exactly as produced.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Best-effort JSON view of the output.
    ///
    /// Tries the whole text first, then the outermost `{...}` span. Returns
    /// `None` when neither parses; the content is never validated.
    #[must_use]
    pub fn parsed(&self) -> Option<serde_json::Value> {
        let text = self.raw.trim();
        if let Ok(value) = serde_json::from_str(text) {
            return Some(value);
        }
        let start = text.find('{')?;
        let end = text.rfind('}')?;
        let span = text.get(start..=end)?;
        serde_json::from_str(span).ok()
    }
}

/// Turns a [`GeneratorSnapshot`] into recommendation text.
///
/// Implementations typically call a remote language model; the engine never
/// inspects the result beyond [`GeneratorResponse::parsed`].
pub trait RecommendationGenerator {
    /// Failure raised by the generator.
    type Error: StdError + Send + Sync + 'static;

    /// Produce recommendations for `snapshot`.
    ///
    /// # Errors
    /// Implementations report transport or service failures through
    /// [`Self::Error`].
    fn generate(&self, snapshot: &GeneratorSnapshot) -> Result<GeneratorResponse, Self::Error>;
}
