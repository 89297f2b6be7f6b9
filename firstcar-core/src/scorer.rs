//! Score catalog vehicles against a preference profile.
//!
//! The [`Scorer`] trait assigns a per-axis [`ScoreBreakdown`] to a
//! [`Vehicle`](crate::Vehicle) given a parent's
//! [`PreferenceProfile`](crate::PreferenceProfile).

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{PreferenceProfile, Vehicle};

/// Priority-weighted points earned on each axis.
///
/// Values are unbounded in both directions and only meaningful relative to
/// other vehicles scored against the same profile.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Weighted budget points.
    pub budget: f64,
    /// Weighted safety points.
    pub safety: f64,
    /// Weighted usage-fit points.
    pub usage: f64,
    /// Weighted extras points.
    pub extras: f64,
}

impl ScoreBreakdown {
    /// Sum of the four axes.
    #[expect(
        clippy::float_arithmetic,
        reason = "the total score is a plain sum of weighted axes"
    )]
    #[must_use]
    pub fn total(&self) -> f64 {
        self.budget + self.safety + self.usage + self.extras
    }
}

/// A vehicle together with its match score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredVehicle {
    /// The catalog row.
    #[serde(flatten)]
    pub vehicle: Vehicle,
    /// Total match score.
    pub score: f64,
    /// Per-axis contributions to `score`.
    pub score_breakdown: ScoreBreakdown,
}

impl ScoredVehicle {
    /// Attach a breakdown to a vehicle, deriving the total.
    #[must_use]
    pub fn new(vehicle: Vehicle, score_breakdown: ScoreBreakdown) -> Self {
        Self {
            vehicle,
            score: score_breakdown.total(),
            score_breakdown,
        }
    }

    /// Descending-score comparator suitable for a stable sort.
    ///
    /// Equal scores compare as `Equal`, so a stable sort keeps catalog order.
    #[must_use]
    pub fn cmp_by_score_desc(a: &Self, b: &Self) -> Ordering {
        b.score.total_cmp(&a.score)
    }
}

/// Calculate a match score for a vehicle.
///
/// Implementations must be pure: the same vehicle and profile always yield
/// the same breakdown. Axes absent from the profile must contribute `0.0`.
/// Implementations must be thread-safe (`Send` + `Sync`) so a single scorer
/// can serve concurrent requests.
///
/// # Examples
///
/// ```rust
/// use firstcar_core::{PreferenceProfile, ScoreBreakdown, Scorer, Vehicle};
///
/// struct FlatScorer;
///
/// impl Scorer for FlatScorer {
///     fn score(&self, _vehicle: &Vehicle, _profile: &PreferenceProfile) -> ScoreBreakdown {
///         ScoreBreakdown::default()
///     }
/// }
///
/// let vehicle = Vehicle::builder("id", "Mazda", "3").years([2022]).build().unwrap();
/// let scored = FlatScorer.score_vehicle(vehicle, &PreferenceProfile::new());
/// assert_eq!(scored.score, 0.0);
/// ```
pub trait Scorer: Send + Sync {
    /// Return the per-axis breakdown for `vehicle` according to `profile`.
    fn score(&self, vehicle: &Vehicle, profile: &PreferenceProfile) -> ScoreBreakdown;

    /// Score a vehicle and wrap it as a [`ScoredVehicle`].
    fn score_vehicle(&self, vehicle: Vehicle, profile: &PreferenceProfile) -> ScoredVehicle {
        let breakdown = self.score(&vehicle, profile);
        ScoredVehicle::new(vehicle, breakdown)
    }
}
