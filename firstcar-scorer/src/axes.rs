//! Raw per-axis scoring functions.
//!
//! Each function returns unweighted points for one vehicle against one
//! optional preference. An absent preference always scores `0.0`. Priority
//! weighting is applied by [`MatchScorer`](crate::MatchScorer).

use std::collections::BTreeSet;

use firstcar_core::{
    BudgetPreference, ExtrasPreference, SafetyLevel, SafetyPreference, UsagePreference, Vehicle,
};

/// Points per matching usage tag.
pub const USAGE_TAG_WEIGHT: u8 = 4;
/// Points per matching extras tag.
pub const EXTRAS_TAG_WEIGHT: u8 = 2;
/// Flat raw penalty when no requested tag matches.
pub const NO_TAG_MATCH_PENALTY: f64 = -3.0;

const COMFORT_MARGIN: i64 = 2_000;
const OVERAGE_TOLERANCE: i64 = 2_500;
const FLOOR_MARGIN: i64 = 2_000;

/// Score the vehicle's price against a soft budget.
///
/// A missing ceiling is treated as unbounded.
///
/// # Examples
/// ```
/// use firstcar_core::{BudgetPreference, Priority, Vehicle};
/// use firstcar_scorer::score_budget;
///
/// let car = Vehicle::builder("a", "Kia", "Rio").years([2021]).msrp(15_000, 17_500).build().unwrap();
/// let budget = BudgetPreference { min: None, max: Some(20_000), priority: Priority::DEFAULT };
/// assert_eq!(score_budget(&car, Some(&budget)), 8.0);
/// assert_eq!(score_budget(&car, None), 0.0);
/// ```
#[must_use]
pub fn score_budget(vehicle: &Vehicle, budget: Option<&BudgetPreference>) -> f64 {
    let Some(budget) = budget else {
        return 0.0;
    };
    let msrp_max = i64::from(vehicle.msrp_max);
    let msrp_min = i64::from(vehicle.msrp_min);

    let ceiling_points = match budget.max.map(i64::from) {
        None => 8,
        Some(max) if msrp_max <= max - COMFORT_MARGIN => 8,
        Some(max) if msrp_max <= max => 6,
        Some(max) if msrp_max <= max + OVERAGE_TOLERANCE => 2,
        Some(_) => -6,
    };

    let floor_points = match budget.min.map(i64::from) {
        Some(min) if min > 0 => {
            if msrp_min >= min {
                2
            } else if msrp_min >= min - FLOOR_MARGIN {
                1
            } else {
                -2
            }
        }
        _ => 0,
    };

    f64::from(ceiling_points + floor_points)
}

/// Score the vehicle's safety record against the requested tier.
///
/// Higher tiers reward more and penalise missing credentials more harshly.
#[must_use]
pub fn score_safety(vehicle: &Vehicle, safety: Option<&SafetyPreference>) -> f64 {
    let Some(safety) = safety else {
        return 0.0;
    };
    let pick = vehicle.safety_iihs_top_safety_pick;
    let stars = vehicle.safety_nhtsa_overall.unwrap_or(0);
    let features = vehicle.safety_notable_features.len();

    let points: i32 = match safety.level {
        SafetyLevel::Baseline => {
            let award = if pick { 4 } else { 0 };
            let rating = if stars >= 4 { 4 } else { -2 };
            award + rating
        }
        SafetyLevel::Advanced => {
            let award = if pick { 6 } else { -4 };
            let rating = if stars >= 5 { 5 } else { 0 };
            let equipment = match features {
                0 => -2,
                1 => 1,
                _ => 3,
            };
            award + rating + equipment
        }
        SafetyLevel::Max => {
            let award = if pick { 8 } else { -6 };
            let rating = if stars >= 5 { 6 } else { -4 };
            let equipment = if features >= 3 { 4 } else { -2 };
            award + rating + equipment
        }
    };
    f64::from(points)
}

/// Score overlap between the vehicle's tags and the requested tags.
///
/// Returns `0.0` when nothing was requested, [`NO_TAG_MATCH_PENALTY`] when
/// nothing matches, and otherwise `matches * weight + 2 * matches / requested`.
#[expect(
    clippy::float_arithmetic,
    reason = "overlap combines a count with a coverage ratio"
)]
#[must_use]
pub fn score_tag_overlap<T: Ord>(offered: &BTreeSet<T>, requested: &BTreeSet<T>, weight: u8) -> f64 {
    if requested.is_empty() {
        return 0.0;
    }
    let matched = requested.intersection(offered).count();
    if matched == 0 {
        return NO_TAG_MATCH_PENALTY;
    }
    let matches = count_as_f64(matched);
    let ratio = matches / count_as_f64(requested.len());
    matches * f64::from(weight) + ratio * 2.0
}

/// Usage-axis overlap using [`USAGE_TAG_WEIGHT`].
#[must_use]
pub fn score_usage(vehicle: &Vehicle, usage: Option<&UsagePreference>) -> f64 {
    usage.map_or(0.0, |usage| {
        score_tag_overlap(&vehicle.fit_tags, &usage.tags, USAGE_TAG_WEIGHT)
    })
}

/// Extras-axis overlap using [`EXTRAS_TAG_WEIGHT`].
#[must_use]
pub fn score_extras(vehicle: &Vehicle, extras: Option<&ExtrasPreference>) -> f64 {
    extras.map_or(0.0, |extras| {
        score_tag_overlap(&vehicle.extras_tags, &extras.tags, EXTRAS_TAG_WEIGHT)
    })
}

// Tag sets come from closed vocabularies of a handful of members.
fn count_as_f64(count: usize) -> f64 {
    u32::try_from(count).map_or(f64::from(u32::MAX), f64::from)
}
