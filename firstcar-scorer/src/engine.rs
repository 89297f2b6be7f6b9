//! Match scoring and catalog ranking.
//!
//! [`MatchScorer`] weights the raw axis scores by priority. The free
//! functions rank an in-memory catalog; [`RankingEngine`] wires them to an
//! injected [`CatalogStore`] and fetches a fresh snapshot per call.

use firstcar_core::{
    CatalogFilter, CatalogStore, PreferenceProfile, Priority, RankingResult, ScoreBreakdown,
    ScoredVehicle, Scorer, Vehicle, VehicleDescriptor,
};

use crate::{
    GeneratorSnapshot, NormalizedPreferences, RankingError,
    axes::{score_budget, score_extras, score_safety, score_usage},
};

/// Shortlist length used when the caller does not ask for one.
pub const DEFAULT_TOP_LIMIT: usize = 4;
/// Leaderboard length used when the caller does not ask for one.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 5;
/// Longest leaderboard ever returned.
pub const MAX_LEADERBOARD_SIZE: usize = 10;

/// Priority-weighted scorer combining the budget, safety, usage and extras
/// axes.
///
/// # Examples
/// ```
/// use firstcar_core::{PreferenceProfile, Priority, SafetyLevel, Scorer, Vehicle};
/// use firstcar_scorer::MatchScorer;
///
/// let car = Vehicle::builder("a", "Mazda", "3")
///     .years([2022])
///     .iihs_top_safety_pick(true)
///     .nhtsa_overall(5)
///     .build()
///     .unwrap();
/// let profile = PreferenceProfile::new().with_safety(SafetyLevel::Baseline, Priority::MAX);
/// assert_eq!(MatchScorer.score(&car, &profile).safety, 40.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchScorer;

#[expect(
    clippy::float_arithmetic,
    reason = "priority weighting is a linear multiplier"
)]
fn weighted(raw: f64, priority: Option<Priority>) -> f64 {
    priority.map_or(0.0, |priority| raw * f64::from(priority.get()))
}

impl Scorer for MatchScorer {
    fn score(&self, vehicle: &Vehicle, profile: &PreferenceProfile) -> ScoreBreakdown {
        ScoreBreakdown {
            budget: weighted(
                score_budget(vehicle, profile.budget.as_ref()),
                profile.budget.map(|budget| budget.priority),
            ),
            safety: weighted(
                score_safety(vehicle, profile.safety.as_ref()),
                profile.safety.map(|safety| safety.priority),
            ),
            usage: weighted(
                score_usage(vehicle, profile.usage.as_ref()),
                profile.usage.as_ref().map(|usage| usage.priority),
            ),
            extras: weighted(
                score_extras(vehicle, profile.extras.as_ref()),
                profile.extras.as_ref().map(|extras| extras.priority),
            ),
        }
    }
}

/// Engine tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingConfig {
    /// Shortlist length for [`RankingEngine::shortlist`].
    pub top_limit: usize,
    /// Leaderboard length when [`RankingEngine::rank_vehicle`] gets `None`.
    pub leaderboard_size: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top_limit: DEFAULT_TOP_LIMIT,
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
        }
    }
}

/// Score every vehicle and sort best first.
///
/// The sort is stable, so equal scores keep catalog order.
pub fn rank_catalog<S>(
    scorer: &S,
    profile: &PreferenceProfile,
    catalog: Vec<Vehicle>,
) -> Vec<ScoredVehicle>
where
    S: Scorer + ?Sized,
{
    let mut scored: Vec<ScoredVehicle> = catalog
        .into_iter()
        .map(|vehicle| scorer.score_vehicle(vehicle, profile))
        .collect();
    scored.sort_by(ScoredVehicle::cmp_by_score_desc);
    scored
}

/// Return at most `limit` of the best-scoring vehicles.
///
/// # Examples
/// ```
/// use firstcar_core::{PreferenceProfile, Vehicle};
/// use firstcar_scorer::{MatchScorer, top_vehicles};
///
/// let catalog: Vec<Vehicle> = ["a", "b", "c"]
///     .into_iter()
///     .map(|id| Vehicle::builder(id, "Kia", "Soul").years([2020]).build().unwrap())
///     .collect();
/// let top = top_vehicles(&MatchScorer, &PreferenceProfile::new(), catalog, 2);
/// let ids: Vec<_> = top.iter().map(|s| s.vehicle.id.as_str()).collect();
/// assert_eq!(ids, ["a", "b"]);
/// ```
pub fn top_vehicles<S>(
    scorer: &S,
    profile: &PreferenceProfile,
    catalog: Vec<Vehicle>,
    limit: usize,
) -> Vec<ScoredVehicle>
where
    S: Scorer + ?Sized,
{
    let mut ranked = rank_catalog(scorer, profile, catalog);
    ranked.truncate(limit);
    ranked
}

/// Find where `descriptor` lands in the full ranking of `catalog`.
///
/// `leaderboard_size` is clamped into `1..=MAX_LEADERBOARD_SIZE`. A missing
/// make and model is a normal outcome reported through
/// [`RankingResult::not_found`]. `year_exact` is also `None` for a found row
/// when the descriptor carries no year.
pub fn rank_vehicle_against_profile<S>(
    scorer: &S,
    profile: &PreferenceProfile,
    catalog: Vec<Vehicle>,
    descriptor: &VehicleDescriptor,
    leaderboard_size: usize,
) -> RankingResult
where
    S: Scorer + ?Sized,
{
    let ranked = rank_catalog(scorer, profile, catalog);
    let total_compared = ranked.len();
    let leaderboard: Vec<ScoredVehicle> = ranked
        .iter()
        .take(leaderboard_size.clamp(1, MAX_LEADERBOARD_SIZE))
        .cloned()
        .collect();

    let Some((position, year_exact)) = locate(&ranked, descriptor) else {
        log::info!(
            "{} {} not found among {total_compared} vehicles",
            descriptor.make(),
            descriptor.model()
        );
        return RankingResult::not_found(total_compared, leaderboard, descriptor.year());
    };
    let Some(matched) = ranked.into_iter().nth(position) else {
        return RankingResult::not_found(total_compared, leaderboard, descriptor.year());
    };
    if year_exact == Some(false) {
        log::info!(
            "no {} row covers {}; using {}",
            descriptor.model(),
            descriptor.year().unwrap_or_default(),
            matched.vehicle.label()
        );
    }

    RankingResult {
        available_years: matched.vehicle.years.clone(),
        matched: Some(matched),
        rank: Some(position + 1),
        total_compared,
        leaderboard,
        year_exact,
        requested_year: descriptor.year(),
    }
}

/// Position of the row best matching `descriptor`, with the year flag.
///
/// Prefers the best-ranked row covering the requested year, then the row
/// nearest to it (ties to the better rank). Without a year the best-ranked
/// make/model row wins and the flag is `None`.
fn locate(ranked: &[ScoredVehicle], descriptor: &VehicleDescriptor) -> Option<(usize, Option<bool>)> {
    let mut candidates = ranked
        .iter()
        .enumerate()
        .filter(|(_, scored)| scored.vehicle.is_named(descriptor.make(), descriptor.model()));

    let Some(year) = descriptor.year() else {
        return candidates.next().map(|(position, _)| (position, None));
    };

    let mut nearest: Option<(u16, usize)> = None;
    for (position, scored) in candidates {
        let distance = scored.vehicle.year_distance(year);
        if distance == 0 {
            return Some((position, Some(true)));
        }
        if nearest.is_none_or(|(best, _)| distance < best) {
            nearest = Some((distance, position));
        }
    }
    nearest.map(|(_, position)| (position, Some(false)))
}

/// Ranking service over an injected catalog.
///
/// The engine owns no cache: every call reads a fresh snapshot from the
/// store.
///
/// # Examples
/// ```
/// use firstcar_core::{MemoryCatalog, PreferenceProfile, Vehicle, VehicleDescriptor};
/// use firstcar_scorer::RankingEngine;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let catalog = MemoryCatalog::new([
///     Vehicle::builder("fit", "Honda", "Fit").years([2019]).build()?,
///     Vehicle::builder("civic", "Honda", "Civic").years([2022]).build()?,
/// ])?;
/// let engine = RankingEngine::new(catalog);
/// let descriptor = VehicleDescriptor::new("honda", "civic", None)?;
/// let result = engine.rank_vehicle(&PreferenceProfile::new(), &descriptor, None)?;
/// assert_eq!(result.rank, Some(2));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RankingEngine<S, C = MatchScorer> {
    store: S,
    scorer: C,
    config: RankingConfig,
}

impl<S: CatalogStore> RankingEngine<S> {
    /// Create an engine using [`MatchScorer`] and default tunables.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            scorer: MatchScorer,
            config: RankingConfig::default(),
        }
    }
}

impl<S: CatalogStore, C: Scorer> RankingEngine<S, C> {
    /// Replace the scorer.
    #[must_use]
    pub fn with_scorer<D: Scorer>(self, scorer: D) -> RankingEngine<S, D> {
        RankingEngine {
            store: self.store,
            scorer,
            config: self.config,
        }
    }

    /// Replace the tunables.
    #[must_use]
    pub fn with_config(mut self, config: RankingConfig) -> Self {
        self.config = config;
        self
    }

    /// Current tunables.
    #[must_use]
    pub const fn config(&self) -> &RankingConfig {
        &self.config
    }

    fn load_catalog(&self) -> Result<Vec<Vehicle>, RankingError> {
        let catalog = self
            .store
            .fetch_vehicles(&CatalogFilter::all())
            .map_err(RankingError::catalog)?;
        log::debug!("scoring {} catalog vehicles", catalog.len());
        Ok(catalog)
    }

    /// Score and sort the whole catalog.
    ///
    /// # Errors
    /// Returns [`RankingError::Catalog`] when the store cannot be read.
    pub fn rank_all(&self, profile: &PreferenceProfile) -> Result<Vec<ScoredVehicle>, RankingError> {
        Ok(rank_catalog(&self.scorer, profile, self.load_catalog()?))
    }

    /// Return at most `limit` of the best-scoring vehicles.
    ///
    /// # Errors
    /// Returns [`RankingError::Catalog`] when the store cannot be read.
    pub fn top_vehicles(
        &self,
        profile: &PreferenceProfile,
        limit: usize,
    ) -> Result<Vec<ScoredVehicle>, RankingError> {
        Ok(top_vehicles(
            &self.scorer,
            profile,
            self.load_catalog()?,
            limit,
        ))
    }

    /// Top vehicles using the configured shortlist length.
    ///
    /// # Errors
    /// Returns [`RankingError::Catalog`] when the store cannot be read.
    pub fn shortlist(&self, profile: &PreferenceProfile) -> Result<Vec<ScoredVehicle>, RankingError> {
        self.top_vehicles(profile, self.config.top_limit)
    }

    /// Place `descriptor` in the full ranking.
    ///
    /// `leaderboard_size` defaults to the configured size and is clamped into
    /// `1..=MAX_LEADERBOARD_SIZE`.
    ///
    /// A found row always carries `rank`. Its `year_exact` is `None` when the
    /// descriptor has no year, so test `matched` or `rank` for "not found",
    /// never `year_exact`.
    ///
    /// # Errors
    /// Returns [`RankingError::Catalog`] when the store cannot be read.
    pub fn rank_vehicle(
        &self,
        profile: &PreferenceProfile,
        descriptor: &VehicleDescriptor,
        leaderboard_size: Option<usize>,
    ) -> Result<RankingResult, RankingError> {
        Ok(rank_vehicle_against_profile(
            &self.scorer,
            profile,
            self.load_catalog()?,
            descriptor,
            leaderboard_size.unwrap_or(self.config.leaderboard_size),
        ))
    }

    /// Validate a textual descriptor, then rank it.
    ///
    /// # Errors
    /// Returns [`RankingError::Descriptor`] for a blank make or model or a
    /// bad year, and [`RankingError::Catalog`] when the store cannot be read.
    pub fn rank_described(
        &self,
        profile: &PreferenceProfile,
        make: &str,
        model: &str,
        year: Option<&str>,
        leaderboard_size: Option<usize>,
    ) -> Result<RankingResult, RankingError> {
        let descriptor = VehicleDescriptor::parse(make, model, year)?;
        self.rank_vehicle(profile, &descriptor, leaderboard_size)
    }

    /// Build the text-generator payload for the top `limit` vehicles.
    ///
    /// # Errors
    /// Returns [`RankingError::Catalog`] when the store cannot be read.
    pub fn generator_snapshot(
        &self,
        normalized: &NormalizedPreferences,
        limit: usize,
    ) -> Result<GeneratorSnapshot, RankingError> {
        let catalog = self.load_catalog()?;
        let catalog_size = catalog.len();
        let candidates = top_vehicles(&self.scorer, &normalized.profile, catalog, limit);
        Ok(GeneratorSnapshot::new(normalized, &candidates, catalog_size))
    }
}
