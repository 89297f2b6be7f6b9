//! Catalog vehicles.
//!
//! A [`Vehicle`] is one catalog row: a make/model/trim spanning one or more
//! model years. Rows are produced by the enrichment pipeline and are read-only
//! to the engine.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ExtrasTag, UsageTag};

/// Body styles present in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyStyle {
    /// Four-door saloon.
    Sedan,
    /// Two- or four-door hatchback.
    Hatchback,
    /// Compact or mid-size crossover.
    Suv,
    /// Small pickup.
    Truck,
    /// Minivan or people carrier.
    Minivan,
    /// Two-door coupe.
    Coupe,
    /// Estate car.
    Wagon,
}

/// Wheels driven by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Drivetrain {
    /// Front-wheel drive.
    #[serde(rename = "FWD")]
    Fwd,
    /// Rear-wheel drive.
    #[serde(rename = "RWD")]
    Rwd,
    /// All-wheel drive.
    #[serde(rename = "AWD")]
    Awd,
}

/// Descriptive fields passed through to consumers but never scored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VehicleDetails {
    /// Infotainment and driver-assist highlights.
    pub tech_highlights: Vec<String>,
    /// Reasons the car suits a new driver.
    pub teen_friendly_factors: Vec<String>,
    /// Servicing and reliability notes.
    pub maintenance_notes: Vec<String>,
    /// Combined fuel economy in miles per gallon.
    pub fuel_economy_mpg: Option<u16>,
    /// Hero image location.
    pub image_url: Option<String>,
    /// Where the data came from.
    pub sources: Vec<String>,
}

impl VehicleDetails {
    /// Report whether no descriptive enrichment has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A single scorable catalog row.
///
/// # Examples
/// ```
/// use firstcar_core::{BodyStyle, Drivetrain, Vehicle};
///
/// let civic = Vehicle::builder("honda-civic", "Honda", "Civic")
///     .years([2022, 2023])
///     .msrp(24_000, 29_000)
///     .body_style(BodyStyle::Sedan)
///     .drivetrain(Drivetrain::Fwd)
///     .build()
///     .expect("valid vehicle");
/// assert!(civic.covers_year(2023));
/// assert!(!civic.covers_year(2019));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Stable catalog identifier.
    pub id: String,
    /// Manufacturer, e.g. "Toyota".
    pub make: String,
    /// Model name, e.g. "Corolla".
    pub model: String,
    /// Optional trim level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim: Option<String>,
    /// Model years represented by this row.
    pub years: BTreeSet<u16>,
    /// Cheapest configuration, in dollars.
    pub msrp_min: u32,
    /// Most expensive configuration, in dollars.
    pub msrp_max: u32,
    /// Body style.
    pub body_style: BodyStyle,
    /// Driven wheels.
    pub drivetrain: Drivetrain,
    /// Whether the IIHS named the car a Top Safety Pick.
    #[serde(default)]
    pub safety_iihs_top_safety_pick: bool,
    /// NHTSA overall rating, 1 to 5 stars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_nhtsa_overall: Option<u8>,
    /// Notable safety equipment, most important first.
    #[serde(default)]
    pub safety_notable_features: Vec<String>,
    /// Usage profiles the car fits.
    #[serde(default)]
    pub fit_tags: BTreeSet<UsageTag>,
    /// Extras the car offers.
    #[serde(default)]
    pub extras_tags: BTreeSet<ExtrasTag>,
    /// Unscored descriptive data.
    #[serde(flatten)]
    pub details: VehicleDetails,
}

/// Errors returned by [`VehicleBuilder::build`] and [`Vehicle::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VehicleError {
    /// The identifier was blank.
    #[error("vehicle id must not be blank")]
    BlankId,
    /// Make or model was blank.
    #[error("vehicle {id} must have a make and a model")]
    MissingName {
        /// Identifier of the offending row.
        id: String,
    },
    /// No model years were supplied.
    #[error("vehicle {id} must cover at least one model year")]
    NoYears {
        /// Identifier of the offending row.
        id: String,
    },
    /// The MSRP range was inverted.
    #[error("vehicle {id} has msrpMin {min} above msrpMax {max}")]
    InvertedMsrp {
        /// Identifier of the offending row.
        id: String,
        /// Lower bound as supplied.
        min: u32,
        /// Upper bound as supplied.
        max: u32,
    },
    /// The NHTSA rating was outside one to five stars.
    #[error("vehicle {id} has NHTSA rating {rating}, expected 1-5")]
    InvalidNhtsaRating {
        /// Identifier of the offending row.
        id: String,
        /// Rating as supplied.
        rating: u8,
    },
}

impl Vehicle {
    /// Start building a vehicle with the mandatory identity fields.
    pub fn builder(
        id: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
    ) -> VehicleBuilder {
        VehicleBuilder::new(id.into(), make.into(), model.into())
    }

    /// Check the row invariants.
    ///
    /// # Errors
    /// Returns [`VehicleError`] when the id, make or model is blank, the year
    /// set is empty, the MSRP range is inverted or the NHTSA rating is not
    /// between one and five.
    pub fn validate(&self) -> Result<(), VehicleError> {
        if self.id.trim().is_empty() {
            return Err(VehicleError::BlankId);
        }
        if self.make.trim().is_empty() || self.model.trim().is_empty() {
            return Err(VehicleError::MissingName {
                id: self.id.clone(),
            });
        }
        if self.years.is_empty() {
            return Err(VehicleError::NoYears {
                id: self.id.clone(),
            });
        }
        if self.msrp_min > self.msrp_max {
            return Err(VehicleError::InvertedMsrp {
                id: self.id.clone(),
                min: self.msrp_min,
                max: self.msrp_max,
            });
        }
        if let Some(rating) = self.safety_nhtsa_overall
            && !(1..=5).contains(&rating)
        {
            return Err(VehicleError::InvalidNhtsaRating {
                id: self.id.clone(),
                rating,
            });
        }
        Ok(())
    }

    /// Report whether the row represents `year`.
    #[must_use]
    pub fn covers_year(&self, year: u16) -> bool {
        self.years.contains(&year)
    }

    /// Distance in years between `year` and the nearest year of this row.
    #[must_use]
    pub fn year_distance(&self, year: u16) -> u16 {
        self.years
            .iter()
            .map(|candidate| candidate.abs_diff(year))
            .min()
            .unwrap_or(u16::MAX)
    }

    /// Case-insensitive make and model comparison.
    #[must_use]
    pub fn is_named(&self, make: &str, model: &str) -> bool {
        self.make.trim().eq_ignore_ascii_case(make.trim())
            && self.model.trim().eq_ignore_ascii_case(model.trim())
    }

    /// Human-readable label such as "2021-2023 Toyota Corolla LE".
    #[must_use]
    pub fn label(&self) -> String {
        let years = match (self.years.first(), self.years.last()) {
            (Some(first), Some(last)) if first == last => format!("{first} "),
            (Some(first), Some(last)) => format!("{first}-{last} "),
            _ => String::new(),
        };
        let trim = self
            .trim
            .as_deref()
            .map(|trim| format!(" {trim}"))
            .unwrap_or_default();
        format!("{years}{} {}{trim}", self.make, self.model)
    }
}

/// Incremental constructor for [`Vehicle`].
#[derive(Debug, Clone)]
#[must_use]
pub struct VehicleBuilder {
    vehicle: Vehicle,
}

impl VehicleBuilder {
    fn new(id: String, make: String, model: String) -> Self {
        Self {
            vehicle: Vehicle {
                id,
                make,
                model,
                trim: None,
                years: BTreeSet::new(),
                msrp_min: 0,
                msrp_max: 0,
                body_style: BodyStyle::Sedan,
                drivetrain: Drivetrain::Fwd,
                safety_iihs_top_safety_pick: false,
                safety_nhtsa_overall: None,
                safety_notable_features: Vec::new(),
                fit_tags: BTreeSet::new(),
                extras_tags: BTreeSet::new(),
                details: VehicleDetails::default(),
            },
        }
    }

    /// Set the trim level.
    pub fn trim(mut self, trim: impl Into<String>) -> Self {
        self.vehicle.trim = Some(trim.into());
        self
    }

    /// Add model years.
    pub fn years(mut self, years: impl IntoIterator<Item = u16>) -> Self {
        self.vehicle.years.extend(years);
        self
    }

    /// Set the MSRP range in dollars.
    pub fn msrp(mut self, min: u32, max: u32) -> Self {
        self.vehicle.msrp_min = min;
        self.vehicle.msrp_max = max;
        self
    }

    /// Set the body style.
    pub fn body_style(mut self, body_style: BodyStyle) -> Self {
        self.vehicle.body_style = body_style;
        self
    }

    /// Set the drivetrain.
    pub fn drivetrain(mut self, drivetrain: Drivetrain) -> Self {
        self.vehicle.drivetrain = drivetrain;
        self
    }

    /// Mark the car as an IIHS Top Safety Pick.
    pub fn iihs_top_safety_pick(mut self, pick: bool) -> Self {
        self.vehicle.safety_iihs_top_safety_pick = pick;
        self
    }

    /// Set the NHTSA overall star rating.
    pub fn nhtsa_overall(mut self, stars: u8) -> Self {
        self.vehicle.safety_nhtsa_overall = Some(stars);
        self
    }

    /// Append notable safety features.
    pub fn safety_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vehicle
            .safety_notable_features
            .extend(features.into_iter().map(Into::into));
        self
    }

    /// Add usage fit tags.
    pub fn fit_tags(mut self, tags: impl IntoIterator<Item = UsageTag>) -> Self {
        self.vehicle.fit_tags.extend(tags);
        self
    }

    /// Add extras tags.
    pub fn extras_tags(mut self, tags: impl IntoIterator<Item = ExtrasTag>) -> Self {
        self.vehicle.extras_tags.extend(tags);
        self
    }

    /// Attach descriptive details.
    pub fn details(mut self, details: VehicleDetails) -> Self {
        self.vehicle.details = details;
        self
    }

    /// Validate and return the vehicle.
    ///
    /// # Errors
    /// Propagates [`Vehicle::validate`] failures.
    pub fn build(self) -> Result<Vehicle, VehicleError> {
        self.vehicle.validate()?;
        Ok(self.vehicle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn corolla() -> VehicleBuilder {
        Vehicle::builder("toyota-corolla", "Toyota", "Corolla")
            .years([2020, 2021, 2022])
            .msrp(21_000, 27_000)
    }

    #[rstest]
    fn builder_accepts_valid_row(corolla: VehicleBuilder) {
        let vehicle = corolla.build().expect("valid row");
        assert_eq!(vehicle.label(), "2020-2022 Toyota Corolla");
    }

    #[rstest]
    fn rejects_empty_years() {
        let err = Vehicle::builder("x", "Kia", "Soul")
            .msrp(1, 2)
            .build()
            .unwrap_err();
        assert!(matches!(err, VehicleError::NoYears { .. }));
    }

    #[rstest]
    fn rejects_inverted_msrp(corolla: VehicleBuilder) {
        let err = corolla.msrp(30_000, 20_000).build().unwrap_err();
        assert!(matches!(
            err,
            VehicleError::InvertedMsrp {
                min: 30_000,
                max: 20_000,
                ..
            }
        ));
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    fn rejects_out_of_range_nhtsa(corolla: VehicleBuilder, #[case] stars: u8) {
        let err = corolla.nhtsa_overall(stars).build().unwrap_err();
        assert!(matches!(err, VehicleError::InvalidNhtsaRating { .. }));
    }

    #[rstest]
    fn name_matching_ignores_case_and_padding(corolla: VehicleBuilder) {
        let vehicle = corolla.build().expect("valid row");
        assert!(vehicle.is_named(" toyota", "COROLLA "));
        assert!(!vehicle.is_named("Toyota", "Camry"));
    }

    #[rstest]
    #[case(2021, 0)]
    #[case(2018, 2)]
    #[case(2025, 3)]
    fn year_distance_uses_nearest_year(
        corolla: VehicleBuilder,
        #[case] year: u16,
        #[case] expected: u16,
    ) {
        let vehicle = corolla.build().expect("valid row");
        assert_eq!(vehicle.year_distance(year), expected);
    }

    #[rstest]
    fn json_round_trip_uses_camel_case(corolla: VehicleBuilder) {
        let vehicle = corolla
            .iihs_top_safety_pick(true)
            .fit_tags([UsageTag::DailyCommute])
            .build()
            .expect("valid row");
        let json = serde_json::to_value(&vehicle).expect("serialise");
        assert_eq!(json["msrpMax"], 27_000);
        assert_eq!(json["safetyIihsTopSafetyPick"], true);
        assert_eq!(json["fitTags"][0], "daily-commute");
    }
}
