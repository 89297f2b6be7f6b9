//! Descriptor lookups and their results.
//!
//! A [`VehicleDescriptor`] names a car the caller wants placed in the full
//! ranking even when it is not on the shortlist. The outcome is a
//! [`RankingResult`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ScoredVehicle;

/// Earliest model year accepted in a descriptor.
pub const MIN_MODEL_YEAR: u16 = 1900;
/// Latest model year accepted in a descriptor.
pub const MAX_MODEL_YEAR: u16 = 2100;

/// Errors raised while validating a [`VehicleDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The make was missing or blank.
    #[error("vehicle descriptor requires a make")]
    MissingMake,
    /// The model was missing or blank.
    #[error("vehicle descriptor requires a model")]
    MissingModel,
    /// The year could not be parsed as an integer.
    #[error("vehicle descriptor year '{raw}' is not a number")]
    NonNumericYear {
        /// Input as supplied.
        raw: String,
    },
    /// The year parsed but is not a plausible model year.
    #[error("vehicle descriptor year {year} is outside 1900-2100")]
    YearOutOfRange {
        /// Parsed year.
        year: i64,
    },
}

/// A caller-supplied `{make, model, year?}` to locate in the catalog.
///
/// # Examples
/// ```
/// use firstcar_core::VehicleDescriptor;
///
/// # fn main() -> Result<(), firstcar_core::DescriptorError> {
/// let descriptor = VehicleDescriptor::parse("Subaru", "Impreza", Some("2021"))?;
/// assert_eq!(descriptor.year(), Some(2021));
/// assert!(VehicleDescriptor::parse("", "Impreza", None).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDescriptor")]
pub struct VehicleDescriptor {
    make: String,
    model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    year: Option<u16>,
}

#[derive(Deserialize)]
struct RawDescriptor {
    #[serde(default)]
    make: String,
    #[serde(default)]
    model: String,
    #[serde(default)]
    year: Option<u16>,
}

impl TryFrom<RawDescriptor> for VehicleDescriptor {
    type Error = DescriptorError;

    fn try_from(raw: RawDescriptor) -> Result<Self, Self::Error> {
        Self::new(raw.make, raw.model, raw.year)
    }
}

impl VehicleDescriptor {
    /// Validate and construct a descriptor.
    ///
    /// # Errors
    /// Returns [`DescriptorError`] when make or model is blank or the year is
    /// outside the accepted range.
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        year: Option<u16>,
    ) -> Result<Self, DescriptorError> {
        let make = make.into().trim().to_owned();
        let model = model.into().trim().to_owned();
        if make.is_empty() {
            return Err(DescriptorError::MissingMake);
        }
        if model.is_empty() {
            return Err(DescriptorError::MissingModel);
        }
        if let Some(value) = year
            && !(MIN_MODEL_YEAR..=MAX_MODEL_YEAR).contains(&value)
        {
            return Err(DescriptorError::YearOutOfRange {
                year: i64::from(value),
            });
        }
        Ok(Self { make, model, year })
    }

    /// Validate a descriptor whose year arrives as text.
    ///
    /// Blank year text is treated as "no year".
    ///
    /// # Errors
    /// Returns [`DescriptorError::NonNumericYear`] when the year is not an
    /// integer, plus every error [`VehicleDescriptor::new`] can return.
    pub fn parse(make: &str, model: &str, year: Option<&str>) -> Result<Self, DescriptorError> {
        let parsed = match year.map(str::trim).filter(|raw| !raw.is_empty()) {
            None => None,
            Some(raw) => {
                let value: i64 = raw.parse().map_err(|_| DescriptorError::NonNumericYear {
                    raw: raw.to_owned(),
                })?;
                let year = u16::try_from(value)
                    .map_err(|_| DescriptorError::YearOutOfRange { year: value })?;
                Some(year)
            }
        };
        Self::new(make, model, parsed)
    }

    /// Requested make.
    #[must_use]
    pub fn make(&self) -> &str {
        &self.make
    }

    /// Requested model.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Requested model year, if any.
    #[must_use]
    pub const fn year(&self) -> Option<u16> {
        self.year
    }
}

/// Where a described vehicle falls in the full ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResult {
    /// The matched catalog row with its score, or `None` when not found.
    pub matched: Option<ScoredVehicle>,
    /// One-based position of `matched` in the full ranking.
    pub rank: Option<usize>,
    /// Number of vehicles ranked.
    pub total_compared: usize,
    /// Top of the same ranking, independent of `matched`.
    pub leaderboard: Vec<ScoredVehicle>,
    /// `Some(false)` when the requested year is not covered by the matched
    /// row, `Some(true)` when it is, `None` when no year was requested or
    /// nothing matched. A `None` here alone does not mean "not found"; check
    /// [`RankingResult::is_found`].
    pub year_exact: Option<bool>,
    /// Model years covered by the matched row.
    pub available_years: BTreeSet<u16>,
    /// Year the caller asked for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_year: Option<u16>,
}

impl RankingResult {
    /// Result for a descriptor that matched no catalog row.
    #[must_use]
    pub fn not_found(
        total_compared: usize,
        leaderboard: Vec<ScoredVehicle>,
        requested_year: Option<u16>,
    ) -> Self {
        Self {
            matched: None,
            rank: None,
            total_compared,
            leaderboard,
            year_exact: None,
            available_years: BTreeSet::new(),
            requested_year,
        }
    }

    /// Report whether a catalog row was matched.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.matched.is_some()
    }
}
