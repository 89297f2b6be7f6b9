//! Closed tag vocabularies used for tag-overlap scoring.
//!
//! Usage tags describe how a household expects to drive the car; extras tags
//! describe optional niceties. The two enumerations are kept
//! separate: `eco-conscious` exists in both, but a usage match never counts
//! as an extras match.
//!
//! # Examples
//! ```
//! use firstcar_core::{ExtrasTag, UsageTag};
//!
//! assert_eq!(UsageTag::DailyCommute.as_str(), "daily-commute");
//! assert_eq!(ExtrasTag::BrightColor.to_string(), "bright-color");
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing an unknown tag string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {vocabulary} tag '{value}'")]
pub struct UnknownTag {
    /// Name of the vocabulary that rejected the value.
    pub vocabulary: &'static str,
    /// Offending input.
    pub value: String,
}

/// How the car will be used day to day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UsageTag {
    /// School runs and short daily trips.
    DailyCommute,
    /// Car shared with parents or siblings.
    SharedFamily,
    /// Weekend trips, light trails and gear hauling.
    WeekendAdventure,
    /// Low running costs and emissions.
    EcoConscious,
    /// Regular motorway or interstate driving.
    HighwayMiles,
}

impl UsageTag {
    /// Every usage tag in declaration order.
    pub const ALL: [Self; 5] = [
        Self::DailyCommute,
        Self::SharedFamily,
        Self::WeekendAdventure,
        Self::EcoConscious,
        Self::HighwayMiles,
    ];

    /// Return the tag as its kebab-case wire name.
    ///
    /// # Examples
    /// ```
    /// use firstcar_core::UsageTag;
    ///
    /// assert_eq!(UsageTag::SharedFamily.as_str(), "shared-family");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DailyCommute => "daily-commute",
            Self::SharedFamily => "shared-family",
            Self::WeekendAdventure => "weekend-adventure",
            Self::EcoConscious => "eco-conscious",
            Self::HighwayMiles => "highway-miles",
        }
    }
}

impl fmt::Display for UsageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UsageTag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownTag {
                vocabulary: "usage",
                value: s.to_owned(),
            })
    }
}

/// Optional features a family would like the car to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtrasTag {
    /// Assembled in the United States.
    AmericanMade,
    /// Available in high-visibility paint.
    BrightColor,
    /// Hybrid, electric or otherwise frugal.
    EcoConscious,
    /// Raised seating position.
    HigherSeating,
    /// Sporty styling without a performance engine.
    SportyLook,
    /// Modern infotainment and phone integration.
    TechForward,
}

impl ExtrasTag {
    /// Every extras tag in declaration order.
    pub const ALL: [Self; 6] = [
        Self::AmericanMade,
        Self::BrightColor,
        Self::EcoConscious,
        Self::HigherSeating,
        Self::SportyLook,
        Self::TechForward,
    ];

    /// Return the tag as its kebab-case wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AmericanMade => "american-made",
            Self::BrightColor => "bright-color",
            Self::EcoConscious => "eco-conscious",
            Self::HigherSeating => "higher-seating",
            Self::SportyLook => "sporty-look",
            Self::TechForward => "tech-forward",
        }
    }
}

impl fmt::Display for ExtrasTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtrasTag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownTag {
                vocabulary: "extras",
                value: s.to_owned(),
            })
    }
}
