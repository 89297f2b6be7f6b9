//! Preference profiles: the parsed intent of a parent's quiz answers.
//!
//! Each of the four scoring axes is optional. An absent axis contributes
//! nothing to a vehicle's score and is never penalised. A present axis always
//! carries a [`Priority`] between one and five.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{ExtrasTag, UsageTag};

/// Parent-declared importance of an axis, in `1..=5`.
///
/// # Examples
/// ```
/// use firstcar_core::Priority;
///
/// assert_eq!(Priority::default().get(), 3);
/// assert_eq!(Priority::clamped(9).get(), 5);
/// assert!(Priority::new(0).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// Lowest importance.
    pub const MIN: Self = Self(1);
    /// Highest importance.
    pub const MAX: Self = Self(5);
    /// Importance assumed when none was given.
    pub const DEFAULT: Self = Self(3);

    /// Build a priority, returning `None` outside `1..=5`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN.0 && value <= Self::MAX.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Build a priority, clamping any integer into `1..=5`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let bounded = value.clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0));
        u8::try_from(bounded).map_or(Self::DEFAULT, Self)
    }

    /// Return the raw weight.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("priority {value} is outside 1..=5"))
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

/// Price expectations. Both bounds are soft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPreference {
    /// Soft floor in dollars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    /// Soft ceiling in dollars; `None` means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    /// Axis importance.
    #[serde(default)]
    pub priority: Priority,
}

/// Ordinal safety expectation: `Baseline < Advanced < Max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SafetyLevel {
    /// Solid crash ratings are enough.
    Baseline,
    /// Expect recognised awards and modern driver aids.
    Advanced,
    /// Only the safest cars on the market.
    Max,
}

impl SafetyLevel {
    /// Return the level as its wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Advanced => "advanced",
            Self::Max => "max",
        }
    }
}

/// Safety expectations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyPreference {
    /// Requested tier.
    pub level: SafetyLevel,
    /// Axis importance.
    #[serde(default)]
    pub priority: Priority,
}

/// How the car will be driven.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsagePreference {
    /// Requested usage tags.
    pub tags: BTreeSet<UsageTag>,
    /// Axis importance.
    #[serde(default)]
    pub priority: Priority,
}

/// Optional niceties.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtrasPreference {
    /// Requested extras tags.
    pub tags: BTreeSet<ExtrasTag>,
    /// Axis importance.
    #[serde(default)]
    pub priority: Priority,
}

/// Canonical, immutable parent preferences for one request.
///
/// # Examples
/// ```
/// use firstcar_core::{BudgetPreference, PreferenceProfile, Priority, SafetyLevel};
///
/// let profile = PreferenceProfile::new()
///     .with_budget(BudgetPreference { min: None, max: Some(20_000), priority: Priority::MAX })
///     .with_safety(SafetyLevel::Max, Priority::DEFAULT);
/// assert_eq!(profile.axis_count(), 2);
/// assert!(profile.usage.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceProfile {
    /// Price axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<BudgetPreference>,
    /// Safety axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety: Option<SafetyPreference>,
    /// Usage fit axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsagePreference>,
    /// Extras axis.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<ExtrasPreference>,
}

impl PreferenceProfile {
    /// Construct a profile with no axes set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the budget axis.
    #[must_use]
    pub fn with_budget(mut self, budget: BudgetPreference) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Set the safety axis.
    #[must_use]
    pub fn with_safety(mut self, level: SafetyLevel, priority: Priority) -> Self {
        self.safety = Some(SafetyPreference { level, priority });
        self
    }

    /// Set the usage axis.
    #[must_use]
    pub fn with_usage(mut self, tags: impl IntoIterator<Item = UsageTag>, priority: Priority) -> Self {
        self.usage = Some(UsagePreference {
            tags: tags.into_iter().collect(),
            priority,
        });
        self
    }

    /// Set the extras axis.
    #[must_use]
    pub fn with_extras(
        mut self,
        tags: impl IntoIterator<Item = ExtrasTag>,
        priority: Priority,
    ) -> Self {
        self.extras = Some(ExtrasPreference {
            tags: tags.into_iter().collect(),
            priority,
        });
        self
    }

    /// Number of axes present.
    #[must_use]
    pub fn axis_count(&self) -> usize {
        [
            self.budget.is_some(),
            self.safety.is_some(),
            self.usage.is_some(),
            self.extras.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// Report whether no axis is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axis_count() == 0
    }
}
