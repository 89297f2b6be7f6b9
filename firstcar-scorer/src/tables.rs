//! Fixed answer-value lookup tables.
//!
//! Each table maps a lower-cased answer key to its typed meaning and the
//! prose fragment handed to the text generator.

use firstcar_core::{ExtrasTag, SafetyLevel, UsageTag};

pub(crate) const BUDGET_QUESTION: &str = "budget";
pub(crate) const SAFETY_QUESTION: &str = "safety";
pub(crate) const USAGE_QUESTION: &str = "usage";
pub(crate) const EXTRAS_QUESTION: &str = "extras";
pub(crate) const TECH_QUESTION: &str = "tech";
pub(crate) const TIMELINE_QUESTION: &str = "timeline";
pub(crate) const NOTES_QUESTION: &str = "notes";

/// Soft price bounds selected by a budget answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BudgetBand {
    pub(crate) min: Option<u32>,
    pub(crate) max: Option<u32>,
    pub(crate) summary: &'static str,
}

pub(crate) fn budget_band(key: &str) -> Option<BudgetBand> {
    let (min, max, summary) = match key {
        "under-15k" => (None, Some(15_000), "Under $15,000"),
        "15k-20k" => (Some(15_000), Some(20_000), "$15,000 to $20,000"),
        "20k-25k" => (Some(20_000), Some(25_000), "$20,000 to $25,000"),
        "25k-30k" => (Some(25_000), Some(30_000), "$25,000 to $30,000"),
        "30k-plus" => (Some(30_000), None, "$30,000 or more"),
        _ => return None,
    };
    Some(BudgetBand { min, max, summary })
}

pub(crate) fn safety_level(key: &str) -> Option<(SafetyLevel, &'static str)> {
    match key {
        "baseline" => Some((
            SafetyLevel::Baseline,
            "Solid crash-test ratings are enough",
        )),
        "advanced" => Some((
            SafetyLevel::Advanced,
            "Wants award-winning safety and modern driver aids",
        )),
        "max" => Some((
            SafetyLevel::Max,
            "Only the safest cars on the market",
        )),
        _ => None,
    }
}

pub(crate) fn usage_tags(key: &str) -> Option<(&'static [UsageTag], &'static str)> {
    match key {
        "school-commute" => Some((
            &[UsageTag::DailyCommute],
            "Mostly school runs and short daily trips",
        )),
        "family-errands" => Some((
            &[UsageTag::SharedFamily, UsageTag::DailyCommute],
            "Shared with the family for errands",
        )),
        "weekend-trips" => Some((
            &[UsageTag::WeekendAdventure],
            "Weekend trips and outdoor outings",
        )),
        "highway-miles" => Some((
            &[UsageTag::HighwayMiles, UsageTag::DailyCommute],
            "Regular highway driving",
        )),
        "green-driving" => Some((
            &[UsageTag::EcoConscious, UsageTag::DailyCommute],
            "Low running costs and emissions",
        )),
        _ => None,
    }
}

pub(crate) fn extras_tag(key: &str) -> Option<(ExtrasTag, &'static str)> {
    let summary = match key {
        "american-made" => "Built in America",
        "bright-color" => "Comes in a bright, visible colour",
        "eco-conscious" => "Efficient or electrified",
        "higher-seating" => "Higher seating position",
        "sporty-look" => "Sporty styling",
        "tech-forward" => "Up-to-date infotainment",
        _ => return None,
    };
    key.parse().ok().map(|tag| (tag, summary))
}

pub(crate) fn tech_summary(key: &str) -> Option<&'static str> {
    match key {
        "essentials" => Some("Just the essentials"),
        "connected" => Some("Phone integration and connectivity"),
        "driver-assist" => Some("Driver-assist technology"),
        _ => None,
    }
}

pub(crate) fn timeline_summary(key: &str) -> Option<&'static str> {
    match key {
        "asap" => Some("Buying as soon as possible"),
        "within-3-months" => Some("Buying within three months"),
        "within-6-months" => Some("Buying within six months"),
        "just-browsing" => Some("Just browsing for now"),
        _ => None,
    }
}

/// Canonical lookup key: trimmed and ASCII lower-cased.
pub(crate) fn lookup_key(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}
