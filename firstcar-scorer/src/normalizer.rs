//! Preference normalization.
//!
//! [`normalize`] turns raw quiz answers into a [`PreferenceProfile`] for
//! scoring and a [`PreferenceContext`] of prose summaries for the text
//! generator. It never fails: unknown questions and values omit the axis and
//! are reported as [`AnswerIssue`]s instead.

use std::{collections::BTreeSet, fmt};

use firstcar_core::{BudgetPreference, PreferenceProfile, Priority};
use serde::{Deserialize, Serialize};

use crate::{
    RawAnswer,
    answers::AnswerPriority,
    tables::{
        self, BUDGET_QUESTION, EXTRAS_QUESTION, NOTES_QUESTION, SAFETY_QUESTION, TECH_QUESTION,
        TIMELINE_QUESTION, USAGE_QUESTION,
    },
};

/// Human-readable summary of the answers, one entry per axis.
///
/// Used only to build prompt text; never consulted when scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceContext {
    /// Budget band summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    /// Safety expectation summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety: Option<String>,
    /// Usage pattern summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,
    /// Extras summaries joined in answer order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<String>,
    /// Technology preference summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech: Option<String>,
    /// Purchase timeline summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    /// Free-text notes, copied verbatim.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl PreferenceContext {
    /// Report whether no summary was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A problem found in an answer that did not stop normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AnswerIssue {
    /// The question identifier is not known.
    #[serde(rename_all = "camelCase")]
    UnrecognizedQuestion {
        /// Identifier as submitted.
        question_id: String,
    },
    /// The question is known but a selected value is not in its table.
    #[serde(rename_all = "camelCase")]
    UnrecognizedValue {
        /// Identifier of the question.
        question_id: String,
        /// Value as submitted.
        value: String,
    },
    /// The priority was outside `1..=5` and has been clamped.
    #[serde(rename_all = "camelCase")]
    PriorityOutOfRange {
        /// Identifier of the question.
        question_id: String,
        /// Priority as submitted.
        raw: i64,
    },
    /// The priority was not an integer and the default was used.
    #[serde(rename_all = "camelCase")]
    MalformedPriority {
        /// Identifier of the question.
        question_id: String,
        /// Priority as submitted, in JSON form.
        raw: String,
    },
}

impl fmt::Display for AnswerIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedQuestion { question_id } => {
                write!(f, "ignoring unrecognized question '{question_id}'")
            }
            Self::UnrecognizedValue { question_id, value } => {
                write!(f, "question '{question_id}' has unrecognized value '{value}'")
            }
            Self::PriorityOutOfRange { question_id, raw } => write!(
                f,
                "question '{question_id}' priority {raw} clamped into 1..=5"
            ),
            Self::MalformedPriority { question_id, raw } => write!(
                f,
                "question '{question_id}' priority {raw} is not a number; using the default"
            ),
        }
    }
}

/// Output of [`normalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPreferences {
    /// Typed scoring input.
    pub profile: PreferenceProfile,
    /// Prose summaries for the text generator.
    pub context: PreferenceContext,
    /// Diagnostics for answers that were ignored or adjusted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<AnswerIssue>,
}

/// Convert raw answers into a preference profile and context.
///
/// Question identifiers and values are matched case-insensitively after
/// trimming. When a question is answered more than once the later answer
/// wins, even when it is blank or unrecognized and so clears the axis. Only `extras` accepts several values; other questions read the first
/// selected value.
///
/// # Examples
/// ```
/// use firstcar_core::SafetyLevel;
/// use firstcar_scorer::{RawAnswer, normalize};
///
/// let normalized = normalize(&[
///     RawAnswer::single("safety", "max").with_priority(5),
///     RawAnswer::single("favourite-colour", "teal"),
/// ]);
/// let safety = normalized.profile.safety.expect("safety axis");
/// assert_eq!(safety.level, SafetyLevel::Max);
/// assert_eq!(safety.priority.get(), 5);
/// assert_eq!(normalized.issues.len(), 1);
/// ```
#[must_use]
pub fn normalize(answers: &[RawAnswer]) -> NormalizedPreferences {
    let mut normalizer = Normalizer::default();
    for answer in answers {
        normalizer.apply(answer);
    }
    normalizer.finish()
}

#[derive(Default)]
struct Normalizer {
    out: NormalizedPreferences,
}

impl Normalizer {
    fn apply(&mut self, answer: &RawAnswer) {
        let question = tables::lookup_key(&answer.question_id);
        match question.as_str() {
            BUDGET_QUESTION => self.apply_budget(answer),
            SAFETY_QUESTION => self.apply_safety(answer),
            USAGE_QUESTION => self.apply_usage(answer),
            EXTRAS_QUESTION => self.apply_extras(answer),
            TECH_QUESTION => {
                self.out.context.tech = self.context_only(answer, tables::tech_summary);
            }
            TIMELINE_QUESTION => {
                self.out.context.timeline = self.context_only(answer, tables::timeline_summary);
            }
            NOTES_QUESTION => self.apply_notes(answer),
            _ => self.issue(AnswerIssue::UnrecognizedQuestion {
                question_id: answer.question_id.clone(),
            }),
        }
    }

    fn finish(self) -> NormalizedPreferences {
        let profile = &self.out.profile;
        for (axis, present) in [
            (BUDGET_QUESTION, profile.budget.is_some()),
            (SAFETY_QUESTION, profile.safety.is_some()),
            (USAGE_QUESTION, profile.usage.is_some()),
            (EXTRAS_QUESTION, profile.extras.is_some()),
        ] {
            if !present {
                log::debug!("preference axis '{axis}' omitted from profile");
            }
        }
        self.out
    }

    fn issue(&mut self, issue: AnswerIssue) {
        log::warn!("{issue}");
        self.out.issues.push(issue);
    }

    fn priority(&mut self, answer: &RawAnswer) -> Priority {
        let raw = match &answer.priority {
            None => return Priority::DEFAULT,
            Some(AnswerPriority::Level(raw)) => *raw,
            Some(AnswerPriority::Malformed(value)) => {
                if let Some(raw) = AnswerPriority::lenient_level(value) {
                    raw
                } else {
                    self.issue(AnswerIssue::MalformedPriority {
                        question_id: answer.question_id.clone(),
                        raw: value.to_string(),
                    });
                    return Priority::DEFAULT;
                }
            }
        };
        let clamped = Priority::clamped(raw);
        if i64::from(clamped.get()) != raw {
            self.issue(AnswerIssue::PriorityOutOfRange {
                question_id: answer.question_id.clone(),
                raw,
            });
        }
        clamped
    }

    /// First selected value as a lookup key, or `None` when nothing was
    /// selected.
    fn first_key(answer: &RawAnswer) -> Option<String> {
        answer
            .selected_values
            .first()
            .map(|value| tables::lookup_key(value))
            .filter(|key| !key.is_empty())
    }

    fn unrecognized(&mut self, answer: &RawAnswer, value: &str) {
        self.issue(AnswerIssue::UnrecognizedValue {
            question_id: answer.question_id.clone(),
            value: value.to_owned(),
        });
    }

    fn apply_budget(&mut self, answer: &RawAnswer) {
        self.out.profile.budget = None;
        self.out.context.budget = None;
        let Some(key) = Self::first_key(answer) else {
            return;
        };
        let Some(band) = tables::budget_band(&key) else {
            self.unrecognized(answer, &key);
            return;
        };
        let priority = self.priority(answer);
        self.out.profile.budget = Some(BudgetPreference {
            min: band.min,
            max: band.max,
            priority,
        });
        self.out.context.budget = Some(band.summary.to_owned());
    }

    fn apply_safety(&mut self, answer: &RawAnswer) {
        self.out.profile.safety = None;
        self.out.context.safety = None;
        let Some(key) = Self::first_key(answer) else {
            return;
        };
        let Some((level, summary)) = tables::safety_level(&key) else {
            self.unrecognized(answer, &key);
            return;
        };
        let priority = self.priority(answer);
        self.out.profile = std::mem::take(&mut self.out.profile).with_safety(level, priority);
        self.out.context.safety = Some(summary.to_owned());
    }

    fn apply_usage(&mut self, answer: &RawAnswer) {
        self.out.profile.usage = None;
        self.out.context.usage = None;
        let Some(key) = Self::first_key(answer) else {
            return;
        };
        let Some((tags, summary)) = tables::usage_tags(&key) else {
            self.unrecognized(answer, &key);
            return;
        };
        let priority = self.priority(answer);
        self.out.profile =
            std::mem::take(&mut self.out.profile).with_usage(tags.iter().copied(), priority);
        self.out.context.usage = Some(summary.to_owned());
    }

    fn apply_extras(&mut self, answer: &RawAnswer) {
        self.out.profile.extras = None;
        self.out.context.extras = None;
        let mut tags = BTreeSet::new();
        let mut summaries = Vec::new();
        for value in &answer.selected_values {
            let key = tables::lookup_key(value);
            if key.is_empty() {
                continue;
            }
            match tables::extras_tag(&key) {
                Some((tag, summary)) => {
                    if tags.insert(tag) {
                        summaries.push(summary);
                    }
                }
                None => self.unrecognized(answer, &key),
            }
        }
        if tags.is_empty() {
            return;
        }
        let priority = self.priority(answer);
        self.out.profile = std::mem::take(&mut self.out.profile).with_extras(tags, priority);
        self.out.context.extras = Some(summaries.join(", "));
    }

    fn context_only(
        &mut self,
        answer: &RawAnswer,
        table: fn(&str) -> Option<&'static str>,
    ) -> Option<String> {
        let key = Self::first_key(answer)?;
        let summary = table(&key);
        if summary.is_none() {
            self.unrecognized(answer, &key);
        }
        summary.map(str::to_owned)
    }

    fn apply_notes(&mut self, answer: &RawAnswer) {
        self.out.context.notes.clear();
        let Some(text) = answer.text_value() else {
            return;
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        self.out.context.notes = vec![trimmed.to_owned()];
    }
}
