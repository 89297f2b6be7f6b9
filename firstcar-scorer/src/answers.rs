//! Raw quiz answers as submitted by the client.

use serde::{Deserialize, Serialize};

/// Shape of an answer, as declared by the quiz definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerKind {
    /// One value expected in `selected_values`.
    Single,
    /// Any number of values in `selected_values`.
    Multi,
    /// Free text in `notes`.
    Text,
    /// A shape this version does not know about.
    #[serde(other)]
    Unknown,
}

/// Priority exactly as submitted.
///
/// Anything other than an integer is kept as [`AnswerPriority::Malformed`]
/// so one bad field never rejects the whole answer list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerPriority {
    /// Integer priority, not yet range checked.
    Level(i64),
    /// Any other JSON value.
    Malformed(serde_json::Value),
}

impl AnswerPriority {
    /// Integer spelled as a string, such as `"4"`.
    pub(crate) fn lenient_level(value: &serde_json::Value) -> Option<i64> {
        value.as_str().and_then(|text| text.trim().parse().ok())
    }
}

/// One loosely typed answer record.
///
/// Every field except `question_id` is optional on the wire so that partial or
/// older client payloads still decode.
///
/// # Examples
/// ```
/// use firstcar_scorer::RawAnswer;
///
/// let answer: RawAnswer = serde_json::from_str(
///     r#"{"questionId":"extras","type":"multi","selectedValues":["bright-color"]}"#,
/// )
/// .expect("valid answer");
/// assert_eq!(answer.selected_values, ["bright-color"]);
/// assert_eq!(answer.priority, None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnswer {
    /// Identifier of the question being answered.
    pub question_id: String,
    /// Importance of the axis; three when absent or malformed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<AnswerPriority>,
    /// Declared answer shape.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<AnswerKind>,
    /// Enumeration keys chosen by the parent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_values: Vec<String>,
    /// Free-text answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RawAnswer {
    /// Build a single-select answer.
    #[must_use]
    pub fn single(question_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            kind: Some(AnswerKind::Single),
            selected_values: vec![value.into()],
            ..Self::default()
        }
    }

    /// Build a multi-select answer.
    #[must_use]
    pub fn multi<I, S>(question_id: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question_id: question_id.into(),
            kind: Some(AnswerKind::Multi),
            selected_values: values.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Build a free-text answer.
    #[must_use]
    pub fn text(question_id: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            kind: Some(AnswerKind::Text),
            notes: Some(notes.into()),
            ..Self::default()
        }
    }

    /// Attach an explicit priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(AnswerPriority::Level(priority));
        self
    }

    /// Free text carried by the answer, falling back to the first selected
    /// value for clients that send notes as a selection.
    pub(crate) fn text_value(&self) -> Option<&str> {
        self.notes
            .as_deref()
            .or_else(|| self.selected_values.first().map(String::as_str))
    }
}
