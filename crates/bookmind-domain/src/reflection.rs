//! The nine free-text answers of a mental model.
//!
//! Three fixed questions, three answers each:
//! 1. why did you decide to read this book,
//! 2. what do you expect to gain from it,
//! 3. where do you want to be after reading it.
//!
//! Only the first answer to the first question is required. Every other
//! answer is always present but may be an empty string.

use serde::{Deserialize, Serialize};

/// Complete answer set as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answers {
    pub why_read_answer_1: String,
    pub why_read_answer_2: String,
    pub why_read_answer_3: String,
    pub what_to_gain_answer_1: String,
    pub what_to_gain_answer_2: String,
    pub what_to_gain_answer_3: String,
    pub goal_after_reading_answer_1: String,
    pub goal_after_reading_answer_2: String,
    pub goal_after_reading_answer_3: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("whyReadAnswer1 is required")]
pub struct MissingRequiredAnswer;

impl Answers {
    /// Build an answer set from the required first answer; all others empty.
    pub fn new(why_read_answer_1: impl Into<String>) -> Self {
        Self {
            why_read_answer_1: why_read_answer_1.into(),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), MissingRequiredAnswer> {
        if self.why_read_answer_1.trim().is_empty() {
            return Err(MissingRequiredAnswer);
        }
        Ok(())
    }

    /// Merge a partial update; fields absent from the patch keep their value.
    pub fn apply(&mut self, patch: &AnswersPatch) {
        let pairs: [(&mut String, &Option<String>); 9] = [
            (&mut self.why_read_answer_1, &patch.why_read_answer_1),
            (&mut self.why_read_answer_2, &patch.why_read_answer_2),
            (&mut self.why_read_answer_3, &patch.why_read_answer_3),
            (&mut self.what_to_gain_answer_1, &patch.what_to_gain_answer_1),
            (&mut self.what_to_gain_answer_2, &patch.what_to_gain_answer_2),
            (&mut self.what_to_gain_answer_3, &patch.what_to_gain_answer_3),
            (
                &mut self.goal_after_reading_answer_1,
                &patch.goal_after_reading_answer_1,
            ),
            (
                &mut self.goal_after_reading_answer_2,
                &patch.goal_after_reading_answer_2,
            ),
            (
                &mut self.goal_after_reading_answer_3,
                &patch.goal_after_reading_answer_3,
            ),
        ];
        for (field, value) in pairs {
            if let Some(value) = value {
                field.clone_from(value);
            }
        }
    }

    /// Fields of `other` that differ from `self`, as a patch.
    pub fn diff(&self, other: &Answers) -> AnswersPatch {
        fn changed(before: &str, after: &str) -> Option<String> {
            (before != after).then(|| after.to_owned())
        }
        AnswersPatch {
            why_read_answer_1: changed(&self.why_read_answer_1, &other.why_read_answer_1),
            why_read_answer_2: changed(&self.why_read_answer_2, &other.why_read_answer_2),
            why_read_answer_3: changed(&self.why_read_answer_3, &other.why_read_answer_3),
            what_to_gain_answer_1: changed(
                &self.what_to_gain_answer_1,
                &other.what_to_gain_answer_1,
            ),
            what_to_gain_answer_2: changed(
                &self.what_to_gain_answer_2,
                &other.what_to_gain_answer_2,
            ),
            what_to_gain_answer_3: changed(
                &self.what_to_gain_answer_3,
                &other.what_to_gain_answer_3,
            ),
            goal_after_reading_answer_1: changed(
                &self.goal_after_reading_answer_1,
                &other.goal_after_reading_answer_1,
            ),
            goal_after_reading_answer_2: changed(
                &self.goal_after_reading_answer_2,
                &other.goal_after_reading_answer_2,
            ),
            goal_after_reading_answer_3: changed(
                &self.goal_after_reading_answer_3,
                &other.goal_after_reading_answer_3,
            ),
        }
    }
}

/// Partial answer update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswersPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_read_answer_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_read_answer_2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_read_answer_3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub what_to_gain_answer_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub what_to_gain_answer_2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub what_to_gain_answer_3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_after_reading_answer_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_after_reading_answer_2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_after_reading_answer_3: Option<String>,
}

impl AnswersPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
