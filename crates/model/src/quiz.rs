use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};

/// Acceptable schema for a full quiz.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    /// Title to be displayed above the questions.
    pub title: String,
    /// How long the whole session may run (in seconds).
    pub time_limit_sec: u32,
    /// Minimum fraction of correct answers (in `[0, 1]`) required to pass.
    pub pass_threshold: f64,
    /// Questions in authoring order. The engine never relies on this order.
    pub questions: Vec<QuestionDef>,
}

/// Acceptable schema for a single question.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDef {
    /// Stable identifier. Must be unique within the quiz.
    pub id: String,
    /// Prompt to be displayed.
    pub text: String,
    /// Possible answers to select from.
    pub options: Vec<String>,
    /// Index of the option with the correct answer.
    pub correct_index: usize,
    /// Optional grouping label for the per-topic breakdown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}
