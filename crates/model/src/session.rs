use alloc::{collections::BTreeMap, string::String, vec::Vec};
use serde::{Deserialize, Serialize};

/// Question ID to the index of the selected option.
pub type Answers = BTreeMap<String, usize>;

/// Question ID to the accumulated number of seconds spent viewing it.
pub type QuestionTimes = BTreeMap<String, u64>;

/// Correct-versus-total tally for a single topic.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct TopicStats {
    pub correct: usize,
    pub total: usize,
}

/// Presentation order of one question within a session.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct QuestionLayout {
    pub id: String,
    /// Authored index of the option shown at each position.
    pub options: Vec<usize>,
}

/// Final result of a session. Computed once, never mutated afterwards.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub correct: usize,
    pub total: usize,
    /// Fraction of correct answers in `[0, 1]`. Zero when there are no questions.
    pub percent: f64,
    pub passed: bool,
    /// Tallies keyed by topic label. Questions without a topic are excluded.
    pub topic_stats: BTreeMap<String, TopicStats>,
    pub question_times: QuestionTimes,
}

/// Value copy of a session, sufficient (together with the quiz definition) to resume it.
///
/// Question texts and options are never stored: restoring always starts from the definition.
/// Only the shuffled order is kept in [`Snapshot::layout`], since recorded answers are positions
/// within that order. Every field tolerates being missing so that older or partial snapshots
/// still resume.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub current_index: usize,
    #[serde(default)]
    pub answers: Answers,
    /// Falls back to the quiz time limit when absent.
    #[serde(default)]
    pub remaining_sec: Option<u32>,
    #[serde(default)]
    pub is_finished: bool,
    #[serde(default, alias = "_summary", skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[serde(default)]
    pub question_times: QuestionTimes,
    /// Shuffled question order with each question's option order. Empty means "shuffle anew".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub layout: Vec<QuestionLayout>,
}

#[cfg(test)]
mod tests {
    use super::Snapshot;

    #[test]
    fn missing_fields_take_defaults() {
        let snapshot: Snapshot = serde_json::from_str(r#"{ "answers": { "q1": 1 } }"#).unwrap();
        assert_eq!(snapshot.current_index, 0);
        assert_eq!(snapshot.answers.get("q1"), Some(&1));
        assert_eq!(snapshot.remaining_sec, None);
        assert!(!snapshot.is_finished);
        assert!(snapshot.summary.is_none());
        assert!(snapshot.question_times.is_empty());
        assert!(snapshot.layout.is_empty());
    }

    #[test]
    fn accepts_legacy_summary_key() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{
                "currentIndex": 1,
                "remainingSec": 0,
                "isFinished": true,
                "_summary": {
                    "correct": 1, "total": 2, "percent": 0.5, "passed": false,
                    "topicStats": { "math": { "correct": 1, "total": 1 } },
                    "questionTimes": { "q1": 3 }
                },
                "questionTimes": { "q1": 3 }
            }"#,
        )
        .unwrap();
        let summary = snapshot.summary.unwrap();
        assert_eq!(summary.correct, 1);
        assert_eq!(summary.topic_stats["math"].total, 1);
        assert_eq!(snapshot.remaining_sec, Some(0));
    }
}
