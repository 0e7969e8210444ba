//! Per-request answers to the question set.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Caller-supplied trait key → yes/no answers.
///
/// Absent keys read as "no". Keys that match no question are kept but never
/// contribute to a score.
///
/// # Examples
/// ```
/// use drafter_core::AnswerSet;
///
/// let answers = AnswerSet::new()
///     .with_answer("need_engage", true)
///     .with_answer("frontline", false);
/// assert!(answers.is_yes("need_engage"));
/// assert!(!answers.is_yes("frontline"));
/// assert!(!answers.is_yes("scaling"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    answers: BTreeMap<String, bool>,
}

impl AnswerSet {
    /// Create an empty answer set.
    pub const fn new() -> Self {
        Self {
            answers: BTreeMap::new(),
        }
    }

    /// Record an answer while consuming `self`, enabling chaining.
    #[must_use]
    pub fn with_answer(mut self, key: impl Into<String>, yes: bool) -> Self {
        self.insert(key, yes);
        self
    }

    /// Record or overwrite an answer.
    pub fn insert(&mut self, key: impl Into<String>, yes: bool) {
        self.answers.insert(key.into(), yes);
    }

    /// Report whether `key` was answered "yes".
    pub fn is_yes(&self, key: &str) -> bool {
        self.answers.get(key).copied().unwrap_or(false)
    }

    /// Number of recorded answers, yes or no.
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Report whether no answers were recorded.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Build answers from a loose JSON object, keeping only boolean values.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        object
            .iter()
            .filter_map(|(key, value)| value.as_bool().map(|yes| (key.clone(), yes)))
            .collect()
    }
}

impl FromIterator<(String, bool)> for AnswerSet {
    fn from_iter<T: IntoIterator<Item = (String, bool)>>(iter: T) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}
