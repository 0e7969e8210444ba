//! The fixed yes/no questions exposed to callers.
//!
//! Each [`Question`] ties display text to a trait key and an integer weight.
//! The order of a [`QuestionSet`] is significant: scoring walks it front to
//! back, so reasons come out in declaration order.
//!
//! # Examples
//! ```
//! use drafter_core::QuestionSet;
//!
//! let questions = QuestionSet::default();
//! assert_eq!(questions.len(), 15);
//! assert_eq!(questions.get("ally_melee").map(|q| q.weight), Some(2));
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single yes/no criterion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Text shown to the caller.
    pub text: String,
    /// Trait key shared with champion records.
    pub key: String,
    /// Importance of a match; always at least one.
    pub weight: u32,
    /// Short justification shown next to a recommendation.
    pub label: String,
}

impl Question {
    /// Build a question from its parts.
    pub fn new(
        text: impl Into<String>,
        key: impl Into<String>,
        weight: u32,
        label: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            key: key.into(),
            weight,
            label: label.into(),
        }
    }
}

/// Errors returned when validating a [`QuestionSet`].
#[derive(Debug, Error)]
pub enum QuestionSetError {
    /// No questions were supplied.
    #[error("question set must contain at least one question")]
    Empty,
    /// A question had a blank trait key.
    #[error("question {index} has an empty trait key")]
    BlankKey {
        /// Position of the offending question.
        index: usize,
    },
    /// Two questions shared a trait key.
    #[error("trait key '{key}' is declared more than once")]
    DuplicateKey {
        /// The repeated key.
        key: String,
    },
    /// A question carried a zero weight.
    #[error("question '{key}' must have a weight of at least 1")]
    ZeroWeight {
        /// Key of the offending question.
        key: String,
    },
    /// The JSON document could not be decoded.
    #[error("failed to parse question set: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk shape of a question; the label is optional and defaults to the key.
#[derive(Debug, Deserialize)]
struct QuestionEntry {
    text: String,
    key: String,
    weight: u32,
    #[serde(default)]
    label: Option<String>,
}

impl From<QuestionEntry> for Question {
    fn from(entry: QuestionEntry) -> Self {
        let label = entry.label.unwrap_or_else(|| entry.key.clone());
        Self {
            text: entry.text,
            key: entry.key,
            weight: entry.weight,
            label,
        }
    }
}

/// Ordered, validated list of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Validate and construct a question set.
    ///
    /// # Errors
    /// Returns [`QuestionSetError`] when the list is empty, a key is blank or
    /// repeated, or a weight is zero.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuestionSetError> {
        if questions.is_empty() {
            return Err(QuestionSetError::Empty);
        }
        let mut seen = HashSet::with_capacity(questions.len());
        for (index, question) in questions.iter().enumerate() {
            if question.key.trim().is_empty() {
                return Err(QuestionSetError::BlankKey { index });
            }
            if question.weight == 0 {
                return Err(QuestionSetError::ZeroWeight {
                    key: question.key.clone(),
                });
            }
            if !seen.insert(question.key.as_str()) {
                return Err(QuestionSetError::DuplicateKey {
                    key: question.key.clone(),
                });
            }
        }
        Ok(Self { questions })
    }

    /// Parse a JSON array of `{text, key, weight, label?}` objects.
    ///
    /// # Errors
    /// Returns [`QuestionSetError::Parse`] for malformed JSON and the
    /// validation errors of [`QuestionSet::new`] otherwise.
    pub fn from_json_str(json: &str) -> Result<Self, QuestionSetError> {
        let entries: Vec<QuestionEntry> = serde_json::from_str(json)?;
        Self::new(entries.into_iter().map(Question::from).collect())
    }

    /// Iterate over the questions in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    /// Look up a question by trait key.
    pub fn get(&self, key: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.key == key)
    }

    /// Number of questions in the set.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// A validated set is never empty; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl Default for QuestionSet {
    fn default() -> Self {
        let questions = DEFAULT_QUESTIONS
            .iter()
            .map(|&(text, key, weight, label)| Question::new(text, key, weight, label))
            .collect();
        Self { questions }
    }
}

impl<'a> IntoIterator for &'a QuestionSet {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

const DEFAULT_QUESTIONS: [(&str, &str, u32, &str); 15] = [
    ("L’équipe ennemie est-elle AD heavy ?", "heavy_ad", 1, "Bon vs AD"),
    ("L’équipe ennemie est-elle AP heavy ?", "heavy_ap", 1, "Bon vs AP"),
    ("Besoin d'engage ?", "need_engage", 1, "Engage"),
    ("Besoin de CC ?", "need_cc", 1, "Contrôle"),
    ("Frontline nécessaire ?", "frontline", 1, "Frontline"),
    ("Peeling nécessaire ?", "peeling", 1, "Peeling"),
    ("Solo invade ?", "invade", 1, "Solo invade"),
    ("Besoin de scaling ?", "scaling", 1, "Scaling"),
    ("Besoin d'early game strong ?", "early_game", 1, "Early game"),
    ("Beaucoup de melee alliés ?", "ally_melee", 2, "Synergie melee"),
    ("Y a-t-il des sacs à PV ?", "hp_tanks", 2, "Fort vs HP"),
    ("Beaucoup d'auto-attackers ?", "aa_heavy", 2, "Fort vs AA"),
    ("ADC peut bénéficier d'un enchanteur ?", "enchanter_adc", 2, "Enchant ADC"),
    ("Faut-il lock une target ?", "lock_target", 2, "Target lock"),
    ("Beaucoup de ranges ?", "range_heavy", 2, "Fort vs ranges"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_set_is_valid() {
        let defaults = QuestionSet::default();
        let rebuilt = QuestionSet::new(defaults.iter().cloned().collect());
        assert!(rebuilt.is_ok());
    }

    #[rstest]
    fn default_set_keeps_declaration_order() {
        let defaults = QuestionSet::default();
        let keys: Vec<_> = defaults
            .iter()
            .map(|q| q.key.as_str())
            .take(3)
            .collect();
        assert_eq!(keys, ["heavy_ad", "heavy_ap", "need_engage"]);
    }

    #[rstest]
    #[case("heavy_ad", "L’équipe ennemie est-elle AD heavy ?", "Bon vs AD")]
    #[case("need_cc", "Besoin de CC ?", "Contrôle")]
    #[case("hp_tanks", "Y a-t-il des sacs à PV ?", "Fort vs HP")]
    #[case("range_heavy", "Beaucoup de ranges ?", "Fort vs ranges")]
    fn default_set_carries_french_text_and_labels(
        #[case] key: &str,
        #[case] text: &str,
        #[case] label: &str,
    ) {
        let defaults = QuestionSet::default();
        let question = defaults.get(key).expect("default question");
        assert_eq!(question.text, text);
        assert_eq!(question.label, label);
    }

    #[rstest]
    fn rejects_empty_set() {
        assert!(matches!(
            QuestionSet::new(Vec::new()),
            Err(QuestionSetError::Empty)
        ));
    }

    #[rstest]
    #[case(Question::new("q", " ", 1, "l"))]
    #[case(Question::new("q", "", 1, "l"))]
    fn rejects_blank_keys(#[case] question: Question) {
        assert!(matches!(
            QuestionSet::new(vec![question]),
            Err(QuestionSetError::BlankKey { index: 0 })
        ));
    }

    #[rstest]
    fn rejects_duplicate_keys() {
        let result = QuestionSet::new(vec![
            Question::new("a", "frontline", 1, "Frontline"),
            Question::new("b", "frontline", 2, "Frontline"),
        ]);
        assert!(matches!(
            result,
            Err(QuestionSetError::DuplicateKey { key }) if key == "frontline"
        ));
    }

    #[rstest]
    fn rejects_zero_weight() {
        let result = QuestionSet::new(vec![Question::new("a", "frontline", 0, "Frontline")]);
        assert!(matches!(result, Err(QuestionSetError::ZeroWeight { .. })));
    }

    #[rstest]
    fn json_label_defaults_to_key() {
        let set = QuestionSet::from_json_str(
            r#"[{"text": "Need engage?", "key": "need_engage", "weight": 1},
                {"text": "Tanks?", "key": "hp_tanks", "weight": 2, "label": "Strong vs HP"}]"#,
        )
        .expect("parse question set");

        assert_eq!(set.len(), 2);
        assert_eq!(set.get("need_engage").map(|q| q.label.as_str()), Some("need_engage"));
        assert_eq!(set.get("hp_tanks").map(|q| q.label.as_str()), Some("Strong vs HP"));
    }

    #[rstest]
    fn json_rejects_negative_weight() {
        let result =
            QuestionSet::from_json_str(r#"[{"text": "t", "key": "k", "weight": -1}]"#);
        assert!(matches!(result, Err(QuestionSetError::Parse(_))));
    }
}
