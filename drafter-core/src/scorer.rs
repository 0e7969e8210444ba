//! Score champion records against a caller's answers.
//!
//! The `Scorer` trait produces an integer score for a
//! [`ChampionRecord`](crate::ChampionRecord) given an
//! [`AnswerSet`](crate::AnswerSet), together with the reasons that made up
//! the score.

use serde::{Deserialize, Serialize};

use crate::{AnswerSet, ChampionRecord};

/// A trait that matched, with the label and weight it contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    /// Matched trait key.
    pub key: String,
    /// Human-readable justification.
    pub label: String,
    /// Points contributed to the score.
    pub weight: u32,
}

/// Result of scoring a single record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScoreBreakdown {
    /// Sum of the weights of every reason.
    pub score: u32,
    /// Contributing reasons, in question declaration order.
    pub reasons: Vec<Reason>,
}

impl ScoreBreakdown {
    /// Append a reason and add its weight to the score.
    pub fn push(&mut self, reason: Reason) {
        self.score = self.score.saturating_add(reason.weight);
        self.reasons.push(reason);
    }

    /// Report whether anything matched.
    pub const fn is_match(&self) -> bool {
        self.score > 0
    }
}

/// Calculate how well a champion answers the caller's needs.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so one scorer can be
/// shared across request handlers. Scoring is infallible: unknown or missing
/// keys on either side simply do not match.
///
/// # Examples
///
/// ```rust
/// use drafter_core::{AnswerSet, ChampionRecord, Reason, ScoreBreakdown, Scorer};
///
/// struct FrontlineOnly;
///
/// impl Scorer for FrontlineOnly {
///     fn score(&self, record: &ChampionRecord, answers: &AnswerSet) -> ScoreBreakdown {
///         let mut breakdown = ScoreBreakdown::default();
///         if answers.is_yes("frontline") && record.has_trait("frontline") {
///             breakdown.push(Reason {
///                 key: "frontline".into(),
///                 label: "Frontline".into(),
///                 weight: 1,
///             });
///         }
///         breakdown
///     }
/// }
///
/// let record = ChampionRecord::from_traits([("frontline", true)]);
/// let answers = AnswerSet::new().with_answer("frontline", true);
/// assert_eq!(FrontlineOnly.score(&record, &answers).score, 1);
/// ```
pub trait Scorer: Send + Sync {
    /// Score `record` according to `answers`.
    fn score(&self, record: &ChampionRecord, answers: &AnswerSet) -> ScoreBreakdown;
}
