//! Weighted trait matching against the question set.

use drafter_core::{AnswerSet, ChampionRecord, QuestionSet, Reason, ScoreBreakdown, Scorer};

/// Sums question weights where the caller said "yes" and the champion agrees.
///
/// Questions are walked in declaration order, so reasons come out in that
/// order too. Keys that appear in answers or records but in no question are
/// ignored.
#[derive(Debug, Clone, Default)]
pub struct WeightedTraitScorer {
    questions: QuestionSet,
}

impl WeightedTraitScorer {
    /// Score against a custom question set.
    #[must_use]
    pub const fn new(questions: QuestionSet) -> Self {
        Self { questions }
    }

    /// The questions this scorer weighs.
    #[must_use]
    pub const fn questions(&self) -> &QuestionSet {
        &self.questions
    }
}

impl Scorer for WeightedTraitScorer {
    fn score(&self, record: &ChampionRecord, answers: &AnswerSet) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown::default();
        for question in &self.questions {
            if answers.is_yes(&question.key) && record.has_trait(&question.key) {
                breakdown.push(Reason {
                    key: question.key.clone(),
                    label: question.label.clone(),
                    weight: question.weight,
                });
            }
        }
        breakdown
    }
}
