//! Ranked recommendations over a whole catalog.

use drafter_core::{AnswerSet, Catalog, Scorer};

use crate::{DEFAULT_ICON, MaxResults, Recommendation, WeightedTraitScorer, resolve_icon};

/// Most reasons reported per recommendation.
pub const MAX_REASONS: usize = 5;

/// Score every champion in `catalog` and return the best `max_results`.
///
/// Champions scoring zero are dropped. Survivors keep their five heaviest
/// reasons and are ranked by score, highest first. Both sorts are stable, so
/// equal-weight reasons stay in question order and equal scores stay in
/// catalog (name-ascending) order.
#[must_use]
pub fn build_recommendations<S>(
    scorer: &S,
    catalog: &Catalog,
    answers: &AnswerSet,
    default_icon: &str,
    max_results: MaxResults,
) -> Vec<Recommendation>
where
    S: Scorer + ?Sized,
{
    let mut ranked: Vec<Recommendation> = catalog
        .iter()
        .filter_map(|(name, record)| {
            let breakdown = scorer.score(record, answers);
            if !breakdown.is_match() {
                return None;
            }
            let mut reasons = breakdown.reasons;
            reasons.sort_by(|left, right| right.weight.cmp(&left.weight));
            reasons.truncate(MAX_REASONS);
            let mut tags: Vec<String> = record.enabled_traits().map(str::to_owned).collect();
            tags.sort_unstable();
            Some(Recommendation {
                champion: name.to_owned(),
                score: breakdown.score,
                reasons,
                icon: resolve_icon(record, default_icon),
                tags,
            })
        })
        .collect();

    ranked.sort_by(|left, right| right.score.cmp(&left.score));
    ranked.truncate(max_results.get());
    log::debug!("ranked {} of {} champions", ranked.len(), catalog.len());
    ranked
}

/// A scorer paired with the icon used when a champion has none.
#[derive(Debug, Clone)]
pub struct Recommender<S = WeightedTraitScorer> {
    scorer: S,
    default_icon: String,
}

impl<S: Scorer> Recommender<S> {
    /// Pair `scorer` with an explicit placeholder icon.
    #[must_use]
    pub fn new(scorer: S, default_icon: impl Into<String>) -> Self {
        Self {
            scorer,
            default_icon: default_icon.into(),
        }
    }

    /// Pair `scorer` with [`DEFAULT_ICON`].
    #[must_use]
    pub fn with_default_icon(scorer: S) -> Self {
        Self::new(scorer, DEFAULT_ICON)
    }

    /// The wrapped scorer.
    #[must_use]
    pub const fn scorer(&self) -> &S {
        &self.scorer
    }

    /// The placeholder icon URI.
    #[must_use]
    pub fn default_icon(&self) -> &str {
        &self.default_icon
    }

    /// Rank `catalog` against `answers`; see [`build_recommendations`].
    #[must_use]
    pub fn recommend(
        &self,
        catalog: &Catalog,
        answers: &AnswerSet,
        max_results: MaxResults,
    ) -> Vec<Recommendation> {
        build_recommendations(
            &self.scorer,
            catalog,
            answers,
            &self.default_icon,
            max_results,
        )
    }
}
