//! Fixtures shared by unit and behaviour tests across the workspace.
//!
//! Compiled for this crate's own tests and, for dependants, behind the
//! `test-support` feature.

use crate::{AnswerSet, Catalog, ChampionRecord, Reason, ScoreBreakdown, Scorer};

/// A small catalog covering traits, icons and free-form metadata.
///
/// Contains `Ekko`, `Sejuani`, `Vi` and `Zac`.
pub fn sample_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    catalog.insert(
        "Sejuani",
        ChampionRecord::from_traits([
            ("need_engage", true),
            ("frontline", true),
            ("hp_tanks", false),
        ])
        .with_field("icon", "https://ddragon.example/Sejuani.png"),
    );
    catalog.insert(
        "Vi",
        ChampionRecord::from_traits([("need_engage", true), ("peeling", true)])
            .with_field("icon", "/static/icons/vi.png")
            .with_field("lane", "jungle"),
    );
    catalog.insert(
        "Zac",
        ChampionRecord::from_traits([("frontline", true), ("need_engage", true)])
            .with_field("icon", "zac.png"),
    );
    catalog.insert(
        "Ekko",
        ChampionRecord::from_traits([("scaling", true), ("invade", true)])
            .with_field("notes", "assassin"),
    );
    catalog
}

/// Test `Scorer` awarding one point per trait answered `true`.
///
/// Unlike weighted scorers it needs no question set, so reasons carry the key
/// as their label.
#[derive(Debug, Copy, Clone, Default)]
pub struct UniformScorer;

impl Scorer for UniformScorer {
    fn score(&self, record: &ChampionRecord, answers: &AnswerSet) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown::default();
        for key in record.enabled_traits() {
            if answers.is_yes(key) {
                breakdown.push(Reason {
                    key: key.to_owned(),
                    label: key.to_owned(),
                    weight: 1,
                });
            }
        }
        breakdown
    }
}
