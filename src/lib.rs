//! Facade crate for the Wild Drafter recommendation service.
//!
//! This crate re-exports the core domain types and the weighted ranking
//! pipeline. The SQLite catalog store is available behind the
//! `store-sqlite` feature.

#![forbid(unsafe_code)]

pub use drafter_core::{
    AnswerSet, Catalog, CatalogError, CatalogStore, CatalogStoreError, ChampionRecord,
    JsonFileCatalogStore, JsonFileCatalogStoreError, MemoryCatalogStore, Question, QuestionSet,
    QuestionSetError, Reason, ScoreBreakdown, Scorer, SeedError, SeedOutcome, builtin_seed,
    load_seed,
};

#[cfg(feature = "store-sqlite")]
pub use drafter_core::{SqliteCatalogStore, SqliteCatalogStoreError};

pub use drafter_scorer::{
    DEFAULT_ICON, MAX_REASONS, MaxResults, MaxResultsError, Recommendation, Recommender,
    WeightedTraitScorer, build_recommendations, resolve_icon,
};
