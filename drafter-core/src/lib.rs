//! Core domain types for the Wild Drafter recommendation service.
//!
//! The crate models the static question set, the champion catalog and the
//! caller's answers, and defines the two seams the rest of the workspace
//! plugs into: [`Scorer`] for ranking logic and [`CatalogStore`] for
//! persistence. Records are kept as loose JSON objects so unknown keys survive
//! a round trip through any backend.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod answers;
pub mod champion;
pub mod question;
pub mod scorer;
pub mod seed;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use answers::AnswerSet;
pub use champion::{Catalog, CatalogError, ChampionRecord, ICON_FIELD};
pub use question::{Question, QuestionSet, QuestionSetError};
pub use scorer::{Reason, ScoreBreakdown, Scorer};
pub use seed::{SeedError, builtin_seed, load_seed};
pub use store::{
    CatalogStore, CatalogStoreError, JsonFileCatalogStore, JsonFileCatalogStoreError,
    MemoryCatalogStore, SeedOutcome,
};

#[cfg(feature = "store-sqlite")]
pub use store::{SqliteCatalogStore, SqliteCatalogStoreError};
