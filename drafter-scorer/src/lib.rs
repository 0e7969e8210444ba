//! Ranking champions for a set of draft answers.
//!
//! The crate supplies the production [`Scorer`](drafter_core::Scorer),
//! [`WeightedTraitScorer`], which sums question weights for every trait the
//! caller answered "yes" to and the champion carries. On top of it,
//! [`build_recommendations`] scans a whole [`Catalog`](drafter_core::Catalog),
//! drops champions that matched nothing, and returns the best matches with
//! their reasons, tags and a display icon.
//!
//! # Examples
//!
//! ```
//! use drafter_core::{AnswerSet, Catalog, ChampionRecord};
//! use drafter_scorer::{MaxResults, Recommender, WeightedTraitScorer};
//!
//! let mut catalog = Catalog::new();
//! catalog.insert(
//!     "Sejuani",
//!     ChampionRecord::from_traits([("need_engage", true), ("frontline", true)]),
//! );
//! let answers = AnswerSet::new()
//!     .with_answer("need_engage", true)
//!     .with_answer("frontline", true);
//!
//! let recommender = Recommender::with_default_icon(WeightedTraitScorer::default());
//! let results = recommender.recommend(&catalog, &answers, MaxResults::default());
//!
//! assert_eq!(results.len(), 1);
//! assert_eq!(results.first().map(|r| r.score), Some(2));
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;
mod icon;
mod recommend;
mod types;
mod weighted;

pub use error::MaxResultsError;
pub use icon::{DEFAULT_ICON, resolve_icon};
pub use recommend::{MAX_REASONS, Recommender, build_recommendations};
pub use types::{MaxResults, Recommendation};
pub use weighted::WeightedTraitScorer;
