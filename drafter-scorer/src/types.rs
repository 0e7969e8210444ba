//! Public request bounds and output types for recommendations.
#![forbid(unsafe_code)]

use drafter_core::Reason;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::MaxResultsError;

/// Upper bound on the number of recommendations returned, always in `1..=30`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaxResults(usize);

impl MaxResults {
    /// Smallest accepted bound.
    pub const MIN: usize = 1;
    /// Largest accepted bound.
    pub const MAX: usize = 30;
    /// Bound used when the caller does not ask for one.
    pub const DEFAULT: Self = Self(6);

    /// Clamp an arbitrary requested count into `MIN..=MAX`.
    ///
    /// # Examples
    /// ```
    /// use drafter_scorer::MaxResults;
    ///
    /// assert_eq!(MaxResults::clamped(-4).get(), 1);
    /// assert_eq!(MaxResults::clamped(12).get(), 12);
    /// assert_eq!(MaxResults::clamped(1000).get(), 30);
    /// ```
    #[must_use]
    pub fn clamped(requested: i64) -> Self {
        if requested < 1 {
            return Self(Self::MIN);
        }
        usize::try_from(requested).map_or(Self(Self::MAX), |count| Self(count.min(Self::MAX)))
    }

    /// Interpret the optional `max_results` field of a request body.
    ///
    /// Absent and `null` select [`MaxResults::DEFAULT`]. Integers of any size
    /// are clamped. Everything else, floats included, is rejected rather than
    /// coerced.
    ///
    /// # Errors
    /// Returns [`MaxResultsError::NotAnInteger`] for non-integer values.
    pub fn from_json(value: Option<&Value>) -> Result<Self, MaxResultsError> {
        match value {
            None | Some(Value::Null) => Ok(Self::DEFAULT),
            Some(Value::Number(number)) if number.is_i64() => {
                Ok(number.as_i64().map_or(Self::DEFAULT, Self::clamped))
            }
            Some(Value::Number(number)) if number.is_u64() => Ok(Self(Self::MAX)),
            Some(other) => Err(MaxResultsError::NotAnInteger {
                found: other.to_string(),
            }),
        }
    }

    /// The bound as a count.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for MaxResults {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One ranked champion, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Champion name.
    pub champion: String,
    /// Sum of matched question weights; always at least one.
    pub score: u32,
    /// Highest-weighted matched reasons, at most five.
    pub reasons: Vec<Reason>,
    /// Display icon, already resolved against the default.
    pub icon: String,
    /// Every trait the champion has enabled, in key order.
    pub tags: Vec<String>,
}
