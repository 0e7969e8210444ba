//! Champion records and the catalog that holds them.
//!
//! A [`ChampionRecord`] is a loose JSON object: boolean trait flags, an
//! optional `icon` and any further metadata. Only a literal `true` enables a
//! trait, so absent keys, `false` and non-boolean values all read as "no".
//! The [`Catalog`] keys records by champion name and always iterates in
//! ascending name order.
//!
//! # Examples
//! ```
//! use drafter_core::{Catalog, ChampionRecord};
//!
//! let mut catalog = Catalog::new();
//! catalog.insert(
//!     "Sejuani",
//!     ChampionRecord::from_traits([("need_engage", true), ("frontline", true)]),
//! );
//!
//! let sejuani = catalog.get("Sejuani").expect("record present");
//! assert!(sejuani.has_trait("frontline"));
//! assert!(!sejuani.has_trait("scaling"));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Record field holding the optional icon reference.
pub const ICON_FIELD: &str = "icon";

/// A champion's trait flags and metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChampionRecord {
    fields: Map<String, Value>,
}

impl ChampionRecord {
    /// Wrap an existing JSON object.
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a record from trait flags only.
    pub fn from_traits<I, K>(traits: I) -> Self
    where
        I: IntoIterator<Item = (K, bool)>,
        K: Into<String>,
    {
        let fields = traits
            .into_iter()
            .map(|(key, enabled)| (key.into(), Value::Bool(enabled)))
            .collect();
        Self { fields }
    }

    /// Set a field while consuming `self`, enabling chaining.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Report whether `key` is set to `true`.
    pub fn has_trait(&self, key: &str) -> bool {
        matches!(self.fields.get(key), Some(Value::Bool(true)))
    }

    /// Every key whose value is `true`.
    pub fn enabled_traits(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields
            .iter()
            .filter(|(_, value)| matches!(value, Value::Bool(true)))
            .map(|(key, _)| key.as_str())
    }

    /// The raw icon value when it is a string.
    pub fn icon(&self) -> Option<&str> {
        self.fields.get(ICON_FIELD).and_then(Value::as_str)
    }

    /// Borrow the underlying JSON object.
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consume the record and return the underlying JSON object.
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for ChampionRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// Errors raised when decoding a catalog from JSON.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document was not valid JSON.
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The document was valid JSON but not an object.
    #[error("catalog must be a JSON object mapping champion names to records")]
    NotAnObject,
    /// A champion's record was not a JSON object.
    #[error("record for champion '{name}' must be a JSON object")]
    InvalidRecord {
        /// Name of the offending champion.
        name: String,
    },
}

/// Champion records keyed by unique name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    records: BTreeMap<String, ChampionRecord>,
}

impl Catalog {
    /// Create an empty catalog.
    pub const fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Insert or replace a record, returning the previous one.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        record: ChampionRecord,
    ) -> Option<ChampionRecord> {
        self.records.insert(name.into(), record)
    }

    /// Look up a record by champion name.
    pub fn get(&self, name: &str) -> Option<&ChampionRecord> {
        self.records.get(name)
    }

    /// Number of champions.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Report whether the catalog holds no champions.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate over `(name, record)` pairs in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChampionRecord)> + '_ {
        self.records
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    /// Champion names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.keys().map(String::as_str)
    }

    /// Decode a catalog, rejecting anything that is not an object of objects.
    ///
    /// # Errors
    /// Returns [`CatalogError`] for invalid JSON, a non-object document, or a
    /// record that is not an object.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    /// Strict conversion from an already-parsed JSON value.
    ///
    /// # Errors
    /// See [`Catalog::from_json_str`].
    pub fn from_json_value(value: Value) -> Result<Self, CatalogError> {
        let Value::Object(entries) = value else {
            return Err(CatalogError::NotAnObject);
        };
        entries
            .into_iter()
            .map(|(name, record)| match record {
                Value::Object(fields) => Ok((name, ChampionRecord::new(fields))),
                _ => Err(CatalogError::InvalidRecord { name }),
            })
            .collect()
    }

    /// Lenient conversion used for inline payloads: entries whose value is
    /// not an object are skipped.
    pub fn from_payload(entries: &Map<String, Value>) -> Self {
        entries
            .iter()
            .filter_map(|(name, record)| {
                if let Value::Object(fields) = record {
                    Some((name.clone(), ChampionRecord::new(fields.clone())))
                } else {
                    log::debug!("skipping payload entry '{name}': record is not an object");
                    None
                }
            })
            .collect()
    }
}

impl FromIterator<(String, ChampionRecord)> for Catalog {
    fn from_iter<T: IntoIterator<Item = (String, ChampionRecord)>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Catalog {
    type Item = (String, ChampionRecord);
    type IntoIter = std::collections::btree_map::IntoIter<String, ChampionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
