//! normalize.rs - Validation and canonicalization of raw terms.
//!
//! Every term that enters the catalog or the matcher goes through
//! [`normalize_term`]: surrounding whitespace is trimmed and the remainder is
//! lower-cased. The canonical form is what gets stored, compared and matched.
//!
//! License: MIT OR APACHE 2.0

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::SqlMaskError;

/// Validates a raw term and returns its canonical form.
///
/// Fails with [`SqlMaskError::InvalidTerm`] when the value is absent or blank
/// after trimming. Normalizing an already canonical term returns it unchanged.
pub fn normalize_term(raw: Option<&str>) -> Result<String, SqlMaskError> {
    let Some(raw) = raw else {
        return Err(SqlMaskError::InvalidTerm("term must not be absent".to_string()));
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SqlMaskError::InvalidTerm("term must not be blank".to_string()));
    }
    Ok(trimmed.to_lowercase())
}

/// A validated, canonical term.
///
/// Can only be constructed through the normalizer, so holding a `Term` means
/// the value is trimmed, lower-cased and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Term(String);

impl Term {
    pub fn new(raw: &str) -> Result<Self, SqlMaskError> {
        normalize_term(Some(raw)).map(Term)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters; this is also the length of the mask written for it.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Term {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Term {
    type Error = SqlMaskError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Term::new(value)
    }
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Term {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Term::new(&raw).map_err(serde::de::Error::custom)
    }
}
