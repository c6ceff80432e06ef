//! Normalized identifiers
//!
//! Every name that reaches a generated file (state names, the aggregator
//! name) passes through [`normalize`] first, so `"Walk Fast"` and
//! `"WalkFast"` denote the same entity.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

/// Remove every whitespace character from `raw`.
///
/// Case and the order of the remaining characters are untouched. Empty or
/// all-whitespace input yields an empty string.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// A non-empty, whitespace-free name
///
/// # Invariants
/// - never empty
/// - contains no whitespace
/// - `Identifier::parse(id.as_str())` yields `id` again
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Normalize `raw` and wrap it
    ///
    /// # Errors
    /// Returns [`IdentifierError::Empty`] when nothing is left after
    /// whitespace removal.
    pub fn parse(raw: &str) -> Result<Self, IdentifierError> {
        Self::normalized(raw).ok_or(IdentifierError::Empty)
    }

    /// Normalize `raw`, returning `None` for names that normalize to empty
    #[inline]
    #[must_use]
    pub fn normalized(raw: &str) -> Option<Self> {
        let name = normalize(raw);
        (!name.is_empty()).then_some(Self(name))
    }

    /// Borrow as `&str`
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the owned string
    #[inline]
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

impl Deref for Identifier {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Errors constructing an [`Identifier`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// Input was empty or whitespace only
    #[error("identifier is empty after whitespace removal")]
    Empty,
}
