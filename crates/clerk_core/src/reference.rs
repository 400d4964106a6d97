//! Identifier resolution for user-supplied entity references.
//!
//! # Responsibility
//! - Turn a raw token (`#42` or `buy milk`) into a typed lookup key.
//! - Be the single place every name-or-id operation goes through.
//!
//! # Invariants
//! - Tokens starting with `#` address the row id; the remainder is passed
//!   through unvalidated and simply matches no row when it is not numeric.
//! - Every other token is matched by exact name equality.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Prefix marking a reference as a row id.
pub const ID_PREFIX: char = '#';

/// Column a reference is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefField {
    Id,
    Name,
}

impl RefField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
        }
    }
}

/// A resolved reference to one task or note.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// Raw text after the `#` prefix.
    Id(String),
    /// Whole token, compared by exact equality.
    Name(String),
}

impl EntityRef {
    /// Reference to a known numeric row id.
    pub fn id(id: i64) -> Self {
        Self::Id(id.to_string())
    }

    pub fn field(&self) -> RefField {
        match self {
            Self::Id(_) => RefField::Id,
            Self::Name(_) => RefField::Name,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Id(value) | Self::Name(value) => value,
        }
    }
}

impl FromStr for EntityRef {
    type Err = Infallible;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Ok(resolve(token))
    }
}

impl Display for EntityRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(value) => write!(f, "{ID_PREFIX}{value}"),
            Self::Name(value) => write!(f, "`{value}`"),
        }
    }
}

/// Resolves a user token into a reference.
pub fn resolve(token: &str) -> EntityRef {
    match token.strip_prefix(ID_PREFIX) {
        Some(rest) => EntityRef::Id(rest.to_string()),
        None => EntityRef::Name(token.to_string()),
    }
}
