//! Opaque vendor identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An identifier assigned by the vendor.
///
/// The API is inconsistent about whether ids are JSON numbers or strings, so
/// both are accepted. The original shape is kept when serializing back out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    /// Numeric id (e.g. user and cycle ids).
    Number(i64),
    /// String id (e.g. UUID activity ids).
    Text(String),
}

impl ResourceId {
    /// Returns true for an empty string id.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
