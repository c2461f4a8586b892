//! Server-assigned record ids

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Id of a stored record. Servers answer with either JSON numbers or
/// strings; both round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl RecordId {
    pub fn as_number(&self) -> Option<u64> {
        match self {
            RecordId::Number(n) => Some(*n),
            RecordId::Text(_) => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId::Number(id)
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId::Text(id)
    }
}

impl FromStr for RecordId {
    type Err = Infallible;

    /// Digits parse as a number, anything else is kept as text
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<u64>()
            .map(RecordId::Number)
            .unwrap_or_else(|_| RecordId::Text(s.to_string())))
    }
}
