//! Quote identifiers - ULID-based, prefixed for readability

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Prefix shared by every quote id
pub const QUOTE_PREFIX: &str = "QUOTE";

/// Unique identifier of a saved quote, e.g. `QUOTE-01J9Z3V6T2X8K4M5N7P9Q1R3S5`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuoteId(Ulid);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdParseError {
    #[error("Invalid quote ID format: expected QUOTE-<ULID>, got '{0}'")]
    InvalidFormat(String),

    #[error("Invalid ULID in quote ID: {0}")]
    InvalidUlid(String),
}

impl QuoteId {
    /// Generate a new, time-ordered id
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    pub fn ulid(&self) -> Ulid {
        self.0
    }

    /// Parse `QUOTE-<ULID>`; the prefix is case-insensitive
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        let s = s.trim();
        let (prefix, rest) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::InvalidFormat(s.to_string()))?;
        if !prefix.eq_ignore_ascii_case(QUOTE_PREFIX) {
            return Err(IdParseError::InvalidFormat(s.to_string()));
        }
        Ulid::from_string(rest)
            .map(Self)
            .map_err(|_| IdParseError::InvalidUlid(rest.to_string()))
    }
}

impl Default for QuoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", QUOTE_PREFIX, self.0)
    }
}

impl FromStr for QuoteId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for QuoteId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QuoteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let id = QuoteId::new();
        let s = id.to_string();
        assert!(s.starts_with("QUOTE-"));
        assert_eq!(s.len(), 32);
        assert_eq!(QuoteId::parse(&s).unwrap(), id);
        assert_eq!(QuoteId::parse(&s.replacen("QUOTE", "quote", 1)).unwrap(), id);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            QuoteId::parse("nodash"),
            Err(IdParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            QuoteId::parse("REQ-01J9Z3V6T2X8K4M5N7P9Q1R3S5"),
            Err(IdParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            QuoteId::parse("QUOTE-not-a-ulid"),
            Err(IdParseError::InvalidUlid(_))
        ));
    }

    #[test]
    fn test_serde_as_string() {
        let id = QuoteId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let parsed: QuoteId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
