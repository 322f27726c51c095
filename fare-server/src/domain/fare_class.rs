//! Fare class type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown fare class.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fare class: {0}")]
pub struct InvalidFareClass(String);

/// The price list a traveller is entitled to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FareClass {
    /// Full-price adult fares
    Standard,
    /// Reduced fares (youth, students, seniors)
    Discounted,
}

impl FareClass {
    /// All fare classes, in display order.
    pub const ALL: [FareClass; 2] = [FareClass::Standard, FareClass::Discounted];

    /// Parse a fare class, ignoring case and surrounding whitespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use fare_server::domain::FareClass;
    ///
    /// assert_eq!(FareClass::parse("standard").unwrap(), FareClass::Standard);
    /// assert_eq!(FareClass::parse(" Discounted ").unwrap(), FareClass::Discounted);
    /// assert!(FareClass::parse("first").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidFareClass> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(FareClass::Standard),
            "discounted" => Ok(FareClass::Discounted),
            _ => Err(InvalidFareClass(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FareClass::Standard => "standard",
            FareClass::Discounted => "discounted",
        }
    }
}

impl FromStr for FareClass {
    type Err = InvalidFareClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FareClass::parse(s)
    }
}

impl fmt::Display for FareClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(FareClass::parse("STANDARD").unwrap(), FareClass::Standard);
        assert_eq!(FareClass::parse("Discounted").unwrap(), FareClass::Discounted);
    }

    #[test]
    fn rejects_unknown() {
        let err = FareClass::parse("business").unwrap_err();
        assert_eq!(err.to_string(), "unknown fare class: business");
        assert!(FareClass::parse("").is_err());
    }

    #[test]
    fn display_roundtrip() {
        for class in FareClass::ALL {
            assert_eq!(FareClass::parse(&class.to_string()).unwrap(), class);
        }
    }

    #[test]
    fn serde_lowercase() {
        let json = serde_json::to_string(&FareClass::Discounted).unwrap();
        assert_eq!(json, "\"discounted\"");
        let parsed: FareClass = serde_json::from_str("\"standard\"").unwrap();
        assert_eq!(parsed, FareClass::Standard);
    }
}
