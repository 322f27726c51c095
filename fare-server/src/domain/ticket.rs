//! Ticket identifiers and ticket kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::CatalogError;

/// Maximum length of a ticket identifier.
const MAX_ID_LEN: usize = 32;

/// Error returned when parsing an invalid ticket identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid ticket id: {reason}")]
pub struct InvalidTicketId {
    reason: &'static str,
}

/// A stable identifier for a ticket kind within a catalog.
///
/// Identifiers are 1 to 32 ASCII characters drawn from lowercase letters,
/// digits, `-` and `_`. Any `TicketId` value is valid by construction.
///
/// # Examples
///
/// ```
/// use fare_server::domain::TicketId;
///
/// let week = TicketId::parse("7d").unwrap();
/// assert_eq!(week.as_str(), "7d");
///
/// // Uppercase and spaces are rejected
/// assert!(TicketId::parse("7D").is_err());
/// assert!(TicketId::parse("seven days").is_err());
/// assert!(TicketId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketId(String);

impl TicketId {
    /// Parse a ticket identifier from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidTicketId> {
        if s.is_empty() {
            return Err(InvalidTicketId {
                reason: "must not be empty",
            });
        }

        if s.len() > MAX_ID_LEN {
            return Err(InvalidTicketId {
                reason: "must be at most 32 characters",
            });
        }

        let valid = s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_');
        if !valid {
            return Err(InvalidTicketId {
                reason: "must contain only a-z, 0-9, '-' or '_'",
            });
        }

        Ok(TicketId(s.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TicketId {
    type Error = InvalidTicketId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        TicketId::parse(&s)
    }
}

impl From<TicketId> for String {
    fn from(id: TicketId) -> Self {
        id.0
    }
}

impl fmt::Debug for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TicketId({})", self.0)
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A purchasable ticket: fixed coverage for a fixed price.
///
/// `duration_days` is always positive. `price` is in the smallest currency
/// unit (öre for the built-in fare tables). A `usage_cap` of `None` means
/// the kind may be bought any number of times; `Some(0)` means never.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketKind {
    id: TicketId,
    label: String,
    duration_days: u32,
    price: u64,
    usage_cap: Option<u32>,
}

impl TicketKind {
    /// Create a ticket kind, rejecting a zero duration.
    pub fn new(
        id: TicketId,
        label: impl Into<String>,
        duration_days: u32,
        price: u64,
        usage_cap: Option<u32>,
    ) -> Result<Self, CatalogError> {
        if duration_days == 0 {
            return Err(CatalogError::ZeroDuration(id));
        }

        Ok(Self {
            id,
            label: label.into(),
            duration_days,
            price,
            usage_cap,
        })
    }

    pub fn id(&self) -> &TicketId {
        &self.id
    }

    /// Human-readable name, e.g. "7-day ticket".
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn usage_cap(&self) -> Option<u32> {
        self.usage_cap
    }

    /// Returns true if this kind has a usage cap.
    pub fn is_capped(&self) -> bool {
        self.usage_cap.is_some()
    }
}
