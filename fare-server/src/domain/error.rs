//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from planning and HTTP errors.

use super::{InvalidTicketId, TicketId};

/// Errors from building ticket kinds and catalogs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Catalog has no ticket kinds
    #[error("catalog must contain at least one ticket kind")]
    Empty,

    /// Two kinds share an identifier
    #[error("duplicate ticket id: {0}")]
    DuplicateId(TicketId),

    /// Identifier failed validation
    #[error(transparent)]
    InvalidId(#[from] InvalidTicketId),

    /// A kind grants no coverage
    #[error("ticket {0} must cover at least one day")]
    ZeroDuration(TicketId),

    /// A numeric field was negative or too large
    #[error("ticket {id}: {field} out of range")]
    OutOfRange { id: String, field: &'static str },
}

/// Errors from resolving a travel period into a day count.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeriodError {
    /// Range ends before it starts
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    /// Period resolves to zero travel days
    #[error("period contains no travel days")]
    NoTravelDays,

    /// Period is too long to count
    #[error("period is too long")]
    TooLong,
}
