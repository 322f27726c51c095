//! Domain types for the fare planner.
//!
//! This module contains the core domain model types: ticket kinds, the
//! catalogs they belong to, fare classes and travel periods. All types
//! enforce their invariants at construction time, so code that receives
//! these types can trust their validity.

mod catalog;
mod error;
mod fare_class;
mod period;
mod ticket;

pub use catalog::{CatalogBuilder, TicketCatalog, TicketKindSpec};
pub use error::{CatalogError, PeriodError};
pub use fare_class::{FareClass, InvalidFareClass};
pub use period::{DayPolicy, TravelPeriod};
pub use ticket::{InvalidTicketId, TicketId, TicketKind};
