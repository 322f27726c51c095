//! Web layer for the fare planner.
//!
//! Provides HTTP endpoints for browsing fare tables and planning fares.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
