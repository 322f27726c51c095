//! Fare planner using a dynamic-programming coverage search.
//!
//! This module implements the core planning algorithm that answers:
//! "I need to travel on this many days - which tickets should I buy?"
//!
//! The search explores combinations of tickets over a bounded horizon of
//! days, honouring per-kind usage caps, and reconstructs the cheapest
//! combination from recorded predecessors.

mod config;
mod optimizer;
mod solution;


pub use config::PlannerConfig;
pub use optimizer::{CoverageOptimizer, PlanError};
pub use solution::CoverageSolution;
