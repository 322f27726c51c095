//! Configuration for the coverage optimizer.

/// Limits applied before a search starts.
///
/// The search space grows with the requested day count and with the usage
/// caps in the catalog, so oversized requests are rejected up front.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Largest accepted `required_days`.
    pub max_required_days: u32,

    /// Upper bound on the estimated number of search states.
    /// Requests whose estimate exceeds this are rejected.
    pub max_states: u64,
}

impl PlannerConfig {
    /// Create a new configuration with the given limits.
    pub fn new(max_required_days: u32, max_states: u64) -> Self {
        Self {
            max_required_days,
            max_states,
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_required_days: 3660, // ten years
            max_states: 5_000_000,
        }
    }
}
