//! Minimum-cost ticket coverage search.
//!
//! Finds the cheapest multiset of tickets whose durations add up to at least
//! the requested number of days.
//!
//! The search is a shortest-path dynamic program over states
//! `(days covered, uses of each capped kind)`. Buying a ticket is an edge
//! that strictly increases the days covered, so visiting states in
//! increasing order of days is a topological order and one relaxation pass
//! suffices.
//!
//! Only states short of the requirement are expanded. A ticket bought from
//! such a state lands at most `max_duration - 1` days past the requirement,
//! which bounds the horizon at `required_days + max_duration`.

use std::collections::BTreeMap;
use std::ops::Bound;

use tracing::{debug, trace};

use crate::domain::{CatalogError, PeriodError, TicketCatalog};

use super::config::PlannerConfig;
use super::solution::CoverageSolution;

/// Error from coverage search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Request or catalog failed validation
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No ticket combination reaches the requested days
    #[error("no ticket combination covers {required_days} days")]
    Infeasible { required_days: u32 },
}

impl From<CatalogError> for PlanError {
    fn from(e: CatalogError) -> Self {
        PlanError::InvalidRequest(e.to_string())
    }
}

impl From<PeriodError> for PlanError {
    fn from(e: PeriodError) -> Self {
        PlanError::InvalidRequest(e.to_string())
    }
}

/// Search state.
///
/// Ordered by days first, so iterating a map of states in key order visits
/// them topologically. `usage` has one counter per capped kind, in catalog
/// order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct CoverageState {
    days: u32,
    usage: Vec<u32>,
}

impl CoverageState {
    fn start(capped_kinds: usize) -> Self {
        Self {
            days: 0,
            usage: vec![0; capped_kinds],
        }
    }

    fn total_uses(&self) -> u32 {
        self.usage.iter().sum()
    }
}

/// Cheapest known way to reach a state.
#[derive(Debug)]
struct Reached {
    cost: u64,

    /// Previous state and the catalog index of the ticket bought from it.
    /// `None` only for the start state.
    via: Option<(CoverageState, usize)>,
}

/// Coverage optimizer.
pub struct CoverageOptimizer<'a> {
    config: &'a PlannerConfig,
}

impl<'a> CoverageOptimizer<'a> {
    /// Create a new optimizer.
    pub fn new(config: &'a PlannerConfig) -> Self {
        Self { config }
    }

    /// Find the cheapest tickets covering at least `required_days` days.
    ///
    /// Ties on cost go to the smallest overshoot, then to the fewest uses of
    /// capped kinds, then to the lexicographically smallest usage of capped
    /// kinds in catalog order. That last rule favours later capped kinds:
    /// with two otherwise identical capped kinds, the second one is picked.
    /// Among equal states, the predecessor found first wins; kinds are tried
    /// in catalog order. The same input always produces the same solution.
    ///
    /// A path whose running cost overflows `u64` fails the whole request
    /// with [`PlanError::InvalidRequest`].
    pub fn solve(
        &self,
        catalog: &TicketCatalog,
        required_days: u32,
    ) -> Result<CoverageSolution, PlanError> {
        self.validate(catalog, required_days)?;

        let kinds = catalog.kinds();
        let capped = catalog.capped_indices();

        // Position of each kind's counter in the usage vector.
        let mut slots: Vec<Option<usize>> = vec![None; kinds.len()];
        for (slot, &kind_idx) in capped.iter().enumerate() {
            slots[kind_idx] = Some(slot);
        }

        let start = CoverageState::start(capped.len());
        let mut table: BTreeMap<CoverageState, Reached> = BTreeMap::new();
        table.insert(
            start.clone(),
            Reached {
                cost: 0,
                via: None,
            },
        );

        let mut explored = 0usize;
        let mut cursor = Some(start);

        while let Some(state) = cursor {
            // Everything from here on already meets the requirement.
            if state.days >= required_days {
                break;
            }
            explored += 1;

            let cost = match table.get(&state) {
                Some(reached) => reached.cost,
                None => break,
            };

            for (kind_idx, kind) in kinds.iter().enumerate() {
                let mut usage = state.usage.clone();
                if let Some(slot) = slots[kind_idx] {
                    let cap = kind.usage_cap().unwrap_or(u32::MAX);
                    if usage[slot] >= cap {
                        continue;
                    }
                    usage[slot] += 1;
                }

                let target = CoverageState {
                    days: state.days + kind.duration_days(),
                    usage,
                };
                let candidate = cost.checked_add(kind.price()).ok_or_else(|| {
                    PlanError::InvalidRequest("total price overflows".to_string())
                })?;

                let improves = table
                    .get(&target)
                    .is_none_or(|existing| candidate < existing.cost);
                if improves {
                    trace!(
                        from = state.days,
                        to = target.days,
                        ticket = %kind.id(),
                        cost = candidate,
                        "relaxed edge"
                    );
                    table.insert(
                        target,
                        Reached {
                            cost: candidate,
                            via: Some((state.clone(), kind_idx)),
                        },
                    );
                }
            }

            cursor = table
                .range((Bound::Excluded(&state), Bound::Unbounded))
                .next()
                .map(|(next, _)| next.clone());
        }

        // States at or past the requirement sort after this key.
        let threshold = CoverageState {
            days: required_days,
            usage: Vec::new(),
        };
        let (best, best_reached) = table
            .range(threshold..)
            .min_by(|(a, ra), (b, rb)| {
                ra.cost
                    .cmp(&rb.cost)
                    .then(a.days.cmp(&b.days))
                    .then(a.total_uses().cmp(&b.total_uses()))
                    .then(a.usage.cmp(&b.usage))
            })
            .ok_or(PlanError::Infeasible { required_days })?;

        // Walk predecessors back to the start.
        let mut counts = vec![0u32; kinds.len()];
        let mut step = best_reached.via.as_ref();
        while let Some((prev, kind_idx)) = step {
            counts[*kind_idx] += 1;
            step = table.get(prev).and_then(|r| r.via.as_ref());
        }

        let selection = kinds
            .iter()
            .zip(&counts)
            .filter(|(_, n)| **n > 0)
            .map(|(kind, n)| (kind.id().clone(), *n))
            .collect();

        debug!(
            required_days,
            horizon = required_days + catalog.max_duration(),
            states = table.len(),
            explored,
            cost = best_reached.cost,
            days = best.days,
            "coverage search complete"
        );

        Ok(CoverageSolution {
            total_cost: best_reached.cost,
            selection,
            total_days_covered: best.days,
            required_days,
        })
    }

    /// Reject requests that are empty or too large to search.
    fn validate(&self, catalog: &TicketCatalog, required_days: u32) -> Result<(), PlanError> {
        if required_days == 0 {
            return Err(PlanError::InvalidRequest(
                "required days must be positive".to_string(),
            ));
        }

        if required_days > self.config.max_required_days {
            return Err(PlanError::InvalidRequest(format!(
                "required days {} exceeds the limit of {}",
                required_days, self.config.max_required_days
            )));
        }

        if catalog.is_empty() {
            return Err(CatalogError::Empty.into());
        }

        if required_days.checked_add(catalog.max_duration()).is_none() {
            return Err(PlanError::InvalidRequest(
                "ticket duration too large".to_string(),
            ));
        }

        let estimate = estimated_states(catalog, required_days);
        if estimate > self.config.max_states {
            return Err(PlanError::InvalidRequest(format!(
                "search space too large ({} states)",
                estimate
            )));
        }

        Ok(())
    }
}

/// Upper bound on the number of states a search can create.
///
/// A capped kind of duration `d` is never bought more than
/// `ceil(required_days / d)` times, since only states short of the
/// requirement are expanded, so that count tightens its cap.
fn estimated_states(catalog: &TicketCatalog, required_days: u32) -> u64 {
    let horizon = u64::from(required_days) + u64::from(catalog.max_duration()) + 1;

    catalog
        .kinds()
        .iter()
        .filter_map(|kind| {
            let cap = kind.usage_cap()?;
            let useful = required_days.div_ceil(kind.duration_days());
            Some(u64::from(cap.min(useful)) + 1)
        })
        .fold(horizon, u64::saturating_mul)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(kinds: &[(&str, u32, u64, Option<u32>)]) -> TicketCatalog {
        kinds
            .iter()
            .fold(TicketCatalog::builder(), |b, (id, d, p, cap)| match cap {
                Some(c) => b.capped(id, id, *d, *p, *c),
                None => b.kind(id, id, *d, *p),
            })
            .build()
            .unwrap()
    }

    #[test]
    fn state_order_is_days_first() {
        let a = CoverageState {
            days: 1,
            usage: vec![5],
        };
        let b = CoverageState {
            days: 2,
            usage: vec![0],
        };
        assert!(a < b);
        assert!(
            CoverageState {
                days: 2,
                usage: vec![]
            } < b
        );
    }

    #[test]
    fn estimate_uncapped_is_horizon() {
        let c = catalog(&[("a", 1, 10, None), ("c", 7, 35, None)]);
        assert_eq!(estimated_states(&c, 10), 18);
    }

    #[test]
    fn estimate_tightens_large_caps() {
        // Cap 100 on a 3-day kind is worth at most ceil(10 / 3) = 4 uses
        let c = catalog(&[("a", 1, 10, None), ("b", 3, 20, Some(100))]);
        assert_eq!(estimated_states(&c, 10), 14 * 5);
    }

    #[test]
    fn rejects_zero_days() {
        let config = PlannerConfig::default();
        let c = catalog(&[("a", 1, 10, None)]);
        let err = CoverageOptimizer::new(&config).solve(&c, 0).unwrap_err();
        assert_eq!(
            err,
            PlanError::InvalidRequest("required days must be positive".into())
        );
    }

    #[test]
    fn rejects_oversized_requests() {
        let config = PlannerConfig::new(100, 1_000_000);
        let c = catalog(&[("a", 1, 10, None)]);
        let err = CoverageOptimizer::new(&config).solve(&c, 101).unwrap_err();
        assert!(matches!(err, PlanError::InvalidRequest(_)));
    }

    #[test]
    fn rejects_oversized_state_space() {
        let config = PlannerConfig::new(1000, 500);
        let c = catalog(&[("a", 1, 10, Some(1000)), ("b", 1, 10, Some(1000))]);
        let err = CoverageOptimizer::new(&config).solve(&c, 100).unwrap_err();
        assert!(err.to_string().contains("search space too large"));
    }

    #[test]
    fn rejects_overflowing_durations() {
        let config = PlannerConfig::default();
        let c = catalog(&[("huge", u32::MAX, 10, None)]);
        let err = CoverageOptimizer::new(&config).solve(&c, 10).unwrap_err();
        assert_eq!(
            err,
            PlanError::InvalidRequest("ticket duration too large".into())
        );
    }

    #[test]
    fn rejects_overflowing_prices() {
        let config = PlannerConfig::default();
        let c = catalog(&[("pricey", 1, 9_000_000_000_000_000_000, None)]);
        let err = CoverageOptimizer::new(&config).solve(&c, 3).unwrap_err();
        assert_eq!(err, PlanError::InvalidRequest("total price overflows".into()));

        // Two tickets still fit
        let solution = CoverageOptimizer::new(&config).solve(&c, 2).unwrap();
        assert_eq!(solution.total_cost, 18_000_000_000_000_000_000);
    }

    #[test]
    fn error_display() {
        let err = PlanError::Infeasible { required_days: 3 };
        assert_eq!(err.to_string(), "no ticket combination covers 3 days");

        let err: PlanError = CatalogError::Empty.into();
        assert_eq!(
            err.to_string(),
            "invalid request: catalog must contain at least one ticket kind"
        );

        let err: PlanError = PeriodError::NoTravelDays.into();
        assert_eq!(
            err.to_string(),
            "invalid request: period contains no travel days"
        );
    }
}
