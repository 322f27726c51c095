//! The result of a coverage search.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{TicketCatalog, TicketId, TicketKind};

/// A cheapest set of tickets covering the requested days.
///
/// `selection` is an ordered map so that equal solutions compare, print and
/// serialize identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageSolution {
    /// Sum of the prices of all selected tickets.
    pub total_cost: u64,

    /// Number of tickets to buy, per kind. Kinds not bought are absent.
    pub selection: BTreeMap<TicketId, u32>,

    /// Days covered by the selection.
    pub total_days_covered: u32,

    /// Days the traveller asked for.
    pub required_days: u32,
}

impl CoverageSolution {
    /// Days covered beyond what was asked for.
    pub fn overshoot(&self) -> u32 {
        self.total_days_covered.saturating_sub(self.required_days)
    }

    /// Number of units bought of a kind.
    pub fn count(&self, id: &TicketId) -> u32 {
        self.selection.get(id).copied().unwrap_or(0)
    }

    /// Total number of tickets bought.
    pub fn ticket_count(&self) -> u32 {
        self.selection.values().sum()
    }

    /// Pair each purchased kind with its count, in catalog order.
    ///
    /// Ids missing from `catalog` are skipped.
    pub fn lines<'c>(&self, catalog: &'c TicketCatalog) -> Vec<(&'c TicketKind, u32)> {
        catalog
            .kinds()
            .iter()
            .filter_map(|kind| {
                let count = self.count(kind.id());
                (count > 0).then_some((kind, count))
            })
            .collect()
    }
}
