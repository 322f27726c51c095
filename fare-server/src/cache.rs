//! Caching layer for planned fares.
//!
//! A plan depends only on the fare class catalog and the number of days, and
//! catalogs do not change while the server runs, so solutions can be reused
//! across requests. Day counts are bounded by `PlannerConfig`, which bounds
//! cache cardinality per fare class.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{FareClass, TicketCatalog, TravelPeriod};
use crate::fares::FareTables;
use crate::planner::{CoverageOptimizer, CoverageSolution, PlanError, PlannerConfig};

/// Cache key for plans: (fare class, required days).
type PlanKey = (FareClass, u32);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// A plan together with the catalog it was computed from.
#[derive(Debug, Clone)]
pub struct Plan {
    pub fare_class: FareClass,
    pub catalog: Arc<TicketCatalog>,
    pub solution: Arc<CoverageSolution>,
}

/// Fare planner with caching.
///
/// Wraps the fare tables and optimizer configuration and caches solutions.
/// Failed searches are not cached.
pub struct CachedPlanner {
    tables: FareTables,
    config: PlannerConfig,
    plans: MokaCache<PlanKey, Arc<CoverageSolution>>,
}

impl CachedPlanner {
    /// Create a new cached planner.
    pub fn new(tables: FareTables, config: PlannerConfig, cache_config: &CacheConfig) -> Self {
        let plans = MokaCache::builder()
            .time_to_live(cache_config.ttl)
            .max_capacity(cache_config.max_capacity)
            .build();

        Self {
            tables,
            config,
            plans,
        }
    }

    /// The fare tables this planner draws catalogs from.
    pub fn tables(&self) -> &FareTables {
        &self.tables
    }

    /// The optimizer limits in use.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plan the cheapest tickets for `required_days` in a fare class,
    /// using the cache if available.
    pub async fn plan(
        &self,
        fare_class: FareClass,
        required_days: u32,
    ) -> Result<Plan, PlanError> {
        let catalog = self.tables.get(fare_class).ok_or_else(|| {
            PlanError::InvalidRequest(format!("no catalog for fare class {fare_class}"))
        })?;

        let key = (fare_class, required_days);

        // Try cache first
        if let Some(solution) = self.plans.get(&key).await {
            debug!(%fare_class, required_days, "plan cache hit");
            return Ok(Plan {
                fare_class,
                catalog,
                solution,
            });
        }

        let solution = CoverageOptimizer::new(&self.config).solve(&catalog, required_days)?;
        let solution = Arc::new(solution);

        // Cache and return
        self.plans.insert(key, solution.clone()).await;

        Ok(Plan {
            fare_class,
            catalog,
            solution,
        })
    }

    /// Resolve a travel period to a day count and plan for it.
    pub async fn plan_period(
        &self,
        fare_class: FareClass,
        period: &TravelPeriod,
    ) -> Result<Plan, PlanError> {
        let required_days = period.resolve()?;
        self.plan(fare_class, required_days).await
    }
}
