//! Fare tables: ticket catalogs per fare class.
//!
//! Prices are configuration, not code. A `FareTables` value is built once
//! at startup, either from the built-in SL price lists or from a JSON file,
//! and handed to whatever needs a catalog.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{CatalogError, FareClass, TicketCatalog, TicketKindSpec};

/// Error loading fare tables.
#[derive(Debug, thiserror::Error)]
pub enum FareTableError {
    /// File could not be read
    #[error("failed to read fare tables from {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// JSON was malformed
    #[error("invalid fare table JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A catalog failed validation
    #[error("invalid {class} catalog: {source}")]
    Catalog {
        class: FareClass,
        source: CatalogError,
    },

    /// No catalogs were defined
    #[error("fare tables define no fare classes")]
    Empty,
}

/// Ticket catalogs keyed by fare class.
#[derive(Debug, Clone, Default)]
pub struct FareTables {
    catalogs: HashMap<FareClass, Arc<TicketCatalog>>,
}

impl FareTables {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the catalog for a fare class, replacing any existing one.
    pub fn insert(&mut self, class: FareClass, catalog: TicketCatalog) {
        self.catalogs.insert(class, Arc::new(catalog));
    }

    /// Get the catalog for a fare class.
    pub fn get(&self, class: FareClass) -> Option<Arc<TicketCatalog>> {
        self.catalogs.get(&class).cloned()
    }

    /// Fare classes with a catalog, in display order.
    pub fn classes(&self) -> Vec<FareClass> {
        FareClass::ALL
            .into_iter()
            .filter(|c| self.catalogs.contains_key(c))
            .collect()
    }

    /// Returns the number of fare classes with a catalog.
    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    /// Returns true if no catalogs are defined.
    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }

    /// Parse fare tables from JSON.
    ///
    /// The document maps fare class names to lists of ticket kinds:
    ///
    /// ```
    /// use fare_server::domain::FareClass;
    /// use fare_server::fares::FareTables;
    ///
    /// let tables = FareTables::from_json(r#"{
    ///     "standard": [
    ///         {"id": "1d", "label": "Day ticket", "duration_days": 1, "price": 5200},
    ///         {"id": "24h", "duration_days": 3, "price": 11000, "usage_cap": 1}
    ///     ]
    /// }"#).unwrap();
    ///
    /// assert_eq!(tables.get(FareClass::Standard).unwrap().len(), 2);
    /// assert!(tables.get(FareClass::Discounted).is_none());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, FareTableError> {
        let raw: HashMap<FareClass, Vec<TicketKindSpec>> = serde_json::from_str(json)?;
        if raw.is_empty() {
            return Err(FareTableError::Empty);
        }

        let mut tables = FareTables::new();
        for (class, specs) in raw {
            let catalog = TicketCatalog::try_from(specs)
                .map_err(|source| FareTableError::Catalog { class, source })?;
            tables.insert(class, catalog);
        }
        Ok(tables)
    }

    /// Read and parse a JSON fare table file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FareTableError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FareTableError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The built-in standard and discounted price lists.
    pub fn builtin() -> Self {
        let mut tables = FareTables::new();
        tables.insert(FareClass::Standard, standard_catalog());
        tables.insert(FareClass::Discounted, discounted_catalog());
        tables
    }
}

/// Full-price SL tickets. Prices in öre.
///
/// A travel day is two single tickets (there and back). The 24-hour ticket
/// is counted as three days of coverage and may only be bought once.
pub fn standard_catalog() -> TicketCatalog {
    sl_catalog([5_200, 11_000, 29_000, 65_000, 188_000, 683_000])
}

/// Reduced-price SL tickets. Prices in öre.
pub fn discounted_catalog() -> TicketCatalog {
    sl_catalog([3_400, 7_500, 19_500, 43_000, 124_000, 453_000])
}

fn sl_catalog(prices: [u64; 6]) -> TicketCatalog {
    let [day, h24, week, month, quarter, year] = prices;

    let catalog = TicketCatalog::builder()
        .kind("1d", "1 day (2 single tickets)", 1, day)
        .capped("24h", "24-hour ticket", 3, h24, 1)
        .kind("7d", "7-day ticket", 7, week)
        .kind("30d", "30-day ticket", 30, month)
        .kind("90d", "90-day ticket", 90, quarter)
        .kind("365d", "Annual ticket", 365, year)
        .build();

    match catalog {
        Ok(catalog) => catalog,
        // Built-in ids and durations are constants that satisfy validation
        Err(e) => unreachable!("built-in catalog is invalid: {e}"),
    }
}
