//! Ticket catalogs.
//!
//! A catalog is the price list of one fare class: an ordered, non-empty set
//! of ticket kinds with unique identifiers. Catalog order is significant;
//! the optimizer tries kinds in this order, which keeps results reproducible.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::CatalogError;
use super::ticket::{TicketId, TicketKind};

/// An immutable, validated list of ticket kinds.
///
/// # Examples
///
/// ```
/// use fare_server::domain::TicketCatalog;
///
/// let catalog = TicketCatalog::builder()
///     .kind("1d", "Day ticket", 1, 5_200)
///     .kind("7d", "7-day ticket", 7, 29_000)
///     .build()
///     .unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.max_duration(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TicketCatalog {
    kinds: Vec<TicketKind>,
}

impl TicketCatalog {
    /// Create a catalog from ticket kinds, preserving their order.
    ///
    /// Fails if `kinds` is empty or two kinds share an id.
    pub fn new(kinds: Vec<TicketKind>) -> Result<Self, CatalogError> {
        if kinds.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(kinds.len());
        for kind in &kinds {
            if !seen.insert(kind.id()) {
                return Err(CatalogError::DuplicateId(kind.id().clone()));
            }
        }

        Ok(Self { kinds })
    }

    /// Start building a catalog with a fluent API.
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Ticket kinds in catalog order.
    pub fn kinds(&self) -> &[TicketKind] {
        &self.kinds
    }

    /// Look up a kind by id.
    pub fn get(&self, id: &TicketId) -> Option<&TicketKind> {
        self.kinds.iter().find(|k| k.id() == id)
    }

    /// Position of a kind in catalog order.
    pub fn position(&self, id: &TicketId) -> Option<usize> {
        self.kinds.iter().position(|k| k.id() == id)
    }

    /// Number of ticket kinds. Never zero.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Largest single-ticket duration in the catalog.
    pub fn max_duration(&self) -> u32 {
        self.kinds
            .iter()
            .map(TicketKind::duration_days)
            .max()
            .unwrap_or(0)
    }

    /// Indices (in catalog order) of kinds carrying a usage cap.
    pub fn capped_indices(&self) -> Vec<usize> {
        self.kinds
            .iter()
            .enumerate()
            .filter(|(_, k)| k.is_capped())
            .map(|(i, _)| i)
            .collect()
    }
}

impl TryFrom<Vec<TicketKindSpec>> for TicketCatalog {
    type Error = CatalogError;

    fn try_from(specs: Vec<TicketKindSpec>) -> Result<Self, Self::Error> {
        let kinds = specs
            .into_iter()
            .map(TicketKind::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        TicketCatalog::new(kinds)
    }
}

/// Unvalidated ticket kind, as read from JSON.
///
/// Numeric fields are signed so that negative input reaches validation
/// instead of failing as an opaque parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketKindSpec {
    pub id: String,

    /// Display name; defaults to the id
    #[serde(default)]
    pub label: Option<String>,

    pub duration_days: i64,

    pub price: i64,

    #[serde(default)]
    pub usage_cap: Option<i64>,
}

impl TryFrom<TicketKindSpec> for TicketKind {
    type Error = CatalogError;

    fn try_from(spec: TicketKindSpec) -> Result<Self, Self::Error> {
        let out_of_range = |field| CatalogError::OutOfRange {
            id: spec.id.clone(),
            field,
        };

        let duration_days =
            u32::try_from(spec.duration_days).map_err(|_| out_of_range("duration_days"))?;
        let price = u64::try_from(spec.price).map_err(|_| out_of_range("price"))?;
        let usage_cap = spec
            .usage_cap
            .map(u32::try_from)
            .transpose()
            .map_err(|_| out_of_range("usage_cap"))?;

        let id = TicketId::parse(&spec.id)?;
        let label = spec.label.unwrap_or_else(|| spec.id.clone());

        TicketKind::new(id, label, duration_days, price, usage_cap)
    }
}

/// Builder for catalogs.
///
/// Errors are deferred until [`CatalogBuilder::build`], so chains stay fluent.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    kinds: Vec<TicketKind>,
    error: Option<CatalogError>,
}

impl CatalogBuilder {
    /// Add an uncapped ticket kind.
    pub fn kind(self, id: &str, label: &str, duration_days: u32, price: u64) -> Self {
        self.push(id, label, duration_days, price, None)
    }

    /// Add a ticket kind that may be bought at most `cap` times.
    pub fn capped(self, id: &str, label: &str, duration_days: u32, price: u64, cap: u32) -> Self {
        self.push(id, label, duration_days, price, Some(cap))
    }

    fn push(
        mut self,
        id: &str,
        label: &str,
        duration_days: u32,
        price: u64,
        cap: Option<u32>,
    ) -> Self {
        if self.error.is_some() {
            return self;
        }

        let kind = TicketId::parse(id)
            .map_err(CatalogError::from)
            .and_then(|id| TicketKind::new(id, label, duration_days, price, cap));

        match kind {
            Ok(kind) => self.kinds.push(kind),
            Err(e) => self.error = Some(e),
        }
        self
    }

    /// Build the catalog, reporting the first error encountered.
    pub fn build(self) -> Result<TicketCatalog, CatalogError> {
        match self.error {
            Some(e) => Err(e),
            None => TicketCatalog::new(self.kinds),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> TicketId {
        TicketId::parse(s).unwrap()
    }

    fn spec(id: &str, duration_days: i64, price: i64, usage_cap: Option<i64>) -> TicketKindSpec {
        TicketKindSpec {
            id: id.to_string(),
            label: None,
            duration_days,
            price,
            usage_cap,
        }
    }

    #[test]
    fn builder_preserves_order() {
        let catalog = TicketCatalog::builder()
            .kind("7d", "Week", 7, 35)
            .kind("1d", "Day", 1, 10)
            .capped("3d", "Three days", 3, 20, 1)
            .build()
            .unwrap();

        let ids: Vec<&str> = catalog.kinds().iter().map(|k| k.id().as_str()).collect();
        assert_eq!(ids, vec!["7d", "1d", "3d"]);
        assert_eq!(catalog.position(&id("3d")), Some(2));
        assert_eq!(catalog.capped_indices(), vec![2]);
        assert_eq!(catalog.max_duration(), 7);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(TicketCatalog::new(vec![]), Err(CatalogError::Empty));
        assert_eq!(TicketCatalog::builder().build(), Err(CatalogError::Empty));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = TicketCatalog::builder()
            .kind("1d", "Day", 1, 10)
            .kind("1d", "Other day", 1, 12)
            .build()
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId(id("1d")));
    }

    #[test]
    fn builder_reports_first_error() {
        let err = TicketCatalog::builder()
            .kind("zero", "Nothing", 0, 10)
            .kind("BAD", "Bad id", 1, 10)
            .build()
            .unwrap_err();
        assert_eq!(err, CatalogError::ZeroDuration(id("zero")));
    }

    #[test]
    fn get_by_id() {
        let catalog = TicketCatalog::builder()
            .kind("1d", "Day", 1, 10)
            .build()
            .unwrap();
        assert_eq!(catalog.get(&id("1d")).map(|k| k.price()), Some(10));
        assert!(catalog.get(&id("2d")).is_none());
    }

    #[test]
    fn spec_conversion_validates_ranges() {
        let err = TicketKind::try_from(spec("neg", 1, -5, None)).unwrap_err();
        assert_eq!(
            err,
            CatalogError::OutOfRange {
                id: "neg".into(),
                field: "price"
            }
        );

        let err = TicketKind::try_from(spec("neg", -1, 5, None)).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::OutOfRange {
                field: "duration_days",
                ..
            }
        ));

        let err = TicketKind::try_from(spec("neg", 1, 5, Some(-1))).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::OutOfRange {
                field: "usage_cap",
                ..
            }
        ));

        let err = TicketKind::try_from(spec("zero", 0, 5, None)).unwrap_err();
        assert_eq!(err, CatalogError::ZeroDuration(id("zero")));

        assert!(matches!(
            TicketKind::try_from(spec("Bad Id", 1, 5, None)),
            Err(CatalogError::InvalidId(_))
        ));
    }

    #[test]
    fn spec_label_defaults_to_id() {
        let kind = TicketKind::try_from(spec("1d", 1, 10, Some(0))).unwrap();
        assert_eq!(kind.label(), "1d");
        assert_eq!(kind.usage_cap(), Some(0));
    }

    #[test]
    fn catalog_from_json() {
        let json = r#"[
            {"id": "1d", "label": "Day", "duration_days": 1, "price": 10},
            {"id": "3d", "duration_days": 3, "price": 20, "usage_cap": 1}
        ]"#;
        let specs: Vec<TicketKindSpec> = serde_json::from_str(json).unwrap();
        let catalog = TicketCatalog::try_from(specs).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.kinds()[0].label(), "Day");
        assert_eq!(catalog.kinds()[1].usage_cap(), Some(1));
    }

    #[test]
    fn serializes_as_list() {
        let catalog = TicketCatalog::builder()
            .capped("3d", "Three days", 3, 20, 1)
            .build()
            .unwrap();
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "id": "3d",
                "label": "Three days",
                "duration_days": 3,
                "price": 20,
                "usage_cap": 1
            }])
        );
    }
}
