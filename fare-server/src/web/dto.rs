//! Data transfer objects for web requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::cache::Plan;
use crate::domain::{DayPolicy, FareClass, TicketCatalog, TicketKind, TravelPeriod};

use super::templates::format_price;

/// Request to plan fares.
///
/// Either `days`, or both `start` and `end`, must be given.
#[derive(Debug, Deserialize)]
pub struct PlanFaresRequest {
    /// Fare class name ("standard" or "discounted")
    pub fare_class: String,

    /// Number of travel days
    pub days: Option<i64>,

    /// First day of travel (YYYY-MM-DD)
    pub start: Option<NaiveDate>,

    /// Last day of travel, inclusive (YYYY-MM-DD)
    pub end: Option<NaiveDate>,

    /// Skip Saturdays and Sundays when counting a date range
    #[serde(default)]
    pub weekdays_only: bool,
}

impl PlanFaresRequest {
    /// Build the travel period described by this request.
    pub fn period(&self) -> Result<TravelPeriod, String> {
        match (self.days, self.start, self.end) {
            (Some(days), None, None) => {
                let days = u32::try_from(days)
                    .ok()
                    .filter(|d| *d > 0)
                    .ok_or_else(|| format!("Days must be a positive number, got {days}"))?;
                Ok(TravelPeriod::Days(days))
            }
            (None, Some(start), Some(end)) => {
                let policy = if self.weekdays_only {
                    DayPolicy::WeekdaysOnly
                } else {
                    DayPolicy::AllDays
                };
                Ok(TravelPeriod::Range { start, end, policy })
            }
            _ => Err("Specify either days, or both start and end dates".to_string()),
        }
    }
}

/// A ticket line in a plan.
#[derive(Debug, Serialize)]
pub struct TicketLineResult {
    /// Ticket kind id
    pub id: String,

    /// Ticket kind name
    pub label: String,

    /// Number of tickets to buy
    pub count: u32,

    /// Days covered by one ticket
    pub duration_days: u32,

    /// Price of one ticket (smallest currency unit)
    pub unit_price: u64,

    /// `count * unit_price`
    pub subtotal: u64,
}

/// Response for fare planning.
#[derive(Debug, Serialize)]
pub struct PlanFaresResponse {
    pub fare_class: FareClass,

    /// Days that needed coverage
    pub required_days: u32,

    /// Total price (smallest currency unit)
    pub total_cost: u64,

    /// Total price formatted for display, e.g. "214 kr"
    pub total_cost_display: String,

    /// Days covered by the tickets
    pub total_days_covered: u32,

    /// Days covered beyond the requirement
    pub overshoot: u32,

    /// Tickets to buy, in catalog order
    pub tickets: Vec<TicketLineResult>,
}

impl PlanFaresResponse {
    /// Create from a cached plan.
    pub fn from_plan(plan: &Plan) -> Self {
        let solution = &plan.solution;

        let tickets = solution
            .lines(&plan.catalog)
            .into_iter()
            .map(|(kind, count)| TicketLineResult {
                id: kind.id().to_string(),
                label: kind.label().to_string(),
                count,
                duration_days: kind.duration_days(),
                unit_price: kind.price(),
                subtotal: kind.price() * u64::from(count),
            })
            .collect();

        Self {
            fare_class: plan.fare_class,
            required_days: solution.required_days,
            total_cost: solution.total_cost,
            total_cost_display: format_price(solution.total_cost),
            total_days_covered: solution.total_days_covered,
            overshoot: solution.overshoot(),
            tickets,
        }
    }
}

/// A ticket kind in a catalog listing.
#[derive(Debug, Serialize)]
pub struct CatalogTicketResult {
    pub id: String,
    pub label: String,
    pub duration_days: u32,
    pub price: u64,
    pub price_display: String,
    pub usage_cap: Option<u32>,
}

impl CatalogTicketResult {
    /// Create from a domain TicketKind.
    pub fn from_kind(kind: &TicketKind) -> Self {
        Self {
            id: kind.id().to_string(),
            label: kind.label().to_string(),
            duration_days: kind.duration_days(),
            price: kind.price(),
            price_display: format_price(kind.price()),
            usage_cap: kind.usage_cap(),
        }
    }
}

/// Response for a catalog lookup.
#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub fare_class: FareClass,
    pub tickets: Vec<CatalogTicketResult>,
}

impl CatalogResponse {
    /// Create from a fare class and its catalog.
    pub fn from_catalog(fare_class: FareClass, catalog: &TicketCatalog) -> Self {
        Self {
            fare_class,
            tickets: catalog
                .kinds()
                .iter()
                .map(CatalogTicketResult::from_kind)
                .collect(),
        }
    }
}

/// Response listing available fare classes.
#[derive(Debug, Serialize)]
pub struct FareClassesResponse {
    pub fare_classes: Vec<FareClass>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TicketId;
    use crate::fares::standard_catalog;
    use crate::planner::CoverageSolution;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn request(json: &str) -> PlanFaresRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn period_from_days() {
        let req = request(r#"{"fare_class": "standard", "days": 12}"#);
        assert_eq!(req.period().unwrap(), TravelPeriod::Days(12));
    }

    #[test]
    fn period_rejects_non_positive_days() {
        let req = request(r#"{"fare_class": "standard", "days": -4}"#);
        assert_eq!(
            req.period().unwrap_err(),
            "Days must be a positive number, got -4"
        );

        let req = request(r#"{"fare_class": "standard", "days": 0}"#);
        assert!(req.period().is_err());
    }

    #[test]
    fn period_from_range() {
        let req = request(
            r#"{"fare_class": "standard", "start": "2024-03-04", "end": "2024-03-10", "weekdays_only": true}"#,
        );
        assert_eq!(
            req.period().unwrap(),
            TravelPeriod::Range {
                start: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
                policy: DayPolicy::WeekdaysOnly,
            }
        );
    }

    #[test]
    fn period_requires_one_form() {
        let req = request(r#"{"fare_class": "standard"}"#);
        assert!(req.period().is_err());

        let req = request(r#"{"fare_class": "standard", "days": 3, "start": "2024-03-04"}"#);
        assert!(req.period().is_err());

        let req = request(r#"{"fare_class": "standard", "start": "2024-03-04"}"#);
        assert!(req.period().is_err());
    }

    #[test]
    fn plan_response_from_plan() {
        let catalog = Arc::new(standard_catalog());
        let solution = CoverageSolution {
            total_cost: 21_400,
            selection: BTreeMap::from([
                (TicketId::parse("1d").unwrap(), 2),
                (TicketId::parse("24h").unwrap(), 1),
            ]),
            total_days_covered: 5,
            required_days: 5,
        };
        let plan = Plan {
            fare_class: FareClass::Standard,
            catalog,
            solution: Arc::new(solution),
        };

        let response = PlanFaresResponse::from_plan(&plan);

        assert_eq!(response.total_cost_display, "214 kr");
        assert_eq!(response.overshoot, 0);
        assert_eq!(response.tickets.len(), 2);
        assert_eq!(response.tickets[0].id, "1d");
        assert_eq!(response.tickets[0].count, 2);
        assert_eq!(response.tickets[0].subtotal, 10_400);
        assert_eq!(response.tickets[1].label, "24-hour ticket");

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["fare_class"], "standard");
        assert_eq!(json["total_cost"], 21_400);
    }

    #[test]
    fn catalog_response_lists_all_kinds() {
        let response = CatalogResponse::from_catalog(FareClass::Standard, &standard_catalog());
        assert_eq!(response.tickets.len(), 6);
        assert_eq!(response.tickets[1].usage_cap, Some(1));
        assert_eq!(response.tickets[5].price_display, "6830 kr");
    }
}
