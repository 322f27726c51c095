//! Askama templates for the web frontend.

use askama::Template;

use crate::cache::Plan;
use crate::domain::FareClass;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with planning form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub fare_classes: Vec<FareClassOption>,
    pub max_days: u32,
}

/// About page.
#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate;

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Plan results fragment.
#[derive(Template)]
#[template(path = "plan_results.html")]
pub struct PlanResultsTemplate {
    pub plan: PlanView,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A fare class choice in the form.
#[derive(Debug, Clone)]
pub struct FareClassOption {
    pub value: String,
    pub name: String,
}

impl FareClassOption {
    pub fn from_class(class: FareClass) -> Self {
        let name = match class {
            FareClass::Standard => "Standard",
            FareClass::Discounted => "Discounted",
        };
        Self {
            value: class.as_str().to_string(),
            name: name.to_string(),
        }
    }
}

/// Plan view model for templates.
#[derive(Debug, Clone)]
pub struct PlanView {
    pub fare_class: String,
    pub required_days: u32,
    pub total_days_covered: u32,
    pub overshoot: u32,
    pub total_cost: String,
    pub lines: Vec<TicketLineView>,
}

impl PlanView {
    /// Create from a cached plan.
    pub fn from_plan(plan: &Plan) -> Self {
        let solution = &plan.solution;

        let lines = solution
            .lines(&plan.catalog)
            .into_iter()
            .map(|(kind, count)| TicketLineView {
                count,
                label: kind.label().to_string(),
                days: kind.duration_days() * count,
                subtotal: format_price(kind.price() * u64::from(count)),
            })
            .collect();

        Self {
            fare_class: plan.fare_class.to_string(),
            required_days: solution.required_days,
            total_days_covered: solution.total_days_covered,
            overshoot: solution.overshoot(),
            total_cost: format_price(solution.total_cost),
            lines,
        }
    }

    /// e.g. "Covers 8 days (1 more than needed)"
    pub fn coverage_summary(&self) -> String {
        match self.overshoot {
            0 => format!("Covers exactly {} days", self.total_days_covered),
            1 => format!("Covers {} days (1 more than needed)", self.total_days_covered),
            n => format!(
                "Covers {} days ({} more than needed)",
                self.total_days_covered, n
            ),
        }
    }
}

/// One purchased ticket kind.
#[derive(Debug, Clone)]
pub struct TicketLineView {
    pub count: u32,
    pub label: String,
    /// Days covered by all tickets on this line
    pub days: u32,
    pub subtotal: String,
}

/// Format a price in öre as kronor.
///
/// Whole amounts drop the decimals: 5200 is "52 kr", 5250 is "52.50 kr".
pub fn format_price(ore: u64) -> String {
    let kronor = ore / 100;
    let rest = ore % 100;
    if rest == 0 {
        format!("{kronor} kr")
    } else {
        format!("{kronor}.{rest:02} kr")
    }
}
