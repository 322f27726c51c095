//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::domain::FareClass;
use crate::planner::PlanError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/about", get(about_page))
        .route("/api/catalogs", get(list_catalogs))
        .route("/api/catalogs/:fare_class", get(get_catalog))
        .route("/fares/plan", post(plan_fares))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with planning form.
async fn index_page(State(state): State<AppState>) -> impl IntoResponse {
    let template = IndexTemplate {
        fare_classes: state
            .planner
            .tables()
            .classes()
            .into_iter()
            .map(FareClassOption::from_class)
            .collect(),
        max_days: state.planner.config().max_required_days,
    };

    Html(
        template
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// About page.
async fn about_page() -> impl IntoResponse {
    Html(
        AboutTemplate
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e)),
    )
}

/// List fare classes with a catalog.
async fn list_catalogs(State(state): State<AppState>) -> Json<FareClassesResponse> {
    Json(FareClassesResponse {
        fare_classes: state.planner.tables().classes(),
    })
}

/// Show the ticket catalog of one fare class.
async fn get_catalog(
    State(state): State<AppState>,
    Path(fare_class): Path<String>,
) -> Result<Json<CatalogResponse>, AppError> {
    let not_found = || AppError::NotFound {
        message: format!("Unknown fare class: {fare_class}"),
    };

    let class = FareClass::parse(&fare_class).map_err(|_| not_found())?;
    let catalog = state.planner.tables().get(class).ok_or_else(not_found)?;

    Ok(Json(CatalogResponse::from_catalog(class, &catalog)))
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Plan the cheapest tickets for a travel period.
async fn plan_fares(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanFaresRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, body = %String::from_utf8_lossy(&body), "invalid plan request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let fare_class = FareClass::parse(&req.fare_class).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })?;

    let period = req
        .period()
        .map_err(|message| AppError::BadRequest { message })?;

    let plan = state
        .planner
        .plan_period(fare_class, &period)
        .await
        .map_err(AppError::from)?;

    info!(
        %fare_class,
        required_days = plan.solution.required_days,
        total_cost = plan.solution.total_cost,
        "planned fares"
    );

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let template = PlanResultsTemplate {
            plan: PlanView::from_plan(&plan),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(PlanFaresResponse::from_plan(&plan)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unprocessable { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidRequest(message) => AppError::BadRequest { message },
            PlanError::Infeasible { .. } => AppError::Unprocessable {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unprocessable { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
