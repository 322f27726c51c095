use std::net::SocketAddr;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fare_server::cache::{CacheConfig, CachedPlanner};
use fare_server::fares::FareTables;
use fare_server::planner::PlannerConfig;
use fare_server::web::{AppState, create_router};

/// Default listen address.
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Default static assets directory.
const DEFAULT_STATIC_DIR: &str = "static";

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = std::env::var("FARE_PLANNER_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;

    let static_dir =
        std::env::var("FARE_PLANNER_STATIC").unwrap_or_else(|_| DEFAULT_STATIC_DIR.to_string());

    // Load fare tables (built-in SL prices unless a file is given)
    let tables = match std::env::var("FARE_TABLES") {
        Ok(path) => {
            info!("Loading fare tables from {}", path);
            FareTables::load(&path)?
        }
        Err(_) => FareTables::builtin(),
    };
    for class in tables.classes() {
        if let Some(catalog) = tables.get(class) {
            info!(%class, tickets = catalog.len(), "fare class loaded");
        }
    }

    let planner = CachedPlanner::new(tables, PlannerConfig::default(), &CacheConfig::default());
    let state = AppState::new(planner);
    let app = create_router(state, &static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Fare Planner listening on http://{addr}");
    info!("API Endpoints:");
    info!("  GET  /health                   - Health check");
    info!("  GET  /api/catalogs             - List fare classes");
    info!("  GET  /api/catalogs/:fare_class - Ticket catalog");
    info!("  POST /fares/plan               - Plan cheapest tickets");

    axum::serve(listener, app).await?;
    Ok(())
}
