//! Nepfin API Server
//!
//! Main entry point for the financial statements service.

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nepfin_api::{AppState, BillStore, create_router};
use nepfin_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nepfin=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Load bills
    let store = match &config.data.bills_path {
        Some(path) => BillStore::load(path).await?,
        None => {
            warn!("No bills path configured, starting with an empty store");
            BillStore::default()
        }
    };

    info!(
        company = %config.company.name,
        currency = %config.company.currency,
        bills = store.len(),
        "Bill store ready"
    );

    // Create router
    let app = create_router(AppState::new(store, config.company));

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
