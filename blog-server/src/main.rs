use anyhow::{Context, Result};
use blog_server::{api, config, db::DatabaseManager, state::AppState};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blog_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = config::Settings::new().context("Failed to load settings")?;

    // The front page degrades to an empty list while the database is
    // unavailable, so a failed bootstrap is not fatal
    if settings.database.init_schema {
        let bootstrap = DatabaseManager::open(settings.database.clone())
            .and_then(|db| db.initialize_schema());
        match bootstrap {
            Ok(()) => tracing::info!("Database schema initialized"),
            Err(e) => tracing::error!(error = %e, "Failed to initialize database schema"),
        }
    }

    let state = AppState::new(settings.database);
    let app = api::create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Failed to parse server address")?;
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
