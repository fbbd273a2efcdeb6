use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

use transaction_intake::api;
use transaction_intake::config::Config;
use transaction_intake::storage::PgTransactionStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to read configuration from the environment")?;

    setup_logging(parse_log_level(&config.log_level));

    info!("Starting transaction intake service");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.connection_url())
        .await
        .context("Failed to connect to PostgreSQL")?;

    info!("Successfully connected to PostgreSQL");

    let store = PgTransactionStore::new(pool);
    store.ensure_schema().await.context("Failed to prepare the transactions table")?;

    let app = api::router(Arc::new(store));
    let listener = TcpListener::bind((config.service_host.as_str(), config.service_port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.service_host, config.service_port))?;

    info!("Listening on {}:{}", config.service_host, config.service_port);

    axum::serve(listener, app).await.context("Server terminated unexpectedly")?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
