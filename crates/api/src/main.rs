//! API server entry point.

use std::error::Error;
use std::sync::Arc;

use api::config::{Config, LogFormat};
use api::AppState;
use sqlx::postgres::PgPoolOptions;
use store::PostgresProductRepository;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn describe_metrics() {
    metrics::describe_counter!("bus_dispatch_total", "Requests dispatched, by name");
    metrics::describe_counter!("bus_dispatch_errors_total", "Failed dispatches, by name");
    metrics::describe_counter!("events_published_total", "Domain events published, by name");
    metrics::describe_counter!("products_purchased_total", "Successful product purchases");
}

/// Builds the application state on PostgreSQL when configured, otherwise on
/// a seeded in-memory repository.
async fn create_state(config: &Config) -> Result<Arc<AppState>, Box<dyn Error>> {
    let Some(url) = config.database_url.as_deref() else {
        tracing::info!("DATABASE_URL not set, using seeded in-memory repository");
        return Ok(api::create_default_state()?);
    };

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await?;
    let repository = PostgresProductRepository::new(pool);

    tracing::info!("running database migrations");
    repository.run_migrations().await?;
    tracing::info!("database migrations finished");

    Ok(api::create_state(repository)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env();
    init_tracing(&config);

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new().install_recorder()?;
    describe_metrics();

    // 3. Wire repository and buses
    let state = create_state(&config).await?;
    tracing::info!(routes = ?state.catalog.names(), "catalog ready");

    // 4. Build the application
    let app = api::create_app(state, metrics_handle);

    // 5. Start server
    let addr = config.addr();
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shut down gracefully");
    Ok(())
}
