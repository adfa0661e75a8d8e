//! Market Data Service Binary
//!
//! Starts the instrumented market data HTTP service.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin market-data-service
//! ```
//!
//! # Environment Variables
//!
//! - `PORT`: HTTP port (default: 8080)
//! - `HOST`: Bind address (default: 0.0.0.0)
//! - `ENABLE_TELEMETRY`: Push traces and metrics over OTLP (default: false)
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP gRPC endpoint (default: <http://localhost:4317>)
//! - `OTEL_SERVICE_NAME`: Service name (default: market-data-service)
//! - `LOG_FORMAT`: text | json (default: text)
//! - `RUST_LOG`: Log filter (default: `market_data_service=info`)

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use market_data_service::{
    AppState, HttpServer, MarketDataService, MetricsPort, MetricsRegistry, OtelSpanFactory, ServiceConfig,
    TracingLogger, YahooDataProvider, create_router, init_telemetry,
};
use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Graceful shutdown timeout.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv();

    let config = ServiceConfig::from_env()?;

    // Initialize telemetry (subscriber + optional OTLP export)
    let telemetry_guard = init_telemetry(&config.telemetry)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting market data service"
    );
    log_config(&config);

    let metrics = Arc::new(match telemetry_guard.meter() {
        Some(meter) => MetricsRegistry::with_meter(&meter)?,
        None => MetricsRegistry::new()?,
    });

    let provider = YahooDataProvider::new().context("failed to create Yahoo provider")?;

    let service = Arc::new(MarketDataService::new(
        Arc::new(provider),
        Arc::clone(&metrics) as Arc<dyn MetricsPort>,
        Arc::new(OtelSpanFactory::new()),
        Arc::new(TracingLogger::new()),
    ));

    let shutdown_token = CancellationToken::new();
    let server = HttpServer::new(
        config.server.socket_addr(),
        create_router(AppState::new(service, metrics)),
        shutdown_token.clone(),
    );
    let mut server_handle = tokio::spawn(server.run());

    tracing::info!("Market data service ready");

    tokio::select! {
        result = &mut server_handle => {
            result.context("HTTP server task panicked")??;
            return Ok(());
        }
        () = await_shutdown(shutdown_token) => {}
    }

    match tokio::time::timeout(SHUTDOWN_TIMEOUT, server_handle).await {
        Ok(result) => result.context("HTTP server task panicked")??,
        Err(_) => tracing::warn!(
            timeout_secs = SHUTDOWN_TIMEOUT.as_secs(),
            "Shutdown timed out with requests still in flight"
        ),
    }

    tracing::info!("Market data service stopped");
    drop(telemetry_guard);
    Ok(())
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        for dir in cwd.ancestors().skip(1) {
            let env_path = dir.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
        }
    }
}

/// Log the parsed configuration.
fn log_config(config: &ServiceConfig) {
    tracing::info!(
        addr = %config.server.socket_addr(),
        telemetry_enabled = config.telemetry.enabled,
        service_name = %config.telemetry.service_name,
        "Configuration loaded"
    );
    if config.telemetry.enabled {
        tracing::debug!(
            otlp_endpoint = %config.telemetry.otlp_endpoint,
            "OTLP export endpoint"
        );
    }
}

/// Wait for shutdown signal (SIGTERM or SIGINT).
async fn await_shutdown(shutdown_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }

    shutdown_token.cancel();

    tracing::info!(
        timeout_secs = SHUTDOWN_TIMEOUT.as_secs(),
        "Graceful shutdown started"
    );
}
