//! Adorescore API server
//!
//! Serves the review analysis endpoint with graceful shutdown, structured
//! logging and Prometheus metrics.

use adorescore_api::{create_router, ApiConfig, AppState};
use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "adorescore-api")]
#[command(about = "Adorescore review emotion analysis service", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "ADORESCORE_CONFIG", default_value = "adorescore.yaml")]
    config: PathBuf,

    /// Model backend configuration file
    #[arg(short, long, env = "ADORESCORE_MODELS")]
    models: Option<PathBuf>,

    /// Emotion weight overrides file
    #[arg(short, long, env = "ADORESCORE_WEIGHTS")]
    weights: Option<PathBuf>,

    /// Listen address
    #[arg(short = 'l', long, env = "ADORESCORE_LISTEN")]
    listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long, env = "ADORESCORE_PORT")]
    port: Option<u16>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

impl Cli {
    fn apply(&self, config: &mut ApiConfig) {
        if let Some(models) = &self.models {
            config.models_config = Some(models.clone());
        }
        if let Some(weights) = &self.weights {
            config.weights = Some(weights.clone());
        }
        if let Some(listen) = &self.listen {
            config.listen = listen.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_json);

    info!("Starting Adorescore API");

    let mut config = ApiConfig::load(&cli.config)?;
    cli.apply(&mut config);
    info!("Configuration loaded");

    let metrics_handle = init_metrics()?;

    let state = AppState::from_config(&config).await?.with_metrics(metrics_handle);
    if !state.analyzer.models().is_ready() {
        warn!("Some models failed to load; /analyze will fail until they are fixed");
    }

    let addr: SocketAddr = config.bind_addr().parse()?;
    let app = create_router(state, config.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

fn init_tracing(verbose: bool, json: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("adorescore=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("adorescore=info,tower_http=info"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Install the Prometheus recorder and describe the service metrics
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "adorescore_requests_total",
        "Total number of analysis requests received"
    );
    metrics::describe_counter!(
        "adorescore_errors_total",
        "Total number of failed analysis requests by kind"
    );
    metrics::describe_histogram!(
        "adorescore_analysis_latency_us",
        metrics::Unit::Microseconds,
        "Analysis pipeline latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
