//! PactLens Server
//!
//! Legal document analysis over HTTP: upload a PDF, DOCX, or image and get
//! back the extracted text, an agreement classification, the detected
//! document type, and a structured analysis.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

use pactlens_server::{build_router, AppState, Overrides, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "pactlens-server")]
#[command(about = "PactLens legal document analysis service", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "pactlens.yaml")]
    config: String,

    /// Classifier configuration file
    #[arg(long)]
    classifiers: Option<String>,

    /// Listen address
    #[arg(short = 'l', long)]
    listen: Option<String>,

    /// Listen port
    #[arg(short = 'P', long, env = "PORT")]
    port: Option<u16>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Disable AI analysis even when an API key is set
    #[arg(long)]
    no_ai: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            listen: self.listen.clone(),
            port: self.port,
            classifiers: self.classifiers.clone(),
            no_ai: self.no_ai,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose);

    info!("Starting PactLens server");

    // Load configuration
    let config = ServerConfig::load(&cli.config, &cli.overrides())?;
    info!("Configuration loaded successfully");
    info!("OCR: {} / {} at {} dpi", config.ocr.tesseract, config.ocr.pdftoppm, config.ocr.dpi);

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    let state = AppState::from_config(&config, cli.api_key.clone(), metrics_handle)?;
    info!("AI mode: {}", state.ai_mode_label());

    let addr: SocketAddr = format!("{}:{}", config.server.listen, config.server.port).parse()?;
    let app = build_router(state);

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
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("pactlens=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pactlens=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "pactlens_requests_total",
        "Total number of requests by route"
    );
    metrics::describe_counter!(
        "pactlens_classifications_total",
        "Agreement classifications by outcome"
    );
    metrics::describe_counter!(
        "pactlens_analyses_total",
        "Analyses by result source (ai, fallback, error)"
    );
    metrics::describe_counter!("pactlens_errors_total", "Total number of errors by type");
    metrics::describe_histogram!(
        "pactlens_classification_latency_us",
        metrics::Unit::Microseconds,
        "Agreement classification latency in microseconds"
    );
    metrics::describe_histogram!(
        "pactlens_classifier_latency_us",
        metrics::Unit::Microseconds,
        "Per-classifier latency in microseconds"
    );
    metrics::describe_histogram!(
        "pactlens_analysis_latency_ms",
        metrics::Unit::Milliseconds,
        "Analysis latency in milliseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
