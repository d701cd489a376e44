//! SpamSift prediction server.
//!
//! Loads the fitted vectorizer and classifier produced by `spamsift-trainer`
//! and serves a single-page spam classification UI. Startup fails fast when
//! either artifact is missing, unreadable, or not from the same training run;
//! per-request failures are rendered into the page and never crash the
//! process.

use spamsift_core::{LoggingConfig, ServeConfig};
use spamsift_server::{build_app_state, build_router, load_config};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, config_path) = load_serve_config()?;
    init_tracing(&config.logging);

    match &config_path {
        Some(path) => info!(path = %path.display(), "Loaded configuration from file"),
        None => info!("No config file specified, using defaults"),
    }

    info!(
        listen_addr = %config.listen_addr,
        vectorizer = %config.vectorizer_path,
        classifier = %config.classifier_path,
        "Starting SpamSift prediction server"
    );

    let listen_addr = config.listen_addr.clone();

    // A missing or mismatched model is fatal: serving without one would fail
    // every request in a confusing way.
    let state = match build_app_state(config) {
        Ok(state) => state,
        Err(e) => {
            error!("Failed to load model artifacts: {e}");
            std::process::exit(1);
        }
    };

    info!(
        run_id = %state.model.run_id(),
        trained_at = %state.model.trained_at(),
        vocabulary_size = state.model.vocabulary_size(),
        "Model artifacts loaded"
    );

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    info!(%listen_addr, "Prediction server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load service configuration from a YAML file or fall back to defaults.
///
/// Checks (in order):
/// 1. First CLI argument as config path
/// 2. `SPAMSIFT_CONFIG` environment variable
/// 3. Default configuration
///
/// Also returns the path the config came from, `None` for defaults, so the
/// source can be logged once tracing is up.
fn load_serve_config() -> anyhow::Result<(ServeConfig, Option<PathBuf>)> {
    let config_path: Option<PathBuf> = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("SPAMSIFT_CONFIG").ok())
        .map(PathBuf::from);

    match config_path {
        Some(path) => {
            let config = load_config(&path)?;
            Ok((config, Some(path)))
        }
        None => Ok((ServeConfig::default(), None)),
    }
}

/// Initialize the tracing subscriber from the logging section of the config.
///
/// A `RUST_LOG` environment filter takes precedence over the configured
/// level when set.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
