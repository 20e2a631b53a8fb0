//! # emuhued: emulated Hue bridge daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Parse configuration (config file, env vars)
//! - Initialise `tracing`
//! - Resolve the advertised address and bridge identity
//! - Start the emulated Hue integration (SSDP responder)
//! - Build the axum router serving the description document
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT), then tear integrations down
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use emuhue_adapter_emulated_hue::EmulatedHueIntegration;
use emuhue_adapter_http_axum::state::AppState;
use emuhue_app::ports::Integration;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    let resolved = config.emulated_hue.resolve(config.server.port)?;
    tracing::info!(
        advertise = %resolved.advertise,
        interface = %resolved.interface,
        "emulated Hue bridge resolved"
    );

    // Integrations
    let mut hue = EmulatedHueIntegration::new(resolved.clone());
    if config.emulated_hue.enabled {
        hue.setup().await?;
    } else {
        tracing::info!(integration = hue.name(), "integration disabled");
    }

    // HTTP
    let state = AppState::new(&resolved.identity, resolved.advertise);
    let app = emuhue_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "emuhued listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    hue.teardown().await?;
    served?;

    Ok(())
}

/// Resolve on SIGINT, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
