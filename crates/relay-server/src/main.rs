//! Voice relay server binary.
//!
//! Starts an axum HTTP server with structured logging and graceful shutdown
//! on SIGTERM/SIGINT.

use relay_server::{app, config, logging, AppState};
use std::net::SocketAddr;
use tokio::net::TcpListener;

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("RELAY_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    let config = config::load_config(selected_config_path)?;

    let _log_guard = logging::init(&config.logging)?;

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved startup configuration path"
    );

    if config.llm.has_api_key() {
        tracing::info!("Gemini API key loaded successfully");
    } else {
        tracing::warn!("GEMINI_API_KEY not set in environment variables");
    }

    let state = AppState::from_config(&config)?;
    tracing::info!(
        model = state.llm.model(),
        encoding = %state.budgeter.encoding(),
        exact_tokens = state.budgeter.is_exact(),
        max_tokens = state.max_tokens,
        cors_origin = %state.cors_origin,
        "relay collaborators ready"
    );

    let app = app(state);
    let addr = SocketAddr::new(config.server.host, config.server.port);

    tracing::info!(%addr, started_at = %chrono::Local::now(), "voice relay starting up");

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("voice relay shut down");
    Ok(())
}

/// Waits for a SIGINT (Ctrl+C) or SIGTERM signal for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, initiating graceful shutdown"); }
        () = terminate => { tracing::info!("received SIGTERM, initiating graceful shutdown"); }
    }
}
