//! rsproof server binary
//!
//! Proofreading HTTP service backed by a LanguageTool server.
//!
//! # Usage
//!
//! ```bash
//! # With config file
//! rsproof --config config.yaml
//!
//! # With environment variables only
//! RSPROOF_ENGINE__BASE_URL=http://languagetool:8010 rsproof
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing::{error, info, warn};

use rsproof_api::adapters::LanguageToolEngine;
use rsproof_api::http::{
    create_router_with_observability, create_router_with_options, AppState, HttpOptions,
};
use rsproof_api::observability::{init_logging, init_metrics, parse_log_level, LoggingConfig};
use rsproof_domain::{CheckEngine, Exclusive, GrammarEngine};
use rsproof_engine::{LanguageToolClient, LanguageToolConfig};
use rsproof_server::{CheckLimits, ServerConfig};

/// rsproof - Proofreading service
#[derive(Parser, Debug)]
#[command(name = "rsproof")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file (YAML)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = if let Some(config_path) = args.config {
        ServerConfig::load(&config_path)?
    } else {
        ServerConfig::from_env()?
    };

    init_logging(LoggingConfig {
        json_format: config.logging.json,
        default_level: parse_log_level(&config.logging.level),
        include_spans: false,
    });

    info!(version = env!("CARGO_PKG_VERSION"), "Starting rsproof server");

    match config.engine.backend.as_str() {
        "languagetool" => {
            let client = LanguageToolClient::new(
                LanguageToolConfig::new(config.engine.base_url.clone())
                    .with_language(config.engine.language.clone())
                    .with_timeout(config.engine.timeout()),
            )?;
            info!(
                base_url = %config.engine.base_url,
                language = %config.engine.language,
                "Using LanguageTool engine"
            );
            let engine = LanguageToolEngine::new(client);

            if config.engine.serialize_calls {
                info!("Engine calls are serialized");
                run(Arc::new(Exclusive::new(engine)), &config).await
            } else {
                run(Arc::new(engine), &config).await
            }
        }
        other => {
            error!("Unknown engine backend: {}", other);
            anyhow::bail!("Unknown engine backend: {}", other);
        }
    }
}

/// Warms up the engine, then serves HTTP until a shutdown signal arrives.
async fn run<E>(engine: Arc<E>, config: &ServerConfig) -> anyhow::Result<()>
where
    E: GrammarEngine + 'static,
{
    info!("Warming up grammar engine");
    let checker = CheckEngine::init(engine, config.engine.check_engine_config()).await?;

    let state = AppState::new(Arc::new(checker), CheckLimits::from(&config.limits));
    let options = HttpOptions::from(&config.server);

    let router = if config.metrics.enabled {
        let metrics_state = init_metrics()?;
        info!("Metrics enabled at /metrics");
        create_router_with_observability(state, metrics_state, options)
    } else {
        create_router_with_options(state, options)
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    run_http_server(router, addr).await
}

/// Run the HTTP server with graceful shutdown.
async fn run_http_server(router: axum::Router, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("failed to listen for Ctrl+C: {}", e);
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
                warn!("failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_args_parsing() {
        let args = Args::try_parse_from(["rsproof"]).unwrap();
        assert_eq!(args.config, None);

        let args = Args::try_parse_from(["rsproof", "-c", "test.yaml"]).unwrap();
        assert_eq!(args.config, Some("test.yaml".to_string()));

        let args = Args::try_parse_from(["rsproof", "--config", "/etc/rsproof.yaml"]).unwrap();
        assert_eq!(args.config, Some("/etc/rsproof.yaml".to_string()));
    }

    #[test]
    fn test_cli_rejects_unknown_flags() {
        assert!(Args::try_parse_from(["rsproof", "--port", "9000"]).is_err());
    }
}
