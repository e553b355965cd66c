//! Hospital registry server entry point.
//!
//! # Responsibility
//! - Parse configuration from flags and environment.
//! - Initialize logging, open the store, and serve HTTP until shutdown.

use clap::Parser;
use hospital_api::{create_app, AppState, ServerConfig};
use hospital_core::init_logging;
use log::info;

/// Binds the listener and serves until Ctrl-C.
async fn serve(app: axum::Router, config: &ServerConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("event=server_start module=server status=ok address={addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    init_logging(config.effective_log_level(), config.log_dir.as_deref())
        .map_err(|err| anyhow::anyhow!("failed to initialize logging: {err}"))?;

    info!(
        "event=server_init module=server status=start host={} port={} database={} max_connections={}",
        config.host, config.port, config.database, config.max_connections
    );

    let state = AppState::open(config.clone())?;
    let app = create_app(state);
    serve(app, &config).await
}
