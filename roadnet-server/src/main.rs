use std::process::ExitCode;

use clap::Parser;
use roadnet_core::{NetworkConfig, create_road_network};
use roadnet_server::{AppState, ServerArgs, ServerConfig, ServerError, create_router};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    match serve(ServerArgs::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn serve(args: ServerArgs) -> Result<(), ServerError> {
    let config = ServerConfig::resolve(&args)?;
    let addr = config.socket_addr()?;

    let network_config = NetworkConfig::from_dir(&config.network.data_dir);
    info!(
        "Loading road network from {}",
        config.network.data_dir.display()
    );
    let network =
        tokio::task::spawn_blocking(move || create_road_network(&network_config)).await??;

    let app = create_router(AppState::new(network, config.limits.clone()));

    let listener = TcpListener::bind(addr).await?;
    info!("Road network server listening on http://{addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
