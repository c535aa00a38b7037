use inventory_service::{bootstrap, create_router, init, AppError, Cli, Result, ResultExt};

use std::net::SocketAddr;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the application
    init()?;

    let config = Cli::load().into_config();
    let addr = format!("{}:{}", config.host, config.port);

    // Create the cache directory and application state
    let state = bootstrap(config).await?;
    let app = create_router(state);

    // Set up the server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("cannot bind {}: {}", addr, e)))?;
    let local: SocketAddr = listener.local_addr().context("reading listener address")?;
    log::info!("Server running at http://{}", local);
    log::info!("Forms at http://{}/RegisterForm.html and /SearchForm.html", local);
    log::info!("API document at http://{}/docs/openapi.yaml", local);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving requests")?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
