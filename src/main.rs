use cowatch::{api::AppState, config::Config, logging, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init(&config.log_level)?;

    // Initialize application state
    let state = AppState::new(config.recommender());

    // Start the server
    let listener = server::bind(&config.bind_address()).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        max_connections = ?config.max_connections,
        "Server listening"
    );

    server::serve(listener, state, config.server_options(), shutdown_signal()).await;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(error) => {
            tracing::error!(%error, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
