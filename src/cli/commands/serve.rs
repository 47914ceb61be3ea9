use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::cli::ServerArgs;
use crate::config::{initialize_app_state, Settings};
use crate::router::create_router;
use crate::schemas::AppState;

pub async fn serve(args: ServerArgs) -> Result<()> {
    trace!("Entering serve function");
    let settings = Settings::load()?.with_overrides(args.database_url, args.bind_address);
    debug!("Database URL: {}", settings.database_url);

    let state = initialize_app_state(settings).await.inspect_err(|e| {
        error!("Failed to initialize application state: {:#}", e);
    })?;
    run_server(state).await
}

/// Binds the configured address and serves until the process stops.
pub(crate) async fn run_server(state: AppState) -> Result<()> {
    let bind_address = state.settings.bind_address.clone();
    let app = create_router(state);
    debug!("Router created successfully");

    info!("Starting server on {}", bind_address);
    let listener = TcpListener::bind(&bind_address).await.inspect_err(|e| {
        error!("Failed to bind to address {}: {}", bind_address, e);
    })?;

    info!("fintrack API server running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
