pub mod handlers;
pub mod health;
pub mod predict;
pub mod types;

pub use handlers::AppState;
pub use predict::{MODEL_NOTE, PredictionService};
pub use types::{ErrorResponse, PredictionResponse, StatusResponse};

use crate::{Result, config::Config, lifecycle::ServiceContext};
use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub fn router(context: ServiceContext) -> Router {
    let app_state = AppState::new(context);

    Router::new()
        .route("/predict", post(handlers::predict))
        .route("/status", get(health::status))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}

/// Serves requests until a shutdown signal arrives. The context must already
/// be initialized; nothing is bound before that.
pub async fn run(config: &Config, context: ServiceContext) -> Result<()> {
    let app = router(context);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
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
                warn!("Failed to install SIGTERM handler: {}", e);
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
