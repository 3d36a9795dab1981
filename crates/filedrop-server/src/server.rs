//! Server lifecycle.

use crate::error::ServerError;
use crate::routes;
use crate::state::AppState;
use tokio::net::TcpListener;

/// The filedrop HTTP server.
pub struct FiledropServer {
    state: AppState,
}

impl FiledropServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Bind and serve until Ctrl-C or SIGTERM.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.state.config().server.bind.clone();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::StartupFailed(format!("failed to bind {addr}: {e}")))?;
        tracing::info!(address = %addr, "filedrop listening");

        let app = routes::create_router(self.state);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("filedrop stopped");
        Ok(())
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
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
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
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
    tracing::info!("Shutdown signal received");
}
