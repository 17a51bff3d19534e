use axum::Router;
use tokio::net::TcpListener;

use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::routes::{self, AppState};

/// Serves the router with the provided configuration until SIGTERM or Ctrl-C.
pub async fn serve(router: Router, config: RuntimeConfig) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "vaguely listening");

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("vaguely stopped");
    Ok(())
}

/// Loads [`RuntimeConfig`] from the environment and serves the responder on the system clock.
pub async fn run() -> Result<()> {
    let config = RuntimeConfig::from_env()?;
    serve(routes::router(AppState::default()), config).await
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(signal) => signal,
            Err(err) => {
                tracing::warn!(error = %err, "failed to install SIGTERM handler; waiting for Ctrl-C only");
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = sigterm.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("shutdown signal received");
}
