// HTTP server bootstrap with bounded graceful shutdown

use anyhow::Context;
use axum::Router;
use std::future::Future;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::{api::create_router, app_state::AppState, config::Config};

pub async fn run(config: &Config, state: AppState) -> anyhow::Result<()> {
    let address = config.server_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("cannot bind {}", address))?;
    info!("🚀 App started at http://{}", listener.local_addr()?);

    serve(
        listener,
        create_router(state),
        shutdown_signal(),
        config.timeouts.shutdown,
    )
    .await
}

/// Serve `app` until `signal` resolves, then give in-flight requests `grace`
/// to finish before dropping whatever is still open.
pub async fn serve<S>(listener: TcpListener, app: Router, signal: S, grace: Duration) -> anyhow::Result<()>
where
    S: Future<Output = ()> + Send,
{
    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        _ = signal => {}
        finished = &mut server => {
            finished.context("server task panicked")??;
            return Ok(());
        }
    }

    info!("Shutdown signal received, draining connections for up to {:?}", grace);
    let _ = stop_tx.send(());

    match tokio::time::timeout(grace, &mut server).await {
        Ok(finished) => {
            finished.context("server task panicked")??;
            info!("Server shutdown complete");
        }
        Err(_) => {
            warn!("Grace period elapsed, closing remaining connections");
            server.abort();
        }
    }
    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Cannot listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
