//! Listener lifecycle.
//!
//! # Invariants
//! - A shutdown signal stops accepting connections; in-flight requests get
//!   at most `shutdown_timeout` to finish before the server task is aborted.

use crate::routes::router;
use crate::state::AppState;
use anyhow::{Context, Result};
use axum::Router;
use log::{info, warn};
use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;
use tokio::task::JoinError;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8888";
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub shutdown_timeout: Duration,
}

/// Binds `config.addr` and serves until Ctrl+C or SIGTERM.
pub async fn serve(config: ServerConfig, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    info!(
        "event=api_listen module=api status=ok addr={}",
        listener.local_addr()?
    );
    serve_with_shutdown(
        listener,
        router(state),
        shutdown_signal(),
        config.shutdown_timeout,
    )
    .await
}

/// Serves `app` until `signal` resolves, then drains within `deadline`.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    app: Router,
    signal: F,
    deadline: Duration,
) -> Result<()>
where
    F: Future<Output = ()> + Send,
{
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });

    tokio::select! {
        joined = &mut server => return finish(joined),
        () = signal => {}
    }

    info!(
        "event=api_shutdown module=api status=draining deadline_ms={}",
        deadline.as_millis()
    );
    let _ = stop_tx.send(());
    match tokio::time::timeout(deadline, &mut server).await {
        Ok(joined) => {
            finish(joined)?;
            info!("event=api_shutdown module=api status=ok");
            Ok(())
        }
        Err(_) => {
            server.abort();
            warn!("event=api_shutdown module=api status=deadline_exceeded");
            Ok(())
        }
    }
}

fn finish(joined: std::result::Result<io::Result<()>, JoinError>) -> Result<()> {
    joined
        .context("server task failed")?
        .context("server stopped with an error")
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("event=signal_install module=api status=error signal=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!("event=signal_install module=api status=error signal=sigterm error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("event=signal module=api signal=ctrl_c"),
        () = terminate => info!("event=signal module=api signal=sigterm"),
    }
}
