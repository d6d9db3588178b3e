//! `franchise-server` entry point.
//!
//! Reads `FRANCHISE_*` environment variables, opens the store, and serves
//! until SIGINT/SIGTERM.

use franchise_server::{build_router, build_state, ServerConfig};
use log::{error, info, warn};
use std::future::Future;
use std::io;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = ServerConfig::from_env().map_err(|err| err.to_string())?;
    franchise_core::init_logging(&config.log_level, config.log_target.clone())?;

    let app = build_router(build_state(&config)?);

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|err| format!("bind {} failed: {err}", config.bind_addr))?;
    info!(
        "event=server_start module=server status=ok bind_addr={} database={:?}",
        config.bind_addr, config.database
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(|err| format!("server failed: {err}"))?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
                return;
            }
            (Err(err), _) | (_, Err(err)) => {
                warn!("event=signal_register module=server status=error error={err}");
            }
        }
    }
    until_signal(tokio::signal::ctrl_c()).await;
}

/// Resolves once `signal` fires. A failed registration never resolves, so the
/// server keeps running instead of shutting down immediately.
async fn until_signal<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(err) = signal.await {
        error!("event=signal_register module=server status=error signal=ctrl_c error={err}");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::until_signal;
    use std::io;

    #[tokio::test]
    async fn delivered_signal_resolves() {
        until_signal(async { Ok(()) }).await;
    }

    #[tokio::test]
    async fn failed_registration_keeps_waiting() {
        let failed = async { Err(io::Error::new(io::ErrorKind::Other, "no signal driver")) };
        let resolved = tokio::select! {
            biased;
            _ = until_signal(failed) => true,
            _ = std::future::ready(()) => false,
        };
        assert!(!resolved);
    }
}
