//! OS signal handling.

use tokio::sync::broadcast;

/// Resolves on Ctrl-C or when the shutdown coordinator fires.
pub async fn wait_for_shutdown(mut shutdown: broadcast::Receiver<()>) {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("Shutdown signal received"),
            Err(e) => {
                // Without a signal handler only the coordinator can stop us.
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    tokio::select! {
        _ = ctrl_c => {}
        _ = shutdown.recv() => tracing::info!("Shutdown triggered"),
    }
}
