use std::sync::Arc;

use anyhow::Result;
use mapleglass_config::Config;
use mapleglass_ocr::NullWindow;
use tokio::signal;
use tracing_subscriber::EnvFilter;

mod controller;
mod events;
mod panels;
mod pipeline;
mod poll;
mod state;

#[cfg(test)]
mod tests;

use self::controller::AppController;
use self::panels::PanelState;
use self::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = Config::default_path();
    let config = Config::load(&config_path)?;
    tracing::info!("config loaded from {}", config_path.display());

    let state = Arc::new(AppState::new(config.clone()));
    let panels = Arc::new(PanelState::default());
    let controller = AppController::new(Arc::clone(&state), Arc::clone(&panels));

    // The rendering layer supplies the native overlay handle; without one
    // (headless runs, non-Windows) the window operations are tracked no-ops.
    let window = Box::new(NullWindow::new());
    let mut tasks = controller.spawn_tasks(&config, window);

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("ctrl-c received, shutting down");
        }
        result = tasks.join_next() => {
            match result {
                Some(Ok(Ok(()))) => tracing::info!("task finished, shutting down"),
                Some(Ok(Err(e))) => tracing::error!("task failed: {e:#}"),
                Some(Err(e)) => tracing::error!("task panicked: {e}"),
                None => {}
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;
    Ok(())
}
