use anyhow::Context;
use taskboard_server::{
    app_state::AppState, data_context::DataContext, logging, server::build_app, settings::Settings,
    task_repository::TaskRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("Failed to load settings")?;
    logging::init(&settings.log_filter);

    // ── Store ──────────────────────────────────────────────────
    let data_context = DataContext::new(&settings.database_path)
        .with_context(|| format!("Failed to open database {}", settings.database_path))?;
    let task_count = data_context.list_tasks().context("Failed to read tasks")?.len();
    tracing::info!(path = %settings.database_path, task_count, "store opened");

    // ── Router ─────────────────────────────────────────────────
    let app = build_app(AppState::new(data_context), &settings);

    // ── Start ──────────────────────────────────────────────────
    let addr = settings.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "server running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler, run until killed.
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
