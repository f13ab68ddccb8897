use anyhow::Context;
use axum::{Router, extract::Extension, routing::post};
use catalog_suggest::config::Settings;
use catalog_suggest::engine::Engine;
use catalog_suggest::ingestion::handlers::{handle_upload_popularity, handle_upload_suggestions};
use catalog_suggest::search::handlers::{handle_select_sugg, handle_select_suggestion};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;

    tracing_subscriber::fmt()
        .with_max_level(settings.log_level)
        .init();

    tracing::info!("Starting suggestion service on {}", settings.bind);
    // 1. Engine (empty until the first catalog upload):
    let engine = Arc::new(Engine::new(settings.engine)?);
    tracing::debug!("Engine settings: {:?}", engine.settings());

    // 2. HTTP Router:
    let app = Router::new()
        .route("/upload/suggestions", post(handle_upload_suggestions))
        .route("/upload/popularity", post(handle_upload_popularity))
        .route("/select/suggestion", post(handle_select_suggestion))
        .route("/select/name", post(handle_select_suggestion))
        .route("/select/sugg", post(handle_select_sugg))
        .layer(Extension(engine));

    // 3. Start HTTP server:
    let listener = tokio::net::TcpListener::bind(settings.bind)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind))?;

    tracing::info!("HTTP server listening on {}", settings.bind);
    tracing::info!("Press Ctrl+C to shutdown");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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
