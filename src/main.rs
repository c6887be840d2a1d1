mod config;
mod handlers;
mod models;
mod services;
mod web; // Upload page + /upload endpoint

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::sync::Arc;

use config::Config;
use handlers::UploadHandler;
use services::{CalorieEstimator, GeminiClient, UploadStore};
use web::server::create_router;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init();

    log::info!("🚀 Starting Calorie Estimator...");

    // Refuses to start without GEMINI_API_KEY
    let config = Config::from_env()?;

    let store = Arc::new(UploadStore::new(&config.upload_dir)?);
    log::info!("✅ Upload directory ready: {}", store.dir().display());

    let gemini = GeminiClient::new(config.gemini.clone());
    log::info!("✅ Gemini client initialized with model: {}", gemini.model());
    let estimator = Arc::new(gemini) as Arc<dyn CalorieEstimator>;

    let upload_handler = Arc::new(UploadHandler::new(store, estimator));
    let app = create_router(upload_handler, config.max_upload_bytes);

    match config.max_upload_bytes {
        Some(limit) => log::info!("📦 Upload size limit: {} bytes", limit),
        None => log::info!("📦 Upload size limit: none"),
    }

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    log::info!("🌐 Server listening on http://{}", config.bind_addr);
    log::info!("🎉 Ready! Open http://{} and upload a food photo", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    log::info!("🛑 Shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("❌ Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
