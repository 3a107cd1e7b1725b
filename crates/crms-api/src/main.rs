//! CRCRMS API Server

use crms_api::blob::LocalBlobStore;
use crms_api::db::PgStore;
use crms_api::{router, AppConfig, AppState};
use crms_core::RecordService;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "crms_api=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CRCRMS API Server");

    if let Err(e) = run(AppConfig::default()).await {
        error!("Server failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let store = PgStore::connect(&config.database_url).await?;
    store.migrate().await?;

    let blobs = LocalBlobStore::new(&config.upload_dir, config.public_base_url.clone());
    let service = RecordService::new(Arc::new(store), Arc::new(blobs));

    let addr = config.bind_addr.clone();
    let app = router(AppState::new(service, config));

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
