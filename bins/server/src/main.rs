//! Notedrop API Server
//!
//! Main entry point for the Notedrop backend service.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notedrop_api::{AppState, create_router};
use notedrop_core::storage::{StorageConfig, StorageProvider, StorageService};
use notedrop_db::connect;
use notedrop_shared::config::{AppConfig, StorageBackend, StorageSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notedrop=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Create storage service when configured
    let storage = match &config.storage {
        Some(settings) => {
            let storage = StorageService::from_config(storage_config(settings))?;
            info!(provider = storage.provider_name(), "Object storage configured");
            Some(Arc::new(storage))
        }
        None => {
            warn!("Object storage not configured; attachment uploads are disabled");
            None
        }
    };

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        storage,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Convert shared storage settings into a core storage config.
fn storage_config(settings: &StorageSettings) -> StorageConfig {
    let provider = match &settings.backend {
        StorageBackend::S3 {
            endpoint,
            bucket,
            access_key_id,
            secret_access_key,
            region,
        } => StorageProvider::s3(endpoint, bucket, access_key_id, secret_access_key, region),
        StorageBackend::AzureBlob {
            account,
            access_key,
            container,
        } => StorageProvider::azure_blob(account, access_key, container),
        StorageBackend::LocalFs { root } => StorageProvider::local_fs(root.clone()),
    };

    StorageConfig::new(provider)
        .with_upload_ttl(settings.presign_upload_ttl_secs)
        .with_allowed_content_types(settings.allowed_content_types.clone())
}
