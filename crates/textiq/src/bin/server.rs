//! TextIQ server binary
//!
//! Run with: cargo run -p textiq --bin textiq-server

use textiq::{config::TextIqConfig, server::TextIqServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "textiq=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = TextIqConfig::load()?;

    tracing::info!("Configuration loaded");
    tracing::info!("  - Upload directory: {}", config.upload.upload_dir.display());
    tracing::info!("  - Max file size: {} bytes", config.upload.max_file_size);
    tracing::info!(
        "  - Supported types: {}",
        config.upload.normalized_file_types().join(", ")
    );

    let server = TextIqServer::new(config)?;

    println!("\nServer starting...");
    println!("  API: http://{}/api/v1", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nEndpoints:");
    println!("  POST   /api/v1/upload-file          - Upload a document");
    println!("  GET    /api/v1/file-info/:id        - Stored file metadata");
    println!("  GET    /api/v1/file-content/:id     - Extracted text preview");
    println!("  DELETE /api/v1/delete-file/:id      - Delete a stored file");
    println!("  GET    /api/v1/supported-file-types - Accepted formats");
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
