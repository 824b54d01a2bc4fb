//! flagstand - CTF scoring service

use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flagstand::{
    catalog,
    config::Args,
    server::{self, AppState},
    store::{self, FsDocumentStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    // Initialize tracing/logging
    let log_level = args.log_level.clone();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("flagstand={},info", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = args.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!("======================================");
    info!("  flagstand - CTF scoring service");
    info!("======================================");
    info!("Node ID: {}", args.node_id);
    info!("Listen: {}", args.listen);
    info!(
        "Mode: {}",
        if args.dev_mode { "DEVELOPMENT" } else { "PRODUCTION" }
    );
    info!("Data dir: {}", args.data_dir.display());
    info!("Token expiry: {}s", args.jwt_expiry_seconds);
    info!("======================================");

    let store = match FsDocumentStore::new(&args.data_dir).await {
        Ok(s) => Arc::new(s),
        Err(e) => {
            error!("Document store initialization failed: {}", e);
            std::process::exit(1);
        }
    };

    // Create both documents with default shapes on first boot; a partial
    // initialization is fatal and logged as a consistency incident.
    if let Err(e) = store::ensure_defaults(store.as_ref()).await {
        error!("Document initialization failed: {}", e);
        std::process::exit(1);
    }

    if let Some(ref seed) = args.flags_seed {
        if let Err(e) = catalog::seed_from_file(store.as_ref(), seed).await {
            error!("Flag seeding failed: {}", e);
            std::process::exit(1);
        }
    }

    let state = match AppState::new(args, store) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    server::run(state).await?;

    Ok(())
}
