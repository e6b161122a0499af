//! Order Service entry point
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────────┐
//! │  Config  │───▶│ Gateway  │───▶│  OrderStore  │
//! │  (YAML)  │    │  (axum)  │    │ (PG / memory)│
//! └──────────┘    └──────────┘    └──────────────┘
//! ```
//!
//! Usage: `order_service [--env dev] [--port 8080]`

use std::sync::Arc;

use anyhow::Context;

use order_service::config::AppConfig;
use order_service::db::Database;
use order_service::orders::{MemoryOrderStore, OrderStore, PgOrderStore};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn OrderStore>> {
    match &config.postgres_url {
        Some(url) => {
            let db = Database::connect(url, &config.database)
                .await
                .context("Failed to connect to PostgreSQL")?;
            db.init_schema()
                .await
                .context("Failed to initialize order schema")?;
            Ok(Arc::new(PgOrderStore::new(db)))
        }
        None => {
            tracing::warn!("No postgres_url configured, orders are kept in memory only");
            Ok(Arc::new(MemoryOrderStore::new()))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut app_config = AppConfig::load(&env)?.with_env_overrides();
    if let Some(port) = get_port_override() {
        app_config.gateway.port = port;
    }
    let _log_guard = order_service::logging::init_logging(&app_config)
        .with_context(|| format!("Failed to open log directory {}", app_config.log_dir))?;

    tracing::info!("Starting order service in {} mode", env);

    let store = open_store(&app_config).await?;
    order_service::gateway::run_server(&app_config.gateway, store).await?;

    Ok(())
}
