//! shellcache server entry point.
//!
//! Boots the offline-caching router, runs install and activate for the
//! configured version, then serves MCP on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::Result;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use shellcache_client::{FetchConfig, HttpNetwork, Network, Router};
use shellcache_core::config::StoreKind;
use shellcache_core::{AppConfig, CacheDb, CacheStore, MemoryCacheStore};
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;

    let store: Arc<dyn CacheStore> = match config.store {
        StoreKind::Sqlite => Arc::new(CacheDb::open(config.require_db_path()?).await?),
        StoreKind::Memory => Arc::new(MemoryCacheStore::new()),
    };
    let network: Arc<dyn Network> = Arc::new(HttpNetwork::new(FetchConfig::from(&config))?);
    let router = Arc::new(Router::new(config.router.clone(), store, network.clone()));

    tracing::info!(generation = router.generation(), scope = %config.router.scope, "starting shellcache on stdio transport");
    tools::lifecycle::boot(&router).await;

    let handler = handler::ShellCacheServer::new(router, network);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
