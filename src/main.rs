use std::env;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use hotgame_indexer::store::PgStore;
use hotgame_indexer::types::config::IndexerConfig;
use hotgame_indexer::types::ReceiptContext;
use hotgame_indexer::{build_registry, IndexerEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = IndexerConfig::load(Path::new("config/config.json"))?;
    load_required_env_vars(&config)?;

    let database_url = env::var(&config.database_url_env_var)
        .with_context(|| format!("env var {} not set", config.database_url_env_var))?;

    let store = Arc::new(
        PgStore::connect(&database_url)
            .await
            .context("failed to create database pool")?,
    );
    store
        .run_migrations()
        .await
        .context("failed to run database migrations")?;
    tracing::info!("Database pool initialized and migrations complete");

    let registry = build_registry();
    let engine = IndexerEngine::new(Arc::new(registry), store);
    engine
        .initialize()
        .await
        .map_err(|e| anyhow::anyhow!("failed to initialize handlers: {}", e))?;

    // The chain-streaming side is an external collaborator; receipts arrive
    // as NDJSON on stdin, already finalized and in chain order.
    let (receipt_tx, receipt_rx) = mpsc::channel(config.channel_capacity);
    let feed = tokio::spawn(read_receipts(receipt_tx));

    engine
        .run(receipt_rx)
        .await
        .map_err(|e| anyhow::anyhow!("engine error: {}", e))?;

    feed.await.context("receipt feed task panicked")??;

    tracing::info!("All receipts processed successfully");
    Ok(())
}

/// Ensures the database URL env var is set, loading .env if needed.
fn load_required_env_vars(config: &IndexerConfig) -> anyhow::Result<()> {
    if env::var(&config.database_url_env_var).is_ok() {
        return Ok(());
    }

    dotenvy::dotenv().with_context(|| {
        format!(
            "Missing env var {} and failed to load .env file",
            config.database_url_env_var
        )
    })?;

    anyhow::ensure!(
        env::var(&config.database_url_env_var).is_ok(),
        "Missing required env var after loading .env: {}",
        config.database_url_env_var
    );

    Ok(())
}

/// Read NDJSON receipts from stdin and forward them to the engine.
async fn read_receipts(tx: mpsc::Sender<ReceiptContext>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut count: u64 = 0;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let receipt: ReceiptContext = serde_json::from_str(line)
            .with_context(|| format!("invalid receipt JSON at input line {}", count + 1))?;

        if tx.send(receipt).await.is_err() {
            // Engine side hung up; stop reading.
            break;
        }
        count += 1;
    }

    tracing::info!("Receipt feed finished after {} receipt(s)", count);
    Ok(())
}
