use async_trait::async_trait;
use models::TradeRecord;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::error::Result;

/// Repository trait for the trade store.
///
/// The normalization core stays storage-agnostic: handlers only see this
/// trait, so the JSON-file store can be swapped for a database later.
/// Insert-only; trades are never updated or deleted.
#[async_trait]
pub trait TradeRepository: Send + Sync {
    /// Persists one normalized batch. All-or-nothing: either the whole
    /// batch lands in the store or none of it does.
    async fn insert_trades(&self, batch: Vec<TradeRecord>) -> Result<()>;

    /// Reads back the full trade collection.
    async fn list_trades(&self) -> Result<Vec<TradeRecord>>;
}

/// File-backed implementation storing a JSON array of trades.
///
/// Writes take a lock so concurrent uploads serialize instead of
/// clobbering each other's read-modify-write cycle.
pub struct FileTradeRepository {
    store_path: PathBuf,
    lock: RwLock<()>,
}

impl FileTradeRepository {
    pub fn new<P: AsRef<Path>>(store_path: P) -> Self {
        Self {
            store_path: store_path.as_ref().to_path_buf(),
            lock: RwLock::new(()),
        }
    }

    /// Load the full store. A missing or empty file is an empty store.
    async fn load(&self) -> Result<Vec<TradeRecord>> {
        if !self.store_path.exists() {
            return Ok(Vec::new());
        }
        let content = tokio::fs::read_to_string(&self.store_path).await?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let trades: Vec<TradeRecord> = serde_json::from_str(&content)?;
        Ok(trades)
    }
}

#[async_trait]
impl TradeRepository for FileTradeRepository {
    async fn insert_trades(&self, batch: Vec<TradeRecord>) -> Result<()> {
        if batch.is_empty() {
            return Ok(());
        }

        let _guard = self.lock.write().await;

        let mut trades = self.load().await?;
        trades.extend(batch);

        if let Some(parent) = self.store_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(&trades)?;
        tokio::fs::write(&self.store_path, json).await?;

        Ok(())
    }

    async fn list_trades(&self) -> Result<Vec<TradeRecord>> {
        let _guard = self.lock.read().await;
        self.load().await
    }
}

/// In-memory implementation, used by tests.
#[derive(Default)]
pub struct InMemoryTradeRepository {
    trades: RwLock<Vec<TradeRecord>>,
}

impl InMemoryTradeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TradeRepository for InMemoryTradeRepository {
    async fn insert_trades(&self, batch: Vec<TradeRecord>) -> Result<()> {
        let mut trades = self.trades.write().await;
        trades.extend(batch);
        Ok(())
    }

    async fn list_trades(&self) -> Result<Vec<TradeRecord>> {
        let trades = self.trades.read().await;
        Ok(trades.clone())
    }
}
