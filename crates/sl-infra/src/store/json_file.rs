use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use sl_core::ids::{ItemId, UserId};
use sl_core::item::Item;
use sl_core::ports::ItemStorePort;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use super::Collections;

/// Document store persisted as a single JSON file.
///
/// 以单个 JSON 文件持久化的文档存储。
///
/// Layout: `{ "<user id>": [ { "id": "...", "doc": { "name": ..., "obtained": ... } } ] }`.
/// A missing file reads as an empty store. Every write replaces the file
/// atomically.
pub struct JsonFileItemStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileItemStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Collections> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Collections::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("read item store failed: {}", self.path.display()))
            }
        };

        serde_json::from_str(&content)
            .with_context(|| format!("parse item store failed: {}", self.path.display()))
    }

    async fn save(&self, collections: &Collections) -> Result<()> {
        let content =
            serde_json::to_string_pretty(collections).context("serialize item store failed")?;
        self.atomic_write(&content).await
    }

    async fn atomic_write(&self, content: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create item store dir failed: {}", dir.display()))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp item store failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, &self.path).await.with_context(|| {
            format!(
                "rename temp item store to target failed: {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        debug!(path = %self.path.display(), "Item store written");
        Ok(())
    }

    /// Load, apply `op`, and write back while holding the write lock.
    async fn modify<R>(&self, op: impl FnOnce(&mut Collections) -> Result<R>) -> Result<R> {
        let _guard = self.write_lock.lock().await;
        let mut collections = self.load().await?;
        let result = op(&mut collections)?;
        self.save(&collections).await?;
        Ok(result)
    }
}

#[async_trait]
impl ItemStorePort for JsonFileItemStore {
    async fn retrieve(&self, user_id: &UserId) -> Result<Vec<Item>> {
        let _guard = self.write_lock.lock().await;
        Ok(self.load().await?.retrieve(user_id))
    }

    async fn create(&self, user_id: &UserId, item: &Item) -> Result<ItemId> {
        self.modify(|c| Ok(c.create(user_id, item))).await
    }

    async fn update(&self, user_id: &UserId, item: &Item) -> Result<()> {
        self.modify(|c| c.update(user_id, item)).await
    }

    async fn delete(&self, user_id: &UserId, item_id: &ItemId) -> Result<()> {
        self.modify(|c| {
            c.delete(user_id, item_id);
            Ok(())
        })
        .await
    }
}
