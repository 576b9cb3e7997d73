use anyhow::Result;
use async_trait::async_trait;
use sl_core::ids::{ItemId, UserId};
use sl_core::item::Item;
use sl_core::ports::ItemStorePort;
use tokio::sync::RwLock;

use super::Collections;

/// In-memory document store.
///
/// 内存版文档存储。
#[derive(Default)]
pub struct InMemoryItemStore {
    collections: RwLock<Collections>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemStorePort for InMemoryItemStore {
    async fn retrieve(&self, user_id: &UserId) -> Result<Vec<Item>> {
        Ok(self.collections.read().await.retrieve(user_id))
    }

    async fn create(&self, user_id: &UserId, item: &Item) -> Result<ItemId> {
        Ok(self.collections.write().await.create(user_id, item))
    }

    async fn update(&self, user_id: &UserId, item: &Item) -> Result<()> {
        self.collections.write().await.update(user_id, item)
    }

    async fn delete(&self, user_id: &UserId, item_id: &ItemId) -> Result<()> {
        self.collections.write().await.delete(user_id, item_id);
        Ok(())
    }
}
