use anyhow::Result;
use async_trait::async_trait;

use crate::ids::{ItemId, UserId};
use crate::item::Item;

/// Port to the remote document store holding each user's items.
///
/// 远端文档存储端口，按用户划分集合。
///
/// Every call is scoped to one user's collection. Documents are keyed by a
/// store-assigned id; the id is never stored as a document field.
#[async_trait]
pub trait ItemStorePort: Send + Sync {
    /// Fetch the whole collection in store order.
    async fn retrieve(&self, user_id: &UserId) -> Result<Vec<Item>>;

    /// Persist a new item and return the id assigned to it.
    async fn create(&self, user_id: &UserId, item: &Item) -> Result<ItemId>;

    /// Overwrite an existing item. `item.id` must be present.
    async fn update(&self, user_id: &UserId, item: &Item) -> Result<()>;

    async fn delete(&self, user_id: &UserId, item_id: &ItemId) -> Result<()>;
}
