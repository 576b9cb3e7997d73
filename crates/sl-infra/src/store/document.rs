use std::collections::BTreeMap;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use sl_core::ids::{ItemId, UserId};
use sl_core::item::Item;

/// Persisted document body. The id is the document key, never a field.
///
/// 持久化文档体。id 是文档键，不作为字段存储。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDocument {
    pub name: String,
    #[serde(default)]
    pub obtained: bool,
}

impl From<&Item> for ItemDocument {
    fn from(item: &Item) -> Self {
        Self {
            name: item.name.clone(),
            obtained: item.obtained,
        }
    }
}

/// A document together with its key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub id: ItemId,
    pub doc: ItemDocument,
}

impl StoredDocument {
    pub fn to_item(&self) -> Item {
        Item::new(self.doc.name.clone())
            .with_obtained(self.doc.obtained)
            .with_id(self.id.clone())
    }
}

/// Every user's collection, in document insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collections {
    users: BTreeMap<UserId, Vec<StoredDocument>>,
}

impl Collections {
    pub fn retrieve(&self, user_id: &UserId) -> Vec<Item> {
        self.users
            .get(user_id)
            .map(|docs| docs.iter().map(StoredDocument::to_item).collect())
            .unwrap_or_default()
    }

    pub fn create(&mut self, user_id: &UserId, item: &Item) -> ItemId {
        let id = ItemId::new();
        self.users
            .entry(user_id.clone())
            .or_default()
            .push(StoredDocument {
                id: id.clone(),
                doc: ItemDocument::from(item),
            });
        id
    }

    pub fn update(&mut self, user_id: &UserId, item: &Item) -> Result<()> {
        let Some(id) = item.id.as_ref() else {
            bail!("cannot update an item without an id");
        };

        let stored = self
            .users
            .get_mut(user_id)
            .and_then(|docs| docs.iter_mut().find(|d| &d.id == id));
        match stored {
            Some(stored) => {
                stored.doc = ItemDocument::from(item);
                Ok(())
            }
            None => bail!("item {id} not found"),
        }
    }

    /// Remove a document. Deleting a missing document is not an error.
    pub fn delete(&mut self, user_id: &UserId, item_id: &ItemId) {
        if let Some(docs) = self.users.get_mut(user_id) {
            docs.retain(|d| &d.id != item_id);
        }
    }
}
