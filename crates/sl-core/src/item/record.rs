use serde::{Deserialize, Serialize};

use crate::ids::ItemId;

/// A single list entry.
///
/// 列表条目。
///
/// An item whose `id` is `None` has never been persisted. Every item held in
/// list state after a successful retrieval or creation carries an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: Option<ItemId>,
    pub name: String,
    #[serde(default)]
    pub obtained: bool,
}

impl Item {
    /// Create an unpersisted, not-yet-obtained item.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            obtained: false,
        }
    }

    pub fn with_obtained(mut self, obtained: bool) -> Self {
        self.obtained = obtained;
        self
    }

    /// Copy of this item carrying the store-assigned id.
    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn has_id(&self, id: &ItemId) -> bool {
        self.id.as_ref() == Some(id)
    }
}
