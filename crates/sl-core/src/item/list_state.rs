use crate::errors::StoreError;
use crate::ids::ItemId;

use super::Item;

/// Retrieval progress for the signed-in user's list.
///
/// 当前用户列表的加载状态机。
///
/// State transitions (driven only by the item list controller):
///
/// ```text
/// Loading ──→ Data ──(patch: append / replace / remove)──→ Data
///    │          │
///    │          └──(forced refresh)──→ Loading
///    └──→ Error ──(forced refresh)──→ Loading
/// ```
///
/// `Error` is reserved for retrieval failures. Failed writes are reported on
/// the exception channel and never replace `Data`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListState {
    #[default]
    Loading,
    Data(Vec<Item>),
    Error(StoreError),
}

impl ListState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Items when the state is `Data`.
    pub fn data(&self) -> Option<&[Item]> {
        match self {
            Self::Data(items) => Some(items),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&StoreError> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Apply `f` to the items when the state is `Data`; any other state is
    /// left untouched. Returns whether the items were changed.
    pub fn when_data_mut(&mut self, f: impl FnOnce(&mut Vec<Item>) -> bool) -> bool {
        match self {
            Self::Data(items) => f(items),
            _ => false,
        }
    }

    /// Append a confirmed item at the end.
    pub fn append(&mut self, item: Item) -> bool {
        self.when_data_mut(|items| {
            items.push(item);
            true
        })
    }

    /// Replace the element with the same id, keeping its position.
    pub fn replace(&mut self, item: Item) -> bool {
        let Some(id) = item.id.clone() else {
            return false;
        };
        self.when_data_mut(|items| match items.iter_mut().find(|i| i.has_id(&id)) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        })
    }

    /// Remove the element with the given id.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        self.when_data_mut(|items| {
            let before = items.len();
            items.retain(|i| !i.has_id(id));
            items.len() != before
        })
    }
}
