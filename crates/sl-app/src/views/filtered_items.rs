use sl_core::item::{FilterCriterion, Item, ListState};
use sl_core::observable::{Derived, ReadOnly};

/// The list as the user currently wants to see it.
///
/// 按当前筛选条件投影后的列表。
///
/// Tracks the filter criterion and the list state. Every read recomputes
/// from the current pair; nothing is cached, so switching the criterion
/// never triggers a fetch. Loading and error states read as empty.
#[derive(Clone)]
pub struct FilteredItemsView {
    derived: Derived<FilterCriterion, ListState, Vec<Item>>,
}

impl FilteredItemsView {
    pub fn new(criterion: &ReadOnly<FilterCriterion>, list_state: &ReadOnly<ListState>) -> Self {
        Self {
            derived: Derived::new(criterion, list_state, |criterion, state| {
                criterion.apply(state)
            }),
        }
    }

    pub fn items(&self) -> Vec<Item> {
        self.derived.get()
    }

    /// Current items, marking both inputs as seen for [`changed`](Self::changed).
    pub fn items_and_mark_seen(&mut self) -> Vec<Item> {
        self.derived.get_and_mark_seen()
    }

    /// Wait until the criterion or the list state changes.
    pub async fn changed(&mut self) -> bool {
        self.derived.changed().await
    }
}
