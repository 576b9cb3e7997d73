//! Derived, automatically recomputed projections for the presentation layer.

mod filtered_items;

pub use filtered_items::FilteredItemsView;
