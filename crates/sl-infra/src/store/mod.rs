//! Item store adapters.
//!
//! Both adapters share the remote document layout: one collection per
//! user id, each document keyed by a store-assigned id and holding only
//! `name` and `obtained`.

mod document;
mod in_memory;
mod json_file;

pub use document::{Collections, ItemDocument, StoredDocument};
pub use in_memory::InMemoryItemStore;
pub use json_file::JsonFileItemStore;
