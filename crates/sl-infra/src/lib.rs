//! Adapters implementing the `sl-core` ports.

pub mod auth;
pub mod fs;
pub mod store;

pub use auth::InMemoryAuthSession;
pub use store::{InMemoryItemStore, JsonFileItemStore};
