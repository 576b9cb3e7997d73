//! Shoplist Application Layer
//!
//! Controllers that keep the signed-in user's list synchronized with the
//! remote store, plus the derived views handed to the presentation layer.
//!
//! ```text
//! AuthSessionPort ──→ AuthController ──identity──→ ItemListScope
//!                                                      │ (one controller per identity)
//!                                                      ↓
//! ItemStorePort ←──────────────────────────── ItemListController
//!                                               │            │
//!                                          ListState   ExceptionChannel
//!                                               │
//!                          FilterCriterion ──→ FilteredItemsView
//! ```

pub mod app;
pub mod controllers;
pub mod deps;
pub mod error;
pub mod scope;
pub mod views;

pub use app::ShoppingListApp;
pub use controllers::{
    AppException, AuthController, ExceptionChannel, ItemListController, ItemOperation,
};
pub use deps::AppDeps;
pub use error::{AppError, AppResult};
pub use scope::ItemListScope;
pub use views::FilteredItemsView;
