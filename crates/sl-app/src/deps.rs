//! # Application Dependencies / 应用依赖
//!
//! Plain parameter grouping for [`ShoppingListApp`](crate::ShoppingListApp)
//! construction. No build steps, no defaults, no hidden logic.

use std::sync::Arc;

use sl_core::ports::{AuthSessionPort, ItemStorePort};

/// Application dependency grouping (not a builder)
/// 应用依赖分组（非 Builder，仅参数打包）
///
/// All dependencies are required.
#[derive(Clone)]
pub struct AppDeps {
    pub auth_session: Arc<dyn AuthSessionPort>,
    pub item_store: Arc<dyn ItemStorePort>,
}
