//! # Dependency Injection / 依赖注入模块
//!
//! The only place that depends on `sl-infra` and `sl-app` together. It turns
//! the config DTO into concrete adapters behind the port traits and applies
//! the default-value policy for empty config values. It makes no business
//! decisions.

use std::path::PathBuf;
use std::sync::Arc;

use sl_app::AppDeps;
use sl_core::config::AppConfig;
use sl_core::item::FilterCriterion;
use sl_core::ports::ItemStorePort;
use sl_infra::fs::default_item_store_path;
use sl_infra::{InMemoryAuthSession, InMemoryItemStore, JsonFileItemStore};
use tracing::{info, warn};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Unknown storage backend: {0:?} (expected \"memory\" or \"json\")")]
    UnknownBackend(String),

    #[error("Item store path resolution failed: {0}")]
    StorePath(String),
}

/// Item store selected by `[storage] backend`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    JsonFile(PathBuf),
}

impl StorageBackend {
    /// Resolve the backend from config. Empty means in-memory; a json backend
    /// without a path lands in the app data directory.
    pub fn from_config(config: &AppConfig) -> WiringResult<Self> {
        match config.storage_backend.trim().to_ascii_lowercase().as_str() {
            "" | "memory" => Ok(Self::Memory),
            "json" => {
                let path = if config.storage_path.as_os_str().is_empty() {
                    default_item_store_path()
                        .map_err(|e| WiringError::StorePath(format!("{e:#}")))?
                } else {
                    config.storage_path.clone()
                };
                Ok(Self::JsonFile(path))
            }
            other => Err(WiringError::UnknownBackend(other.to_string())),
        }
    }
}

/// Build the application dependencies from config.
pub fn wire_dependencies(config: &AppConfig) -> WiringResult<AppDeps> {
    let item_store: Arc<dyn ItemStorePort> = match StorageBackend::from_config(config)? {
        StorageBackend::Memory => {
            info!("Using in-memory item store");
            Arc::new(InMemoryItemStore::new())
        }
        StorageBackend::JsonFile(path) => {
            info!(path = %path.display(), "Using JSON file item store");
            Arc::new(JsonFileItemStore::new(path))
        }
    };

    Ok(AppDeps {
        auth_session: Arc::new(InMemoryAuthSession::new()),
        item_store,
    })
}

/// Initial filter: the command line wins over `[general] default_filter`.
///
/// An unparseable config value is logged and treated as `All`.
pub fn resolve_initial_filter(cli: Option<FilterCriterion>, config: &AppConfig) -> FilterCriterion {
    if let Some(criterion) = cli {
        return criterion;
    }
    if config.default_filter.trim().is_empty() {
        return FilterCriterion::default();
    }
    config.default_filter.parse().unwrap_or_else(|err| {
        warn!(error = %err, "Ignoring [general] default_filter");
        FilterCriterion::default()
    })
}
