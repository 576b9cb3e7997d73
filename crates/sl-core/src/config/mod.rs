//! # Pure Data Module / 纯数据模块
//!
//! ## Responsibilities / 职责
//!
//! - Define configuration data structures / 定义配置数据结构
//! - Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! No validation and no default-value policy lives here. Empty strings are
//! valid facts; the bootstrap layer decides what an empty value means.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Initial filter criterion, as written in the file (may be empty)
    pub default_filter: String,

    /// Item store backend name (`memory`, `json`, or empty)
    pub storage_backend: String,

    /// JSON store file path (path info only, no existence check)
    pub storage_path: PathBuf,

    /// `EnvFilter` directives for tracing (may be empty)
    pub log_filter: String,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let str_at = |section: &str, key: &str| -> String {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };

        Ok(Self {
            default_filter: str_at("general", "default_filter"),
            storage_backend: str_at("storage", "backend"),
            storage_path: PathBuf::from(str_at("storage", "path")),
            log_filter: str_at("logging", "filter"),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    /// 创建空的 AppConfig
    pub fn empty() -> Self {
        Self {
            default_filter: String::new(),
            storage_backend: String::new(),
            storage_path: PathBuf::new(),
            log_filter: String::new(),
        }
    }
}
