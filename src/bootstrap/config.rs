//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML file into [`AppConfig`] and reports I/O and parse errors
//! with context. No validation and no default values are applied here;
//! the wiring step decides what an empty value means.

use std::path::PathBuf;

use anyhow::Context;
use sl_core::config::AppConfig;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Configuration plus the path that was asked for but not found.
///
/// Logging is not initialised while the config loads, so the caller reports
/// `missing_path` once the subscriber is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub missing_path: Option<PathBuf>,
}

/// Load `config_path` when given; a missing file yields [`AppConfig::empty`].
///
/// 缺失的配置文件回退为空配置；读取或解析失败仍然返回错误。
pub fn load_config_or_empty(config_path: Option<PathBuf>) -> anyhow::Result<LoadedConfig> {
    match config_path {
        None => Ok(LoadedConfig {
            config: AppConfig::empty(),
            missing_path: None,
        }),
        Some(path) if !path.exists() => Ok(LoadedConfig {
            config: AppConfig::empty(),
            missing_path: Some(path),
        }),
        Some(path) => Ok(LoadedConfig {
            config: load_config(path)?,
            missing_path: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let temp_file = write_temp(
            r#"
            [general]
            default_filter = "remaining"

            [storage]
            backend = "json"
            path = "/path/to/items.json"

            [logging]
            filter = "sl_app=trace"
            "#,
        );

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.default_filter, "remaining");
        assert_eq!(config.storage_backend, "json");
        assert_eq!(config.storage_path, PathBuf::from("/path/to/items.json"));
        assert_eq!(config.log_filter, "sl_app=trace");
    }

    #[test]
    fn test_load_config_returns_empty_values_when_missing() {
        let temp_file = write_temp(
            r#"
            [storage]
            # backend is missing
            "#,
        );

        let config = load_config(temp_file.path().to_path_buf()).unwrap();
        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_load_config_returns_parse_error_on_invalid_toml() {
        let temp_file = write_temp("[storage\nbackend = ");

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config as TOML"));
    }

    #[test]
    fn test_load_config_or_empty_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let loaded = load_config_or_empty(Some(path.clone())).unwrap();

        assert_eq!(loaded.config, AppConfig::empty());
        assert_eq!(loaded.missing_path, Some(path));
    }

    #[test]
    fn test_load_config_or_empty_without_path() {
        let loaded = load_config_or_empty(None).unwrap();
        assert_eq!(loaded.config, AppConfig::empty());
        assert_eq!(loaded.missing_path, None);
    }
}
