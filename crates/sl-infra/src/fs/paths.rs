use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the Shoplist application data root directory.
///
/// 获取 Shoplist 应用数据根目录。
///
/// # Platform-specific Paths / 平台特定路径
/// - macOS: ~/Library/Application Support/Shoplist
/// - Windows: %APPDATA%\Shoplist
/// - Linux: $XDG_DATA_HOME/Shoplist or ~/.local/share/Shoplist
///
/// The directory is not created here; the caller decides when to create it.
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir =
        get_platform_data_dir().context("Failed to get platform-specific data directory")?;

    Ok(base_dir.join("Shoplist"))
}

/// Default location of the JSON item store.
pub fn default_item_store_path() -> Result<PathBuf> {
    Ok(app_data_dir()?.join("items.json"))
}

fn get_platform_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
            return Ok(PathBuf::from(xdg_data_home));
        }
    }

    dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Unable to get platform data directory"))
}
