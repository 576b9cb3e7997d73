//! Tracing configuration for Shoplist
//!
//! ## Filter precedence / 过滤器优先级
//!
//! 1. `RUST_LOG` environment variable
//! 2. `[logging] filter` from the config file
//! 3. Build defaults: `debug` in debug builds, `info` in release builds

use std::io;

use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// Check if running in development environment
fn is_development() -> bool {
    cfg!(debug_assertions)
}

/// Build the default filter directives for tracing
fn build_filter_directives(is_dev: bool) -> Vec<String> {
    let level = if is_dev { "debug" } else { "info" };
    vec![
        level.to_string(),
        format!("sl_app={level}"),
        format!("sl_infra={level}"),
    ]
}

/// Pick the directive string to use, highest precedence first.
fn select_directives(env: Option<&str>, config_filter: &str, is_dev: bool) -> String {
    if let Some(env) = env.filter(|v| !v.trim().is_empty()) {
        return env.to_string();
    }
    if !config_filter.trim().is_empty() {
        return config_filter.to_string();
    }
    build_filter_directives(is_dev).join(",")
}

fn build_env_filter(config_filter: &str) -> EnvFilter {
    let is_dev = is_development();
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = select_directives(env.as_deref(), config_filter, is_dev);

    EnvFilter::try_new(&directives).unwrap_or_else(|err| {
        eprintln!("Invalid log filter {directives:?} ({err}); using defaults");
        EnvFilter::new(build_filter_directives(is_dev).join(","))
    })
}

/// Initialize the tracing subscriber
///
/// Registers a global subscriber with an `EnvFilter` and a stdout `fmt`
/// layer. Call once, after the config is loaded and before the app starts.
///
/// ## Errors / 错误
///
/// Returns `Err` if a global subscriber is already registered.
pub fn init_tracing_subscriber(config_filter: &str) -> anyhow::Result<()> {
    let env_filter = build_env_filter(config_filter);

    let stdout_layer = fmt::layer()
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(io::stdout);

    registry().with(env_filter).with(stdout_layer).try_init()?;

    Ok(())
}
