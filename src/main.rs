use clap::Parser;
use shoplist_lib::bootstrap::{init_tracing_subscriber, load_config_or_empty, run_app};
use shoplist_lib::cli::Cli;
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; a missing file is not an error
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let loaded = load_config_or_empty(cli.config.clone())?;

    init_tracing_subscriber(&loaded.config.log_filter)?;
    if let Some(path) = &loaded.missing_path {
        warn!(path = %path.display(), "Config file not found; using defaults");
    }

    run_app(cli, loaded.config).await
}
