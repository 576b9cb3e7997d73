//! One command-line session against the shopping list.
//!
//! 启动应用，执行命令行请求的修改，打印筛选后的列表，然后关闭。

use anyhow::Context;
use sl_app::ShoppingListApp;
use sl_core::config::AppConfig;
use sl_core::ids::ItemId;
use sl_core::item::{Item, ListState};
use tracing::{info, warn};

use super::wiring::{resolve_initial_filter, wire_dependencies};
use crate::cli::Cli;

/// Run the session described by `cli`.
pub async fn run_app(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let deps = wire_dependencies(&config).context("Failed to wire dependencies")?;
    let filter = resolve_initial_filter(cli.filter, &config);

    let app = ShoppingListApp::start(deps, filter)
        .await
        .context("Failed to start shopping list")?;

    let session = run_session(&app, &cli).await;
    app.shutdown();
    session
}

async fn run_session(app: &ShoppingListApp, cli: &Cli) -> anyhow::Result<()> {
    let state = settled_state(app).await;
    if let ListState::Error(err) = &state {
        warn!(error = %err, "Item list could not be loaded");
        return Ok(());
    }

    for name in &cli.items {
        app.add_item(name, false).await?;
    }
    for name in &cli.obtained {
        app.add_item(name, true).await?;
    }
    for name in &cli.toggle {
        match find_by_name(app, name) {
            Some(id) => app.toggle_obtained(&id).await?,
            None => warn!(name = %name, "No item to toggle"),
        }
    }
    for name in &cli.delete {
        match find_by_name(app, name) {
            Some(id) => app.delete_item(&id).await?,
            None => warn!(name = %name, "No item to delete"),
        }
    }

    if let Some(notice) = app.exceptions().get() {
        warn!(%notice, "A change was not saved");
        app.clear_exception();
    }

    print_items(&app.visible_items().items());

    if cli.sign_out {
        app.sign_out().await?;
        info!(user_id = ?app.current_identity().map(|i| i.user_id), "Signed out; fresh session");
    }

    Ok(())
}

/// Wait until the initial retrieval has finished one way or another.
async fn settled_state(app: &ShoppingListApp) -> ListState {
    let mut state = app.list_state();
    state.wait_for(|s| !s.is_loading()).await;
    state.get()
}

fn find_by_name(app: &ShoppingListApp, name: &str) -> Option<ItemId> {
    app.list_state().with(|state| {
        state
            .data()?
            .iter()
            .find(|item| item.name == name)
            .and_then(|item| item.id.clone())
    })
}

fn print_items(items: &[Item]) {
    if items.is_empty() {
        println!("(no items)");
        return;
    }
    for item in items {
        let mark = if item.obtained { "x" } else { " " };
        println!("[{mark}] {}", item.name);
    }
}
