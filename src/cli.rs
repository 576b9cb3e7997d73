use std::path::PathBuf;

use clap::Parser;
use sl_core::item::FilterCriterion;

#[derive(Parser, Debug, Clone)]
#[command(name = "shoplist")]
#[command(about = "Shared shopping list synchronized per signed-in user", long_about = None)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, env = "SHOPLIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Which items to print: all, obtained or remaining
    #[arg(short, long)]
    pub filter: Option<FilterCriterion>,

    /// Add an item that is already obtained (repeatable)
    #[arg(long = "obtained", value_name = "NAME")]
    pub obtained: Vec<String>,

    /// Flip the obtained flag of the named item (repeatable)
    #[arg(long = "toggle", value_name = "NAME")]
    pub toggle: Vec<String>,

    /// Delete the named item (repeatable)
    #[arg(long = "delete", value_name = "NAME")]
    pub delete: Vec<String>,

    /// Sign out at the end and start a fresh anonymous session
    #[arg(long)]
    pub sign_out: bool,

    /// Names of items to add
    pub items: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_items_and_flags() {
        let cli = Cli::try_parse_from([
            "shoplist",
            "--filter",
            "remaining",
            "--obtained",
            "Bread",
            "--toggle",
            "Milk",
            "Milk",
            "Eggs",
        ])
        .unwrap();

        assert_eq!(cli.filter, Some(FilterCriterion::Remaining));
        assert_eq!(cli.items, ["Milk", "Eggs"]);
        assert_eq!(cli.obtained, ["Bread"]);
        assert_eq!(cli.toggle, ["Milk"]);
        assert!(cli.delete.is_empty());
        assert!(!cli.sign_out);
    }

    #[test]
    fn test_unknown_filter_is_rejected() {
        assert!(Cli::try_parse_from(["shoplist", "--filter", "someday"]).is_err());
    }
}
