//! Core CLI definitions

use clap::{Args, Parser, Subcommand};
use dumpscope::{Category, SearchFilters};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dumpscope")]
#[command(about = "Browse reverse-engineered game dumps", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where dumps are read from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Read dumps from a local directory (one subdirectory per game)
    #[arg(long, global = true, env = "DUMPSCOPE_LOCAL")]
    pub local: Option<PathBuf>,

    /// GitHub contents API URL listing the game directories
    #[arg(long, global = true, env = "DUMPSCOPE_API")]
    pub api: Option<String>,
}

/// Search filter toggles
#[derive(Args, Debug, Clone, Copy, Default)]
#[allow(clippy::struct_excessive_bools)] // One flag per search filter
pub struct FilterArgs {
    /// Do not match record names
    #[arg(long)]
    pub no_name: bool,

    /// Match member/property names
    #[arg(long)]
    pub property: bool,

    /// Match offsets (hex)
    #[arg(long)]
    pub offset: bool,

    /// Match member types
    #[arg(long = "type")]
    pub type_name: bool,
}

impl From<FilterArgs> for SearchFilters {
    fn from(args: FilterArgs) -> Self {
        SearchFilters {
            name: !args.no_name,
            property: args.property,
            offset: args.offset,
            type_name: args.type_name,
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available games
    #[command(visible_alias = "g")]
    Games {
        /// Only show games whose name contains this text
        #[arg(short, long)]
        filter: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the records of one category
    #[command(visible_alias = "l")]
    List {
        /// Game name
        game: String,

        /// Category (classes, structs, enums, functions, offsets)
        #[arg(short, long, default_value = "classes")]
        category: Category,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search a category
    #[command(visible_alias = "s")]
    Search {
        /// Game name
        game: String,

        /// Text to search for (case-insensitive, at least 2 characters)
        term: String,

        /// Category (classes, structs, enums, functions, offsets)
        #[arg(short, long, default_value = "classes")]
        category: Category,

        #[command(flatten)]
        filters: FilterArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the details of one record
    Show {
        /// Game name
        game: String,

        /// Record name (exact)
        name: String,

        /// Category (classes, structs, enums, functions, offsets)
        #[arg(short, long, default_value = "classes")]
        category: Category,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive browser for one game
    #[command(visible_alias = "b")]
    Browse {
        /// Game name
        game: String,
    },

    /// Configure default settings
    #[command(visible_alias = "c")]
    Configure {
        /// Set the default GitHub contents API URL
        #[arg(long)]
        api: Option<String>,

        /// Set a default local dumps directory
        #[arg(long)]
        local: Option<PathBuf>,

        /// Remove the default local dumps directory
        #[arg(long)]
        clear_local: bool,

        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "dumpscope",
            "--local",
            "/dumps",
            "search",
            "Fortnite",
            "health",
            "-c",
            "structs",
            "--no-name",
            "--property",
            "--type",
        ])
        .unwrap();

        assert_eq!(cli.source.local, Some(PathBuf::from("/dumps")));
        match cli.command {
            Commands::Search {
                game,
                term,
                category,
                filters,
                json,
            } => {
                assert_eq!(game, "Fortnite");
                assert_eq!(term, "health");
                assert_eq!(category, Category::Structs);
                assert!(!json);
                let filters = SearchFilters::from(filters);
                assert!(!filters.name);
                assert!(filters.property);
                assert!(!filters.offset);
                assert!(filters.type_name);
            }
            _ => panic!("expected search command"),
        }
    }

    #[test]
    fn test_rejects_unknown_category() {
        let result = Cli::try_parse_from(["dumpscope", "list", "Fortnite", "-c", "widgets"]);
        assert!(result.is_err());
    }
}
