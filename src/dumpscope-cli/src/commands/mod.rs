//! Command handlers for dumpscope CLI
//!
//! Each subcommand has its own module with handler functions.

pub mod browse;
pub mod configure;
pub mod games;
pub mod records;

use anyhow::{bail, Context, Result};
use dumpscope::{
    list_games, open_game, Catalog, GameEntry, GithubBrowser, LocalBrowser, RepositoryBrowser,
    DEFAULT_API_BASE,
};
use tracing::debug;

use crate::cli::SourceArgs;
use crate::config::Config;
use crate::render::TerminalNotifier;

/// Pick the dump source: flags first, then config, then the public repository
pub fn browser(source: &SourceArgs, config: &Config) -> Box<dyn RepositoryBrowser> {
    if let Some(local) = source.local.as_ref().or(config.local.as_ref()) {
        debug!(root = %local.display(), "using local dumps");
        return Box::new(LocalBrowser::new(local.clone()));
    }

    let api = source
        .api
        .as_deref()
        .or(config.api.as_deref())
        .unwrap_or(DEFAULT_API_BASE);
    debug!(%api, "using GitHub dumps");
    Box::new(GithubBrowser::new(api))
}

/// Find a game by directory name or display name (case-insensitive)
pub fn find_game(browser: &dyn RepositoryBrowser, name: &str) -> Result<GameEntry> {
    let games = list_games(browser).context("Failed to load games")?;
    let wanted = name.to_lowercase();

    match games
        .into_iter()
        .find(|g| g.name.to_lowercase() == wanted || g.display_name.to_lowercase() == wanted)
    {
        Some(game) => Ok(game),
        None => bail!("Game not found: {} (run `dumpscope games` to list them)", name),
    }
}

/// Resolve and load a game's catalog
pub fn load_catalog(browser: &dyn RepositoryBrowser, name: &str) -> Result<Catalog> {
    let game = find_game(browser, name)?;
    open_game(browser, &TerminalNotifier, &game)
        .with_context(|| format!("Failed to load game data for {}", game.display_name))
}
