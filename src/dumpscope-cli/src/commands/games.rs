//! Game listing command

use anyhow::{Context, Result};
use dumpscope::{filter_games, list_games, RepositoryBrowser};

use crate::render::{format_games, TerminalNotifier};
use dumpscope::{NoticeLevel, Notifier};

/// Handle `games`
pub fn handle(browser: &dyn RepositoryBrowser, filter: Option<&str>, json: bool) -> Result<()> {
    let games = match list_games(browser) {
        Ok(games) => games,
        Err(e) => {
            TerminalNotifier.notify(NoticeLevel::Error, "Failed to load games");
            return Err(e).context("Failed to list games");
        }
    };

    let shown = filter_games(&games, filter.unwrap_or(""));

    if json {
        println!("{}", serde_json::to_string_pretty(&shown)?);
    } else {
        print!("{}", format_games(&shown));
    }

    Ok(())
}
