//! Game listing and loading on top of a [`RepositoryBrowser`].

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::catalog::{Catalog, GameFiles};
use crate::repository::{EntryKind, FetchResult, RepositoryBrowser};

/// Severity of a user-facing status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Fire-and-forget sink for short status messages
pub trait Notifier {
    fn notify(&self, level: NoticeLevel, message: &str);
}

/// Notifier that only logs
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info => info!("{}", message),
            NoticeLevel::Success => info!(success = true, "{}", message),
            NoticeLevel::Error => error!("{}", message),
        }
    }
}

/// A game directory in the repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameEntry {
    /// Directory name as listed (may be URL-encoded)
    pub name: String,
    /// URL-decoded name for display
    pub display_name: String,
}

impl GameEntry {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let display_name = urlencoding::decode(&name)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| name.clone());
        Self { name, display_name }
    }

    pub fn icon(&self) -> &'static str {
        game_icon(&self.display_name)
    }
}

/// List the games (directories) at the repository root
pub fn list_games<B: RepositoryBrowser + ?Sized>(browser: &B) -> FetchResult<Vec<GameEntry>> {
    let games: Vec<GameEntry> = browser
        .list_directories("")?
        .into_iter()
        .filter(|entry| entry.kind == EntryKind::Dir)
        .map(|entry| GameEntry::new(entry.name))
        .collect();
    debug!(games = games.len(), "listed games");
    Ok(games)
}

/// Games whose display name contains `term`, case-insensitively
pub fn filter_games<'a>(games: &'a [GameEntry], term: &str) -> Vec<&'a GameEntry> {
    let term = term.to_lowercase();
    games
        .iter()
        .filter(|g| g.display_name.to_lowercase().contains(&term))
        .collect()
}

/// Decorative icon picked from keywords in the game name
pub fn game_icon(name: &str) -> &'static str {
    let name = name.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| name.contains(w));

    if has(&["fps", "shooter"]) {
        "🔫"
    } else if has(&["fortnite"]) {
        "🎮"
    } else if has(&["valorant"]) {
        "🎯"
    } else if has(&["apex"]) {
        "🏆"
    } else if has(&["cod", "warzone"]) {
        "💣"
    } else if has(&["test", "dev"]) {
        "🧪"
    } else {
        "🎮"
    }
}

/// Fetch every JSON file of a game.
///
/// A failed listing is an error; a file that fails to fetch is logged and
/// left out, so its category simply shows no data.
pub fn fetch_game_files<B: RepositoryBrowser + ?Sized>(
    browser: &B,
    game: &GameEntry,
) -> FetchResult<GameFiles> {
    let files = browser.list_files(&game.name)?;
    let mut loaded = GameFiles::new();

    for file in files.iter().filter(|f| f.name.ends_with(".json")) {
        match browser.fetch_json(&file.download_url) {
            Ok(value) => {
                loaded.insert(file.name.clone(), value);
            }
            Err(e) => warn!(game = %game.display_name, file = %file.name, "failed to load file: {}", e),
        }
    }

    debug!(game = %game.display_name, files = loaded.len(), "fetched game files");
    Ok(loaded)
}

/// Fetch and decode a game, reporting progress through `notifier`
pub fn open_game<B: RepositoryBrowser + ?Sized, N: Notifier + ?Sized>(
    browser: &B,
    notifier: &N,
    game: &GameEntry,
) -> FetchResult<Catalog> {
    notifier.notify(NoticeLevel::Info, "Loading game data...");

    match fetch_game_files(browser, game) {
        Ok(files) => {
            let catalog = Catalog::open(game.display_name.clone(), &files);
            notifier.notify(NoticeLevel::Success, "Game loaded successfully!");
            Ok(catalog)
        }
        Err(e) => {
            error!(game = %game.display_name, "error loading game: {}", e);
            notifier.notify(NoticeLevel::Error, "Failed to load game data");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Category;
    use crate::repository::{DirEntry, FetchError, FileEntry};
    use serde_json::{json, Value};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// In-memory repository: one game with two good files and one failing
    struct MemoryBrowser {
        documents: HashMap<String, Value>,
    }

    impl MemoryBrowser {
        fn new() -> Self {
            let mut documents = HashMap::new();
            documents.insert(
                "mem://Apex%20Legends/ClassesInfo.json".to_string(),
                json!({ "data": [{ "AActor": [] }] }),
            );
            documents.insert(
                "mem://Apex%20Legends/OffsetsInfo.json".to_string(),
                json!({ "data": [["GWorld", 16]] }),
            );
            Self { documents }
        }
    }

    impl RepositoryBrowser for MemoryBrowser {
        fn list_directories(&self, path: &str) -> FetchResult<Vec<DirEntry>> {
            assert_eq!(path, "");
            Ok(vec![
                DirEntry {
                    name: "Apex%20Legends".into(),
                    kind: EntryKind::Dir,
                },
                DirEntry {
                    name: "README.md".into(),
                    kind: EntryKind::File,
                },
                DirEntry {
                    name: "Dev Build".into(),
                    kind: EntryKind::Dir,
                },
            ])
        }

        fn list_files(&self, path: &str) -> FetchResult<Vec<FileEntry>> {
            if path != "Apex%20Legends" {
                return Err(FetchError::NotFound(path.to_string()));
            }
            Ok(["ClassesInfo.json", "OffsetsInfo.json", "EnumsInfo.json", "notes.txt"]
                .iter()
                .map(|name| FileEntry {
                    name: name.to_string(),
                    download_url: format!("mem://{}/{}", path, name),
                })
                .collect())
        }

        fn fetch_json(&self, url: &str) -> FetchResult<Value> {
            self.documents
                .get(url)
                .cloned()
                .ok_or_else(|| FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                })
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        notices: RefCell<Vec<(NoticeLevel, String)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, level: NoticeLevel, message: &str) {
            self.notices.borrow_mut().push((level, message.to_string()));
        }
    }

    #[test]
    fn test_list_games_keeps_directories() {
        let games = list_games(&MemoryBrowser::new()).unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].name, "Apex%20Legends");
        assert_eq!(games[0].display_name, "Apex Legends");
        assert_eq!(games[0].icon(), "🏆");
        assert_eq!(games[1].icon(), "🧪");
    }

    #[test]
    fn test_filter_games() {
        let games = list_games(&MemoryBrowser::new()).unwrap();
        let found = filter_games(&games, "APEX");
        assert_eq!(found.len(), 1);
        assert_eq!(filter_games(&games, "").len(), 2);
        assert!(filter_games(&games, "valorant").is_empty());
    }

    #[test]
    fn test_game_icon_heuristic() {
        assert_eq!(game_icon("Some FPS Game"), "🔫");
        assert_eq!(game_icon("VALORANT"), "🎯");
        assert_eq!(game_icon("CoD Warzone"), "💣");
        assert_eq!(game_icon("Fortnite"), "🎮");
        assert_eq!(game_icon("Minecraft"), "🎮");
    }

    #[test]
    fn test_open_game_skips_failed_files() {
        let browser = MemoryBrowser::new();
        let notifier = RecordingNotifier::default();
        let game = GameEntry::new("Apex%20Legends");

        let catalog = open_game(&browser, &notifier, &game).unwrap();
        assert_eq!(catalog.game_name(), "Apex Legends");
        assert_eq!(catalog.file_count(), 2);
        assert_eq!(catalog.records(Category::Classes).len(), 1);
        assert_eq!(catalog.records(Category::Offsets).len(), 1);
        assert!(catalog.is_empty(Category::Enums));

        let notices = notifier.notices.borrow();
        assert_eq!(notices[0].0, NoticeLevel::Info);
        assert_eq!(notices[1], (NoticeLevel::Success, "Game loaded successfully!".to_string()));
    }

    #[test]
    fn test_open_game_listing_failure() {
        let browser = MemoryBrowser::new();
        let notifier = RecordingNotifier::default();
        let game = GameEntry::new("Missing");

        assert!(open_game(&browser, &notifier, &game).is_err());
        let notices = notifier.notices.borrow();
        assert_eq!(notices.last().map(|n| n.0), Some(NoticeLevel::Error));
    }
}
