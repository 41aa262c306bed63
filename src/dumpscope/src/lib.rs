//! # dumpscope
//!
//! Decoder, catalog and search engine for reverse-engineered game reflection
//! dumps (classes, structs, enums, functions and raw offsets exported as JSON).
//!
//! This library provides functionality to:
//! - Decode the compact positional dump format into typed records
//! - Hold one game's records as a per-category catalog
//! - Search a category by name, property, type and offset
//! - Project a record into a display-ready view model
//! - List and fetch games from a local directory or the GitHub contents API
//!
//! # Features
//!
//! - `github` (default) - [`GithubBrowser`] over the GitHub contents API
//!
//! ## Example
//!
//! ```no_run
//! use dumpscope::{open_game, Category, GameEntry, LocalBrowser, LogNotifier, Session};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let browser = LocalBrowser::new("dumps");
//! let catalog = open_game(&browser, &LogNotifier, &GameEntry::new("Fortnite"))?;
//!
//! let mut session = Session::open(catalog);
//! session.switch_category(Category::Structs);
//! session.input("vector", std::time::Instant::now());
//! session.flush();
//!
//! for (record, result) in session.visible() {
//!     println!("{} ({})", record.name(), result);
//! }
//! println!("{}", session.summary());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod category;
pub mod debounce;
pub mod decode;
pub mod detail;
pub mod loader;
pub mod record;
pub mod repository;
pub mod search;
pub mod session;

#[doc(inline)]
pub use catalog::{Catalog, CatalogSummary, GameFiles};
#[doc(inline)]
pub use category::{Category, UnknownCategory};
#[doc(inline)]
pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
#[doc(inline)]
pub use decode::{decode, DecodeAnomaly};
#[doc(inline)]
pub use detail::{project, ViewModel};
#[doc(inline)]
pub use loader::{
    fetch_game_files, filter_games, game_icon, list_games, open_game, GameEntry, LogNotifier,
    NoticeLevel, Notifier,
};
#[doc(inline)]
pub use record::{
    ClassRecord, EnumRecord, EnumValue, Function, FunctionGroup, MemberDescriptor, OffsetEntry,
    OffsetValue, Parameter, Record, ValueShape,
};
#[doc(inline)]
pub use repository::{
    DirEntry, EntryKind, FetchError, FetchResult, FileEntry, LocalBrowser, RepositoryBrowser,
};
#[cfg(feature = "github")]
#[doc(inline)]
pub use repository::{GithubBrowser, DEFAULT_API_BASE};
#[doc(inline)]
pub use search::{
    build_index, search, FilterField, MatchReason, MatchResult, SearchFilters, SearchHit,
    SearchIndex, SearchMode, SearchOutcome, SearchQuery,
};
#[doc(inline)]
pub use session::Session;
