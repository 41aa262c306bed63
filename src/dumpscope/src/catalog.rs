//! Per-game catalog of decoded records.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::category::Category;
use crate::decode::decode;
use crate::record::Record;

/// Raw JSON documents of one game, keyed by file name
pub type GameFiles = HashMap<String, Value>;

/// Decoded records of one game, one ordered list per category
#[derive(Debug, Clone)]
pub struct Catalog {
    game_name: String,
    file_count: usize,
    records: [Vec<Record>; 5],
}

/// Record counts for a catalog, suitable for a summary line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub game_name: String,
    /// JSON files that were fetched, including ones that map to no category
    pub file_count: usize,
    pub counts: Vec<(Category, usize)>,
}

impl Catalog {
    /// Decode every known category file present in `files`.
    ///
    /// Categories without a file are left empty.
    pub fn open(game_name: impl Into<String>, files: &GameFiles) -> Self {
        let game_name = game_name.into();
        let mut records: [Vec<Record>; 5] = Default::default();

        for category in Category::ALL {
            let raw = files.get(category.file_name());
            let decoded = decode(*category, raw);
            debug!(
                game = %game_name,
                %category,
                present = raw.is_some(),
                records = decoded.len(),
                "decoded category"
            );
            records[category.index()] = decoded;
        }

        Self {
            game_name,
            file_count: files.len(),
            records,
        }
    }

    /// Release the catalog. Indexes borrowed from it must already be gone.
    pub fn close(self) {
        debug!(game = %self.game_name, "closing catalog");
    }

    pub fn game_name(&self) -> &str {
        &self.game_name
    }

    pub fn file_count(&self) -> usize {
        self.file_count
    }

    /// Records of a category in dump order
    pub fn records(&self, category: Category) -> &[Record] {
        &self.records[category.index()]
    }

    /// True when the category has no data (file missing or empty)
    pub fn is_empty(&self, category: Category) -> bool {
        self.records(category).is_empty()
    }

    /// First record with this exact name
    pub fn find(&self, category: Category, name: &str) -> Option<&Record> {
        self.records(category).iter().find(|r| r.name() == name)
    }

    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            game_name: self.game_name.clone(),
            file_count: self.file_count,
            counts: Category::ALL
                .iter()
                .map(|c| (*c, self.records(*c).len()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_files() -> GameFiles {
        let mut files = GameFiles::new();
        files.insert(
            "ClassesInfo.json".into(),
            json!({ "data": [{ "APlayer": [] }, { "AEnemy": [] }] }),
        );
        files.insert(
            "OffsetsInfo.json".into(),
            json!({ "data": [["GWorld", 305419896]] }),
        );
        files.insert("Readme.json".into(), json!({ "note": "ignored" }));
        files
    }

    #[test]
    fn test_open_maps_files_to_categories() {
        let catalog = Catalog::open("Test Game", &sample_files());
        assert_eq!(catalog.game_name(), "Test Game");
        assert_eq!(catalog.file_count(), 3);
        assert_eq!(catalog.records(Category::Classes).len(), 2);
        assert_eq!(catalog.records(Category::Offsets).len(), 1);
        assert!(catalog.is_empty(Category::Structs));
        assert!(catalog.is_empty(Category::Enums));
        assert!(catalog.is_empty(Category::Functions));
    }

    #[test]
    fn test_find_and_summary() {
        let catalog = Catalog::open("Test Game", &sample_files());
        assert!(catalog.find(Category::Classes, "AEnemy").is_some());
        assert!(catalog.find(Category::Classes, "aenemy").is_none());

        let summary = catalog.summary();
        assert_eq!(summary.counts[0], (Category::Classes, 2));
        assert_eq!(summary.counts[4], (Category::Offsets, 1));
        catalog.close();
    }
}
