//! Incremental multi-field search over one category's records.
//!
//! The index is the record slice itself; every query is a linear scan.
//! Results never reorder records: they only decide visibility and attach
//! match reasons.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::category::Category;
use crate::record::{hex_digits, Record};

/// Terms shorter than this (after trimming) clear the search
pub const MIN_TERM_CHARS: usize = 2;

/// Reasons shown per record before the ellipsis marker
pub const SHOWN_REASONS: usize = 2;

const PROPERTY_NAME_CHARS: usize = 20;
const MEMBER_NAME_CHARS: usize = 15;

/// Which fields a query is matched against
#[allow(clippy::struct_excessive_bools)] // One toggle per search filter checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub name: bool,
    pub property: bool,
    pub offset: bool,
    pub type_name: bool,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            name: true,
            property: false,
            offset: false,
            type_name: false,
        }
    }
}

impl SearchFilters {
    /// Filters that require scanning members
    fn scans_members(&self) -> bool {
        self.property || self.offset || self.type_name
    }

    pub fn set(&mut self, field: FilterField, enabled: bool) {
        match field {
            FilterField::Name => self.name = enabled,
            FilterField::Property => self.property = enabled,
            FilterField::Offset => self.offset = enabled,
            FilterField::Type => self.type_name = enabled,
        }
    }

    pub fn get(&self, field: FilterField) -> bool {
        match field {
            FilterField::Name => self.name,
            FilterField::Property => self.property,
            FilterField::Offset => self.offset,
            FilterField::Type => self.type_name,
        }
    }
}

/// A single search filter toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Name,
    Property,
    Offset,
    Type,
}

impl FilterField {
    pub const ALL: &'static [FilterField] = &[
        FilterField::Name,
        FilterField::Property,
        FilterField::Offset,
        FilterField::Type,
    ];
}

impl std::fmt::Display for FilterField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Property => write!(f, "property"),
            Self::Offset => write!(f, "offset"),
            Self::Type => write!(f, "type"),
        }
    }
}

impl std::str::FromStr for FilterField {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" | "names" => Ok(Self::Name),
            "property" | "properties" => Ok(Self::Property),
            "offset" | "offsets" => Ok(Self::Offset),
            "type" | "types" => Ok(Self::Type),
            _ => Err(format!("Unknown search filter: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    pub term: String,
    pub filters: SearchFilters,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>, filters: SearchFilters) -> Self {
        Self {
            term: term.into(),
            filters,
        }
    }

    /// Trimmed, lower-cased term, or `None` when too short to search
    fn normalized_term(&self) -> Option<String> {
        let term = self.term.trim();
        if term.chars().count() < MIN_TERM_CHARS {
            return None;
        }
        Some(term.to_lowercase())
    }
}

/// Why a record matched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "member", rename_all = "snake_case")]
pub enum MatchReason {
    Name,
    /// Offsets category: the hex display matched
    OffsetValue,
    /// Member name matched (name truncated for display)
    Property(String),
    /// Member type matched
    Type(String),
    /// Member offset matched
    Offset(String),
}

impl std::fmt::Display for MatchReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::OffsetValue => write!(f, "offset value"),
            Self::Property(member) => write!(f, "property: {}", member),
            Self::Type(member) => write!(f, "type in {}", member),
            Self::Offset(member) => write!(f, "offset in {}", member),
        }
    }
}

/// Match annotation for one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub matched: bool,
    /// Distinct reasons in match order; display shows [`SHOWN_REASONS`]
    pub reasons: Vec<MatchReason>,
    /// Ellipsis marker: more distinct reasons exist than are shown
    pub more: bool,
    /// Reason count before deduplication
    pub total: usize,
}

impl MatchResult {
    /// Visible with no annotation (cleared search)
    fn unfiltered() -> Self {
        Self {
            matched: true,
            reasons: Vec::new(),
            more: false,
            total: 0,
        }
    }

    fn from_reasons(all: Vec<MatchReason>) -> Self {
        let total = all.len();
        let mut distinct: Vec<MatchReason> = Vec::with_capacity(total);
        for reason in all {
            if !distinct.contains(&reason) {
                distinct.push(reason);
            }
        }
        let more = distinct.len() > SHOWN_REASONS;

        Self {
            matched: total > 0,
            reasons: distinct,
            more,
            total,
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, reason) in self.reasons.iter().take(SHOWN_REASONS).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", reason)?;
        }
        if self.more {
            write!(f, "...")?;
        }
        Ok(())
    }
}

/// Records of one category prepared for searching
#[derive(Debug, Clone, Copy)]
pub struct SearchIndex<'a> {
    category: Category,
    records: &'a [Record],
}

pub fn build_index(category: Category, records: &[Record]) -> SearchIndex<'_> {
    SearchIndex { category, records }
}

impl<'a> SearchIndex<'a> {
    pub fn from_catalog(catalog: &'a Catalog, category: Category) -> Self {
        build_index(category, catalog.records(category))
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn records(&self) -> &'a [Record] {
        self.records
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Term too short: everything visible, nothing annotated
    Cleared,
    Searched,
}

/// A visible record, by position in the index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub index: usize,
    pub result: MatchResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    pub mode: SearchMode,
    /// Visible records in catalog order
    pub hits: Vec<SearchHit>,
    /// Sum of every visible record's reasons before deduplication
    pub total_matches: usize,
}

impl SearchOutcome {
    pub fn cleared(record_count: usize) -> Self {
        Self {
            mode: SearchMode::Cleared,
            hits: (0..record_count)
                .map(|index| SearchHit {
                    index,
                    result: MatchResult::unfiltered(),
                })
                .collect(),
            total_matches: 0,
        }
    }

    pub fn matched_count(&self) -> usize {
        self.hits.len()
    }

    /// Result line: empty when cleared
    pub fn summary(&self) -> String {
        match self.mode {
            SearchMode::Cleared => String::new(),
            SearchMode::Searched if self.hits.is_empty() => "No matches found".to_string(),
            SearchMode::Searched => format!(
                "Found {} items ({} matches)",
                self.hits.len(),
                self.total_matches
            ),
        }
    }

    /// Pair each hit with its record
    pub fn resolve<'a>(
        &'a self,
        index: &SearchIndex<'a>,
    ) -> impl Iterator<Item = (&'a Record, &'a MatchResult)> + 'a {
        let records = index.records;
        self.hits
            .iter()
            .filter_map(move |hit| records.get(hit.index).map(|r| (r, &hit.result)))
    }
}

/// Run a query over the index
pub fn search(index: &SearchIndex<'_>, query: &SearchQuery) -> SearchOutcome {
    let Some(term) = query.normalized_term() else {
        return SearchOutcome::cleared(index.records.len());
    };

    let mut hits = Vec::new();
    let mut total_matches = 0;
    for (i, record) in index.records.iter().enumerate() {
        let reasons = match_record(index.category, record, &term, &query.filters);
        if reasons.is_empty() {
            continue;
        }
        total_matches += reasons.len();
        hits.push(SearchHit {
            index: i,
            result: MatchResult::from_reasons(reasons),
        });
    }

    debug!(
        category = %index.category,
        term = %term,
        visible = hits.len(),
        total_matches,
        "search complete"
    );

    SearchOutcome {
        mode: SearchMode::Searched,
        hits,
        total_matches,
    }
}

fn match_record(
    category: Category,
    record: &Record,
    term: &str,
    filters: &SearchFilters,
) -> Vec<MatchReason> {
    let mut reasons = Vec::new();

    if filters.name && record.name().to_lowercase().contains(term) {
        reasons.push(MatchReason::Name);
    }

    if category == Category::Offsets {
        if let Record::Offset(entry) = record {
            if filters.offset && entry.hex_display.to_lowercase().contains(term) {
                reasons.push(MatchReason::OffsetValue);
            }
        }
    } else if filters.scans_members() {
        for member in members_of(record) {
            match_member(&member, term, filters, &mut reasons);
        }
    }

    reasons
}

/// The searchable parts of one member-like entry
struct MemberView<'a> {
    name: &'a str,
    type_name: Option<&'a str>,
    offset: Option<i64>,
}

fn members_of(record: &Record) -> Vec<MemberView<'_>> {
    match record {
        Record::Class(c) => c
            .members
            .iter()
            .map(|m| MemberView {
                name: &m.name,
                type_name: m.type_name.as_deref(),
                offset: m.byte_offset,
            })
            .collect(),
        Record::Functions(g) => g
            .functions
            .iter()
            .map(|f| MemberView {
                name: &f.name,
                type_name: f.return_type.as_deref(),
                offset: f.address,
            })
            .collect(),
        Record::Enum(e) => e
            .values
            .iter()
            .map(|v| MemberView {
                name: &v.label,
                type_name: None,
                offset: None,
            })
            .collect(),
        Record::Offset(_) => Vec::new(),
    }
}

fn match_member(
    member: &MemberView<'_>,
    term: &str,
    filters: &SearchFilters,
    reasons: &mut Vec<MatchReason>,
) {
    if filters.property && member.name.to_lowercase().contains(term) {
        reasons.push(MatchReason::Property(truncate(
            member.name,
            PROPERTY_NAME_CHARS,
        )));
    }

    if filters.type_name {
        if let Some(type_name) = member.type_name {
            if type_name.to_lowercase().contains(term) {
                reasons.push(MatchReason::Type(truncate(member.name, MEMBER_NAME_CHARS)));
            }
        }
    }

    if filters.offset {
        if let Some(offset) = member.offset {
            if format!("0x{}", hex_digits(offset)).contains(term) {
                reasons.push(MatchReason::Offset(truncate(member.name, MEMBER_NAME_CHARS)));
            }
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
