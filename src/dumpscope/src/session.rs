//! Viewer session state for one opened game.
//!
//! Holds the catalog together with the active category, the search filters,
//! the pending (debounced) search term, the latest search outcome and the
//! selected record. Dropping or closing the session releases all of it.

use std::time::Instant;

use tracing::debug;

use crate::catalog::Catalog;
use crate::category::Category;
use crate::debounce::Debouncer;
use crate::detail::{project, ViewModel};
use crate::record::Record;
use crate::search::{
    search, FilterField, MatchResult, SearchFilters, SearchIndex, SearchOutcome, SearchQuery,
};

#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    category: Category,
    filters: SearchFilters,
    term: String,
    pending: Debouncer<String>,
    outcome: SearchOutcome,
    selected: Option<usize>,
}

impl Session {
    /// Start on the classes category with default filters
    pub fn open(catalog: Catalog) -> Self {
        let mut session = Self {
            catalog,
            category: Category::Classes,
            filters: SearchFilters::default(),
            term: String::new(),
            pending: Debouncer::default(),
            outcome: SearchOutcome::cleared(0),
            selected: None,
        };
        session.reset_view();
        session
    }

    pub fn close(self) {
        self.catalog.close();
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn filters(&self) -> SearchFilters {
        self.filters
    }

    /// Last raw input
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// Change category: clears the term, pending search and results
    pub fn switch_category(&mut self, category: Category) {
        debug!(from = %self.category, to = %category, "switching category");
        self.category = category;
        self.term.clear();
        self.pending.cancel();
        self.reset_view();
    }

    /// Replace the filters; an active term is re-searched immediately
    pub fn set_filters(&mut self, filters: SearchFilters) {
        self.filters = filters;
        let term = self.term.trim().to_string();
        if !term.is_empty() {
            self.pending.cancel();
            self.apply(&term);
        }
    }

    pub fn set_filter(&mut self, field: FilterField, enabled: bool) {
        let mut filters = self.filters;
        filters.set(field, enabled);
        self.set_filters(filters);
    }

    /// Record new input. Empty input clears at once; anything else waits for
    /// the quiet period, superseding the previous pending term.
    pub fn input(&mut self, term: &str, now: Instant) {
        self.term = term.to_string();
        let trimmed = term.trim();
        if trimmed.is_empty() {
            self.pending.cancel();
            self.outcome = SearchOutcome::cleared(self.records().len());
        } else {
            self.pending.schedule(trimmed.to_string(), now);
        }
    }

    /// Run the pending search if its quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending.poll(now) {
            Some(term) => {
                self.apply(&term);
                true
            }
            None => false,
        }
    }

    /// Run the pending search now
    pub fn flush(&mut self) -> bool {
        match self.pending.take() {
            Some(term) => {
                self.apply(&term);
                true
            }
            None => false,
        }
    }

    pub fn outcome(&self) -> &SearchOutcome {
        &self.outcome
    }

    pub fn summary(&self) -> String {
        self.outcome.summary()
    }

    /// Records of the active category
    pub fn records(&self) -> &[Record] {
        self.catalog.records(self.category)
    }

    /// Visible records with their match annotations, in catalog order
    pub fn visible(&self) -> impl Iterator<Item = (&Record, &MatchResult)> {
        let index = SearchIndex::from_catalog(&self.catalog, self.category);
        self.outcome.resolve(&index)
    }

    /// Select the first record of the active category with this name
    pub fn select(&mut self, name: &str) -> Option<ViewModel> {
        let index = self.records().iter().position(|r| r.name() == name)?;
        self.selected = Some(index);
        self.selected_view()
    }

    pub fn selected(&self) -> Option<&Record> {
        self.selected.and_then(|i| self.records().get(i))
    }

    pub fn selected_view(&self) -> Option<ViewModel> {
        self.selected().map(|r| project(r, self.category))
    }

    fn apply(&mut self, term: &str) {
        let index = SearchIndex::from_catalog(&self.catalog, self.category);
        self.outcome = search(&index, &SearchQuery::new(term, self.filters));
    }

    fn reset_view(&mut self) {
        let count = self.records().len();
        self.outcome = SearchOutcome::cleared(count);
        self.selected = (count > 0).then_some(0);
    }
}
