//! Browser session - the single owner of all browse state
//!
//! The session owns the record store, the category names and the detail
//! slot. Network lookups are split into a `begin_*` step that updates the
//! filter mode and returns a request, and an `apply_*` step that takes the
//! lookup's result. The event loop is free to run the lookup in between on
//! another task; the `select_*` helpers do all three steps inline.
//!
//! ## Ordering of responses
//!
//! Every filter action (load, "All", text search, category selection) bumps
//! a generation counter. A category response is applied only if its request
//! carries the current generation, so a late response can never overwrite
//! the result of a newer action. Detail responses are not sequenced; see
//! [`DetailResolver`].

use tracing::{debug, info, warn};

use crate::catalog::{CatalogSource, DetailRecord, Record};
use crate::detail::{DetailRequest, DetailResolver, RowState};
use crate::error::{CatalogError, Result};
use crate::filter::filter_by_text;
use crate::store::{CatalogStore, FilterMode};

/// An outstanding category lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRequest {
    pub generation: u64,
    pub name: String,
}

/// What happened to a category response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryOutcome {
    /// The displayed set now holds this many records
    Applied(usize),
    /// A newer filter action superseded the request; nothing changed
    Stale,
    /// The lookup failed; nothing changed
    Failed,
}

#[derive(Debug, Default)]
pub struct BrowserSession {
    store: CatalogStore,
    categories: Vec<String>,
    details: DetailResolver,
    generation: u64,
}

impl BrowserSession {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Apply the startup record fetch. Returns whether records were loaded.
    pub fn load_records(&mut self, result: Result<Vec<Record>>) -> bool {
        match result {
            Ok(records) => {
                info!("Loaded {} records", records.len());
                self.next_generation();
                self.store.load(records);
                true
            }
            Err(e) => {
                warn!("Error fetching records: {}", e);
                false
            }
        }
    }

    /// Apply the startup category fetch. Returns whether names were loaded.
    pub fn load_categories(&mut self, result: Result<Vec<String>>) -> bool {
        match result {
            Ok(names) => {
                debug!("Loaded {} categories", names.len());
                self.categories = names;
                true
            }
            Err(e) => {
                warn!("Error fetching categories: {}", e);
                false
            }
        }
    }

    /// Fetch records and categories from `source` and load both
    pub async fn load_from(&mut self, source: &dyn CatalogSource) {
        let (records, categories) = tokio::join!(
            source.fetch_all_records(),
            source.fetch_category_names()
        );
        self.load_records(records);
        self.load_categories(categories);
    }

    /// Show every record and clear the category selection
    pub fn show_all(&mut self) {
        self.next_generation();
        self.store.reset();
    }

    /// Filter the full set by `query`. A blank query shows everything.
    pub fn search(&mut self, query: &str) {
        self.next_generation();
        let displayed = filter_by_text(self.store.full(), query);
        let mode = if query.trim().is_empty() {
            FilterMode::All
        } else {
            FilterMode::ByText(query.to_string())
        };
        self.store.set_mode(mode);
        self.store.set_displayed(displayed);
    }

    /// Select a category. The displayed set changes when the response is applied.
    pub fn begin_category(&mut self, name: &str) -> CategoryRequest {
        let generation = self.next_generation();
        self.store.set_mode(FilterMode::ByCategory(name.to_string()));
        debug!("Requesting category '{}' (generation {})", name, generation);
        CategoryRequest {
            generation,
            name: name.to_string(),
        }
    }

    pub fn apply_category(
        &mut self,
        request: &CategoryRequest,
        result: std::result::Result<Vec<Record>, CatalogError>,
    ) -> CategoryOutcome {
        if request.generation != self.generation {
            debug!(
                "Discarding stale response for category '{}' (generation {} < {})",
                request.name, request.generation, self.generation
            );
            return CategoryOutcome::Stale;
        }

        match result {
            Ok(records) => {
                let count = records.len();
                self.store.set_displayed(records);
                CategoryOutcome::Applied(count)
            }
            Err(e) => {
                warn!("Error fetching records for category '{}': {}", request.name, e);
                CategoryOutcome::Failed
            }
        }
    }

    /// Select a category and wait for its records
    pub async fn select_category(
        &mut self,
        source: &dyn CatalogSource,
        name: &str,
    ) -> CategoryOutcome {
        let request = self.begin_category(name);
        let result = source.fetch_records_by_category(name).await;
        self.apply_category(&request, result)
    }

    /// Start resolving the detail of a selected row
    pub fn begin_detail(&mut self, record: &Record) -> DetailRequest {
        self.details.begin(record)
    }

    pub fn apply_detail(
        &mut self,
        request: &DetailRequest,
        result: std::result::Result<DetailRecord, CatalogError>,
    ) -> bool {
        self.details.apply(request, result)
    }

    /// Select a row and wait for its detail
    pub async fn select_record(&mut self, source: &dyn CatalogSource, record: &Record) -> bool {
        self.details.resolve(source, record).await
    }

    /// First record in the full set with exactly this name, ignoring case
    pub fn find_by_name(&self, name: &str) -> Option<&Record> {
        self.store
            .full()
            .iter()
            .find(|record| record.name.eq_ignore_ascii_case(name))
    }

    pub fn full(&self) -> &[Record] {
        self.store.full()
    }

    pub fn displayed(&self) -> &[Record] {
        self.store.displayed()
    }

    pub fn mode(&self) -> &FilterMode {
        self.store.mode()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn detail(&self) -> Option<&DetailRecord> {
        self.details.current()
    }

    pub fn detail_for(&self, record: &Record) -> Option<&DetailRecord> {
        self.details.detail_for(record)
    }

    pub fn row_state(&self, record: &Record) -> RowState {
        self.details.row_state(record)
    }
}
