//! Catalog source trait - abstraction over where records come from
//!
//! The browser session and the terminal UI only talk to this trait:
//! - PokeApiClient (HTTP)
//! - in-memory sources (tests)

use async_trait::async_trait;

use super::record::{DetailRecord, Record};
use crate::error::Result;

/// Read-only lookups against a catalog.
///
/// Implementations report failures and never retry; callers decide what a
/// failure means for their state.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Every record, in one bulk page
    async fn fetch_all_records(&self) -> Result<Vec<Record>>;

    /// Names of all categories
    async fn fetch_category_names(&self) -> Result<Vec<String>>;

    /// Records the catalog reports as belonging to `name`
    async fn fetch_records_by_category(&self, name: &str) -> Result<Vec<Record>>;

    /// Detail document behind a record's reference URL
    async fn fetch_detail(&self, source_ref: &str) -> Result<DetailRecord>;

    /// Source identifier for logging
    fn name(&self) -> &'static str;
}

/// Mock source for unit tests
#[cfg(test)]
pub(crate) struct MockSource {
    pub records: Vec<Record>,
    pub categories: std::collections::HashMap<String, Vec<Record>>,
    pub details: std::collections::HashMap<String, DetailRecord>,
}

#[cfg(test)]
impl MockSource {
    fn missing(url: &str) -> crate::error::CatalogError {
        crate::error::CatalogError::Status {
            url: url.to_string(),
            status: 404,
        }
    }
}

#[cfg(test)]
#[async_trait]
impl CatalogSource for MockSource {
    async fn fetch_all_records(&self) -> Result<Vec<Record>> {
        Ok(self.records.clone())
    }

    async fn fetch_category_names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.categories.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn fetch_records_by_category(&self, name: &str) -> Result<Vec<Record>> {
        self.categories
            .get(name)
            .cloned()
            .ok_or_else(|| Self::missing(name))
    }

    async fn fetch_detail(&self, source_ref: &str) -> Result<DetailRecord> {
        self.details
            .get(source_ref)
            .cloned()
            .ok_or_else(|| Self::missing(source_ref))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
