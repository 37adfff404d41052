//! Detail resolution for the selected record
//!
//! A single slot holds the latest resolved detail. Lookups are not
//! sequenced: when two selections overlap, whichever response is applied
//! last owns the slot.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::catalog::{CatalogSource, DetailRecord, Record};
use crate::error::CatalogError;

/// Presentation state of one row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Collapsed,
    Loading,
    Expanded,
}

/// A detail lookup that has been started but not applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub name: String,
    pub source_ref: String,
}

impl DetailRequest {
    pub fn for_record(record: &Record) -> Self {
        Self {
            name: record.name.clone(),
            source_ref: record.source_ref.clone(),
        }
    }
}

/// Single-slot detail holder
#[derive(Debug, Default)]
pub struct DetailResolver {
    slot: Option<DetailRecord>,
    /// In-flight lookups per record name
    pending: HashMap<String, usize>,
}

impl DetailResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a lookup for `record` as in flight
    pub fn begin(&mut self, record: &Record) -> DetailRequest {
        *self.pending.entry(record.name.clone()).or_insert(0) += 1;
        debug!("Resolving detail for '{}'", record.name);
        DetailRequest::for_record(record)
    }

    /// Apply a finished lookup.
    ///
    /// Success replaces the slot. Failure is logged and the slot is left
    /// as it was. Returns whether the slot changed.
    pub fn apply(
        &mut self,
        request: &DetailRequest,
        result: Result<DetailRecord, CatalogError>,
    ) -> bool {
        if let Some(count) = self.pending.get_mut(&request.name) {
            *count -= 1;
            if *count == 0 {
                self.pending.remove(&request.name);
            }
        }

        match result {
            Ok(detail) => {
                if detail.name != request.name {
                    debug!(
                        "Detail for '{}' came back named '{}'",
                        request.name, detail.name
                    );
                }
                self.slot = Some(detail);
                true
            }
            Err(e) => {
                warn!("Error fetching details for '{}': {}", request.name, e);
                false
            }
        }
    }

    /// Look up, then apply, in one step
    pub async fn resolve(&mut self, source: &dyn CatalogSource, record: &Record) -> bool {
        let request = self.begin(record);
        let result = source.fetch_detail(&request.source_ref).await;
        self.apply(&request, result)
    }

    /// Currently held detail
    pub fn current(&self) -> Option<&DetailRecord> {
        self.slot.as_ref()
    }

    /// Detail to show inline for `record`, if it owns the slot
    pub fn detail_for(&self, record: &Record) -> Option<&DetailRecord> {
        self.slot.as_ref().filter(|detail| detail.name == record.name)
    }

    pub fn is_loading(&self, record: &Record) -> bool {
        self.pending.contains_key(&record.name)
    }

    pub fn row_state(&self, record: &Record) -> RowState {
        if self.is_loading(record) {
            RowState::Loading
        } else if self.detail_for(record).is_some() {
            RowState::Expanded
        } else {
            RowState::Collapsed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, id: u32) -> Record {
        Record::new(name, format!("https://pokeapi.co/api/v2/pokemon/{id}/"))
    }

    fn detail(name: &str) -> DetailRecord {
        DetailRecord {
            name: name.to_string(),
            height: 7,
            weight: 69,
            type_names: vec!["grass".to_string()],
        }
    }

    fn failure() -> CatalogError {
        CatalogError::Status {
            url: "https://pokeapi.co/api/v2/pokemon/1/".to_string(),
            status: 500,
        }
    }

    #[test]
    fn test_collapsed_loading_expanded() {
        let mut resolver = DetailResolver::new();
        let bulba = record("bulbasaur", 1);

        assert_eq!(resolver.row_state(&bulba), RowState::Collapsed);

        let request = resolver.begin(&bulba);
        assert_eq!(resolver.row_state(&bulba), RowState::Loading);

        assert!(resolver.apply(&request, Ok(detail("bulbasaur"))));
        assert_eq!(resolver.row_state(&bulba), RowState::Expanded);
    }

    #[test]
    fn test_selecting_other_row_collapses_first() {
        let mut resolver = DetailResolver::new();
        let bulba = record("bulbasaur", 1);
        let pika = record("pikachu", 25);

        let first = resolver.begin(&bulba);
        resolver.apply(&first, Ok(detail("bulbasaur")));

        let second = resolver.begin(&pika);
        // Still expanded until the other detail lands
        assert_eq!(resolver.row_state(&bulba), RowState::Expanded);

        resolver.apply(&second, Ok(detail("pikachu")));
        assert_eq!(resolver.row_state(&bulba), RowState::Collapsed);
        assert_eq!(resolver.row_state(&pika), RowState::Expanded);
    }

    #[test]
    fn test_failure_leaves_slot() {
        let mut resolver = DetailResolver::new();
        let bulba = record("bulbasaur", 1);
        let pika = record("pikachu", 25);

        let first = resolver.begin(&bulba);
        resolver.apply(&first, Ok(detail("bulbasaur")));

        let second = resolver.begin(&pika);
        assert!(!resolver.apply(&second, Err(failure())));

        assert_eq!(resolver.row_state(&pika), RowState::Collapsed);
        assert_eq!(resolver.current().map(|d| d.name.as_str()), Some("bulbasaur"));
    }

    #[test]
    fn test_failure_from_loading_collapses() {
        let mut resolver = DetailResolver::new();
        let bulba = record("bulbasaur", 1);

        let request = resolver.begin(&bulba);
        resolver.apply(&request, Err(failure()));

        assert_eq!(resolver.row_state(&bulba), RowState::Collapsed);
        assert!(resolver.current().is_none());
    }

    #[test]
    fn test_double_select_stays_loading_until_both_land() {
        let mut resolver = DetailResolver::new();
        let bulba = record("bulbasaur", 1);

        let first = resolver.begin(&bulba);
        let second = resolver.begin(&bulba);

        resolver.apply(&first, Ok(detail("bulbasaur")));
        assert_eq!(resolver.row_state(&bulba), RowState::Loading);

        resolver.apply(&second, Ok(detail("bulbasaur")));
        assert_eq!(resolver.row_state(&bulba), RowState::Expanded);
    }
}
