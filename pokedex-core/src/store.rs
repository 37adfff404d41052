//! Record store: the full set and the displayed view of it

use serde::Serialize;

use crate::catalog::Record;

/// Which action produced the displayed set.
///
/// Category and text filters do not compose: the last action wins.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    All,
    ByCategory(String),
    ByText(String),
}

impl FilterMode {
    /// Selected category, if the mode is a category filter
    pub fn category(&self) -> Option<&str> {
        match self {
            FilterMode::ByCategory(name) => Some(name.as_str()),
            _ => None,
        }
    }
}

/// Holds the full record set and the currently displayed subset.
///
/// Every update replaces a set wholesale.
#[derive(Debug, Default)]
pub struct CatalogStore {
    full: Vec<Record>,
    displayed: Vec<Record>,
    mode: FilterMode,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both sets to `records`
    pub fn load(&mut self, records: Vec<Record>) {
        self.displayed = records.clone();
        self.full = records;
        self.mode = FilterMode::All;
    }

    /// Replace the displayed set; `full` is untouched
    pub fn set_displayed(&mut self, records: Vec<Record>) {
        self.displayed = records;
    }

    /// Show the full set again and clear any category selection
    pub fn reset(&mut self) {
        self.displayed = self.full.clone();
        self.mode = FilterMode::All;
    }

    pub fn set_mode(&mut self, mode: FilterMode) {
        self.mode = mode;
    }

    pub fn full(&self) -> &[Record] {
        &self.full
    }

    pub fn displayed(&self) -> &[Record] {
        &self.displayed
    }

    pub fn mode(&self) -> &FilterMode {
        &self.mode
    }
}
