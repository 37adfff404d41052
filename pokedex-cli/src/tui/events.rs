use pokedex_core::detail::DetailRequest;
use pokedex_core::session::CategoryRequest;
use pokedex_core::{CatalogError, DetailRecord, Record};
use ratatui::crossterm::event::KeyEvent;

/// All possible events in the application
#[derive(Debug)]
pub enum AppEvent {
    // Input events
    Key(KeyEvent),
    /// Terminal size changed; the next draw picks up the new area
    Resize,

    // Async task events - startup
    RecordsLoaded(Result<Vec<Record>, CatalogError>),
    CategoriesLoaded(Result<Vec<String>, CatalogError>),

    // Async task events - user actions
    CategoryLoaded {
        request: CategoryRequest,
        result: Result<Vec<Record>, CatalogError>,
    },
    DetailLoaded {
        request: DetailRequest,
        result: Result<DetailRecord, CatalogError>,
    },

    // UI events
    Tick,
}
