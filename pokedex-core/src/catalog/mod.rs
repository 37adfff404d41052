//! Pokedex Catalog - remote record lookups
//!
//! # Architecture
//!
//! ```text
//! Catalog service (PokéAPI)
//!     │
//!     ├── /pokemon?limit=N  ← every record, one page
//!     ├── /type             ← category names
//!     ├── /type/{name}      ← records of one category
//!     └── {record url}      ← one record's detail
//!            │
//!            ▼
//!     CatalogSource (PokeApiClient)
//!            │
//!            ▼
//!     BrowserSession        ← store, filter mode, detail slot
//! ```

mod category;
mod client;
mod record;
mod source;
mod wire;

pub use category::{category_color, display_label, CategoryColor, DEFAULT_CATEGORY_COLOR};
pub use client::PokeApiClient;
pub use record::{derive_id, DetailRecord, Record};
pub use source::CatalogSource;

#[cfg(test)]
pub(crate) use source::MockSource;
