//! Pokedex core library exports
//!
//! Everything below the terminal UI lives here: the remote catalog client,
//! the record store, text filtering, detail resolution and the browser
//! session that ties them together.

pub mod catalog;
pub mod config;
pub mod detail;
pub mod error;
pub mod filter;
pub mod session;
pub mod store;

pub use catalog::{CatalogSource, DetailRecord, PokeApiClient, Record};
pub use config::CatalogConfig;
pub use error::{CatalogError, ConfigError, Result};
pub use session::BrowserSession;
pub use store::{CatalogStore, FilterMode};
