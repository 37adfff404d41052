/// Terminal User Interface for browsing the catalog
pub mod app;
pub mod events;
pub mod state;
pub mod theme;
pub mod view;

use std::sync::Arc;

use anyhow::Result;
use pokedex_core::{CatalogConfig, CatalogSource};

/// Entry point for the interactive browser
pub async fn run(source: Arc<dyn CatalogSource>, config: CatalogConfig) -> Result<()> {
    let app = app::App::new(source, config);
    app.run().await
}
