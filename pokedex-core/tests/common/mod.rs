//! Test helpers shared by the integration tests
//!
//! Provides in-memory catalog sources so no test touches the network.

#![allow(dead_code)]

use async_trait::async_trait;
use pokedex_core::error::Result;
use pokedex_core::{CatalogError, CatalogSource, DetailRecord, Record};
use std::collections::HashMap;
use std::sync::Once;
use tokio::sync::Notify;

/// Initialize logging for tests (only once per test run)
static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

pub fn record(name: &str, id: u32) -> Record {
    Record::new(name, format!("https://pokeapi.co/api/v2/pokemon/{id}/"))
}

pub fn detail(name: &str, height: u32, weight: u32, types: &[&str]) -> DetailRecord {
    DetailRecord {
        name: name.to_string(),
        height,
        weight,
        type_names: types.iter().map(|t| t.to_string()).collect(),
    }
}

fn not_found(url: &str) -> CatalogError {
    CatalogError::Status {
        url: url.to_string(),
        status: 404,
    }
}

/// Catalog served from memory
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    pub records: Vec<Record>,
    pub categories: Vec<(String, Vec<Record>)>,
    pub details: HashMap<String, DetailRecord>,
}

impl StaticSource {
    /// Small starter catalog: three starters plus vulpix
    pub fn starters() -> Self {
        let bulbasaur = record("Bulbasaur", 1);
        let charmander = record("Charmander", 4);
        let squirtle = record("Squirtle", 7);
        let vulpix = record("Vulpix", 37);

        let mut details = HashMap::new();
        details.insert(
            bulbasaur.source_ref.clone(),
            detail("Bulbasaur", 7, 69, &["grass", "poison"]),
        );
        details.insert(
            charmander.source_ref.clone(),
            detail("Charmander", 6, 85, &["fire"]),
        );
        details.insert(squirtle.source_ref.clone(), detail("Squirtle", 5, 90, &["water"]));

        Self {
            records: vec![bulbasaur.clone(), charmander.clone(), squirtle.clone()],
            categories: vec![
                ("fire".to_string(), vec![charmander, vulpix]),
                ("water".to_string(), vec![squirtle]),
                ("grass".to_string(), vec![bulbasaur]),
            ],
            details,
        }
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    async fn fetch_all_records(&self) -> Result<Vec<Record>> {
        Ok(self.records.clone())
    }

    async fn fetch_category_names(&self) -> Result<Vec<String>> {
        Ok(self.categories.iter().map(|(name, _)| name.clone()).collect())
    }

    async fn fetch_records_by_category(&self, name: &str) -> Result<Vec<Record>> {
        self.categories
            .iter()
            .find(|(category, _)| category == name)
            .map(|(_, records)| records.clone())
            .ok_or_else(|| not_found(name))
    }

    async fn fetch_detail(&self, source_ref: &str) -> Result<DetailRecord> {
        self.details
            .get(source_ref)
            .cloned()
            .ok_or_else(|| not_found(source_ref))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Wraps a source and holds category and detail responses until released
pub struct GatedSource {
    inner: StaticSource,
    gates: HashMap<String, Notify>,
}

impl GatedSource {
    /// Gate lookups whose category name or reference URL is in `keys`
    pub fn new(inner: StaticSource, keys: &[&str]) -> Self {
        let gates = keys
            .iter()
            .map(|key| (key.to_string(), Notify::new()))
            .collect();
        Self { inner, gates }
    }

    /// Let the lookup for `key` complete
    pub fn release(&self, key: &str) {
        if let Some(gate) = self.gates.get(key) {
            gate.notify_one();
        }
    }

    async fn wait(&self, key: &str) {
        if let Some(gate) = self.gates.get(key) {
            gate.notified().await;
        }
    }
}

#[async_trait]
impl CatalogSource for GatedSource {
    async fn fetch_all_records(&self) -> Result<Vec<Record>> {
        self.inner.fetch_all_records().await
    }

    async fn fetch_category_names(&self) -> Result<Vec<String>> {
        self.inner.fetch_category_names().await
    }

    async fn fetch_records_by_category(&self, name: &str) -> Result<Vec<Record>> {
        self.wait(name).await;
        self.inner.fetch_records_by_category(name).await
    }

    async fn fetch_detail(&self, source_ref: &str) -> Result<DetailRecord> {
        self.wait(source_ref).await;
        self.inner.fetch_detail(source_ref).await
    }

    fn name(&self) -> &'static str {
        "gated"
    }
}
