//! HTTP catalog source backed by PokéAPI
//!
//! One GET per operation, no retries. The configured timeout is the only
//! timeout applied.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::record::{DetailRecord, Record};
use super::source::CatalogSource;
use super::wire;
use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};

/// PokéAPI-backed catalog source
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    client: reqwest::Client,
    config: CatalogConfig,
}

impl PokeApiClient {
    /// Create a new client from configuration
    pub fn new(config: CatalogConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(CatalogError::ClientBuild)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// GET a URL and return the body of a 2xx response
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| CatalogError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Catalog request failed: HTTP {} from {}", status, url);
            return Err(CatalogError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| CatalogError::Transport {
                url: url.to_string(),
                source,
            })?;

        Ok(body.to_vec())
    }
}

#[async_trait]
impl CatalogSource for PokeApiClient {
    async fn fetch_all_records(&self) -> Result<Vec<Record>> {
        let url = self.config.records_url();
        let body = self.get(&url).await?;
        let records = wire::parse_named_list(&url, &body)?;
        debug!("Fetched {} records", records.len());
        Ok(records)
    }

    async fn fetch_category_names(&self) -> Result<Vec<String>> {
        let url = self.config.categories_url();
        let body = self.get(&url).await?;
        let names = wire::parse_named_list(&url, &body)?
            .into_iter()
            .map(|record| record.name)
            .collect::<Vec<_>>();
        debug!("Fetched {} categories", names.len());
        Ok(names)
    }

    async fn fetch_records_by_category(&self, name: &str) -> Result<Vec<Record>> {
        let url = self.config.category_url(name);
        let body = self.get(&url).await?;
        let records = wire::parse_category_members(&url, &body)?;
        debug!("Category '{}' has {} records", name, records.len());
        Ok(records)
    }

    async fn fetch_detail(&self, source_ref: &str) -> Result<DetailRecord> {
        let body = self.get(source_ref).await?;
        wire::parse_detail(source_ref, &body)
    }

    fn name(&self) -> &'static str {
        "pokeapi"
    }
}
