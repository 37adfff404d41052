//! Response shapes of the catalog service and their mapping onto records

use serde::Deserialize;

use super::record::{DetailRecord, Record};
use crate::error::{CatalogError, Result};

/// `{ name, url }` pair used throughout the API
#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
    url: String,
}

impl From<NamedResource> for Record {
    fn from(resource: NamedResource) -> Self {
        Record::new(resource.name, resource.url)
    }
}

/// Paged listing (`/pokemon`, `/type`)
#[derive(Debug, Deserialize)]
struct NamedList {
    results: Vec<NamedResource>,
}

/// `/type/{name}`
#[derive(Debug, Deserialize)]
struct CategoryResponse {
    pokemon: Vec<CategoryMember>,
}

#[derive(Debug, Deserialize)]
struct CategoryMember {
    pokemon: NamedResource,
}

/// A single record's detail document; only the displayed fields are read
#[derive(Debug, Deserialize)]
struct DetailResponse {
    name: String,
    height: u32,
    weight: u32,
    #[serde(default)]
    types: Vec<TypeSlot>,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    kind: TypeName,
}

#[derive(Debug, Deserialize)]
struct TypeName {
    name: String,
}

fn decode<T: for<'de> Deserialize<'de>>(url: &str, body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|source| CatalogError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Records of a paged listing, in service order
pub(crate) fn parse_named_list(url: &str, body: &[u8]) -> Result<Vec<Record>> {
    let list: NamedList = decode(url, body)?;
    Ok(list.results.into_iter().map(Record::from).collect())
}

/// Members of one category, in service order
pub(crate) fn parse_category_members(url: &str, body: &[u8]) -> Result<Vec<Record>> {
    let response: CategoryResponse = decode(url, body)?;
    Ok(response
        .pokemon
        .into_iter()
        .map(|member| Record::from(member.pokemon))
        .collect())
}

pub(crate) fn parse_detail(url: &str, body: &[u8]) -> Result<DetailRecord> {
    let response: DetailResponse = decode(url, body)?;
    Ok(DetailRecord {
        name: response.name,
        height: response.height,
        weight: response.weight,
        type_names: response.types.into_iter().map(|slot| slot.kind.name).collect(),
    })
}
