//! Non-interactive catalog commands
//!
//! Each command drives a `BrowserSession` the same way the interactive
//! browser does and prints the resulting view.

use anyhow::{Context, Result};
use tabled::{
    settings::{object::Rows, Alignment, Modify, Style},
    Table, Tabled,
};

use pokedex_core::catalog::{category_color, display_label};
use pokedex_core::session::CategoryOutcome;
use pokedex_core::{BrowserSession, CatalogConfig, CatalogSource, Record};

/// Table row for record listings
#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Sprite")]
    sprite: String,
}

/// Table row for types
#[derive(Tabled)]
struct TypeRow {
    #[tabled(rename = "Type")]
    name: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Color")]
    color: String,
}

fn styled_table<T: Tabled>(rows: &[T]) -> String {
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}

fn record_json(record: &Record, config: &CatalogConfig) -> serde_json::Value {
    serde_json::json!({
        "id": record.id,
        "name": record.name,
        "url": record.source_ref,
        "sprite": config.sprite_url(&record.id),
    })
}

/// Load the full record set, failing if the catalog is unreachable
async fn load_session(source: &dyn CatalogSource) -> Result<BrowserSession> {
    let mut session = BrowserSession::new();
    let loaded = session.load_records(source.fetch_all_records().await);
    if !loaded {
        anyhow::bail!("Could not fetch the record list from the catalog");
    }
    Ok(session)
}

pub async fn execute_list(
    source: &dyn CatalogSource,
    config: &CatalogConfig,
    category: Option<String>,
    search: Option<String>,
    json_output: bool,
) -> Result<()> {
    let session = match (category, search) {
        (Some(name), _) => {
            // Category membership comes from the catalog, not the bulk list
            let mut session = BrowserSession::new();
            match session.select_category(source, &name).await {
                CategoryOutcome::Applied(_) => session,
                CategoryOutcome::Failed | CategoryOutcome::Stale => {
                    anyhow::bail!("Could not fetch records of type '{name}'")
                }
            }
        }
        (None, Some(query)) => {
            let mut session = load_session(source).await?;
            session.search(&query);
            session
        }
        (None, None) => load_session(source).await?,
    };

    let records = session.displayed();

    if json_output {
        let output = serde_json::json!({
            "filter": session.mode(),
            "count": records.len(),
            "records": records.iter().map(|r| record_json(r, config)).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No records found.");
        return Ok(());
    }

    let rows: Vec<RecordRow> = records
        .iter()
        .map(|record| RecordRow {
            id: record.id.clone(),
            name: record.name.clone(),
            sprite: config.sprite_url(&record.id),
        })
        .collect();

    println!("Found {} record(s):\n", rows.len());
    println!("{}", styled_table(&rows));

    Ok(())
}

pub async fn execute_types(source: &dyn CatalogSource, json_output: bool) -> Result<()> {
    let mut session = BrowserSession::new();
    if !session.load_categories(source.fetch_category_names().await) {
        anyhow::bail!("Could not fetch the type list from the catalog");
    }

    if json_output {
        let output: Vec<serde_json::Value> = session
            .categories()
            .iter()
            .map(|name| {
                serde_json::json!({
                    "name": name,
                    "label": display_label(name),
                    "color": category_color(name).hex(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let rows: Vec<TypeRow> = session
        .categories()
        .iter()
        .map(|name| TypeRow {
            name: name.clone(),
            label: display_label(name),
            color: category_color(name).hex().to_string(),
        })
        .collect();

    println!("{}", styled_table(&rows));
    Ok(())
}

pub async fn execute_show(
    source: &dyn CatalogSource,
    config: &CatalogConfig,
    name: &str,
    json_output: bool,
) -> Result<()> {
    let mut session = load_session(source).await?;

    let record = session
        .find_by_name(name)
        .cloned()
        .with_context(|| format!("Record '{name}' not found in catalog"))?;

    if !session.select_record(source, &record).await {
        anyhow::bail!("Could not fetch details for '{}'", record.name);
    }

    let detail = session
        .detail_for(&record)
        .context("Catalog returned details for a different record")?;

    if json_output {
        let output = serde_json::json!({
            "id": record.id,
            "name": detail.name,
            "height": detail.height,
            "weight": detail.weight,
            "types": detail.type_names,
            "url": record.source_ref,
            "sprite": config.sprite_url(&record.id),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!();
        println!("Name:   {} (#{})", display_label(&detail.name), record.id);
        println!("Height: {}", detail.height);
        println!("Weight: {}", detail.weight);
        println!("Type:   {}", detail.types_display());
        println!("Sprite: {}", config.sprite_url(&record.id));
    }

    Ok(())
}
