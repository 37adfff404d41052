//! Pokedex - browse the PokéAPI catalog from the terminal
//!
//! Without a subcommand the interactive browser starts. `list`, `types` and
//! `show` print the same data for scripts.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use pokedex_core::{CatalogConfig, PokeApiClient};

mod catalog_cli;
#[cfg(feature = "tui")]
mod tui;

/// Log levels
#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Log output formats
#[derive(Debug, Clone, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[clap(
    name = "pokedex",
    about = "Browse the PokéAPI catalog: filter by type, search by name, inspect details",
    version
)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,

    /// Set log level
    #[clap(long, default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Log output format
    #[clap(long, default_value = "text", global = true)]
    log_format: LogFormat,

    /// Configuration file (defaults to the platform config directory)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Override the catalog service root URL
    #[clap(long, global = true)]
    base_url: Option<String>,

    /// Override the bulk listing page size
    #[clap(long, global = true)]
    limit: Option<u32>,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Interactive browser (default)
    Browse,

    /// Print records, optionally filtered by type or name
    List {
        /// Only records of this type (fetched from the catalog)
        #[clap(long = "type", value_name = "TYPE", conflicts_with = "search")]
        category: Option<String>,

        /// Only records whose name contains this text (case-insensitive)
        #[clap(long)]
        search: Option<String>,

        /// Output results as JSON
        #[clap(long)]
        json: bool,
    },

    /// List record types and their display colors
    Types {
        /// Output results as JSON
        #[clap(long)]
        json: bool,
    },

    /// Show detailed information about a record
    Show {
        /// Record name
        name: String,

        /// Output as JSON
        #[clap(long)]
        json: bool,
    },
}

/// Initialize tracing with CLI flags
///
/// Logs go to stderr, except while the interactive browser owns the
/// terminal; then they are appended to `pokedex.log` in the cache directory.
fn initialize_tracing(
    log_level: &LogLevel,
    log_format: &LogFormat,
    interactive: bool,
) -> Result<()> {
    let filter = EnvFilter::try_from_env("POKEDEX_LOG")
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    if interactive {
        let log_path = log_file_path()?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;
        let writer = std::sync::Mutex::new(file);

        match log_format {
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(writer)
                .init(),
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(writer)
                .init(),
        }
    } else {
        match log_format {
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init(),
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init(),
        }
    }

    Ok(())
}

fn log_file_path() -> Result<PathBuf> {
    let cache_dir = directories::ProjectDirs::from("", "", "pokedex")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .context("Could not determine cache directory")?;

    std::fs::create_dir_all(&cache_dir)
        .with_context(|| format!("Failed to create cache directory: {}", cache_dir.display()))?;

    Ok(cache_dir.join("pokedex.log"))
}

/// Load the config file and apply command-line overrides
fn resolve_config(cli: &Cli) -> Result<CatalogConfig> {
    let mut config =
        CatalogConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(limit) = cli.limit {
        config.list_limit = limit;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Command::Browse);

    initialize_tracing(
        &cli.log_level,
        &cli.log_format,
        matches!(command, Command::Browse),
    )?;

    let config = resolve_config(&cli)?;
    let client = PokeApiClient::new(config.clone()).context("Failed to create catalog client")?;

    match command {
        Command::Browse => browse_command(client, config).await,
        Command::List {
            category,
            search,
            json,
        } => catalog_cli::execute_list(&client, &config, category, search, json).await,
        Command::Types { json } => catalog_cli::execute_types(&client, json).await,
        Command::Show { name, json } => {
            catalog_cli::execute_show(&client, &config, &name, json).await
        }
    }
}

#[cfg(feature = "tui")]
async fn browse_command(client: PokeApiClient, config: CatalogConfig) -> Result<()> {
    tui::run(std::sync::Arc::new(client), config).await
}

/// Stub for when the tui feature is disabled
#[cfg(not(feature = "tui"))]
async fn browse_command(_client: PokeApiClient, _config: CatalogConfig) -> Result<()> {
    anyhow::bail!("Interactive browser is not enabled. Rebuild with --features tui")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_subcommand_means_browse() {
        let cli = Cli::try_parse_from(["pokedex"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_list_type_and_search_conflict() {
        let result =
            Cli::try_parse_from(["pokedex", "list", "--type", "fire", "--search", "char"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_list_by_type() {
        let cli = Cli::try_parse_from(["pokedex", "list", "--type", "fire", "--json"]).unwrap();
        match cli.command {
            Some(Command::List {
                category,
                search,
                json,
            }) => {
                assert_eq!(category.as_deref(), Some("fire"));
                assert!(search.is_none());
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "list_limit: 10\n").unwrap();

        let cli = Cli::try_parse_from([
            "pokedex",
            "types",
            "--config",
            path.to_str().unwrap(),
            "--limit",
            "0",
        ])
        .unwrap();

        let err = resolve_config(&cli).unwrap_err();
        assert!(format!("{err:#}").contains("list_limit"));
    }

    #[test]
    fn test_config_file_and_override_merge() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "list_limit: 10\ntimeout_seconds: 3\n").unwrap();

        let cli = Cli::try_parse_from([
            "pokedex",
            "--config",
            path.to_str().unwrap(),
            "--base-url",
            "http://127.0.0.1:9/api",
        ])
        .unwrap();

        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.list_limit, 10);
        assert_eq!(config.timeout_seconds, 3);
        assert_eq!(config.base_url, "http://127.0.0.1:9/api");
    }
}
