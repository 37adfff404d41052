use thiserror::Error;

/// Failure of a remote catalog lookup.
///
/// Every variant is a network failure from the caller's point of view:
/// callers log it and keep their previous state.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    /// URL of the request that failed, when there was one
    pub fn url(&self) -> Option<&str> {
        match self {
            CatalogError::ClientBuild(_) => None,
            CatalogError::Transport { url, .. }
            | CatalogError::Status { url, .. }
            | CatalogError::Decode { url, .. } => Some(url),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
