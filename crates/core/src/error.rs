//! Error types for the fallible edges of the crate: loading configuration,
//! reading files and parsing HTML. Binding itself never fails.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading or validating a site configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON could not be parsed or did not match the configuration schema.
    #[error("invalid site configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level error for loading a page.
#[derive(Debug, Error)]
pub enum SiteError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The HTML input could not be fed to the parser.
    #[error("failed to parse HTML: {0}")]
    Html(#[source] std::io::Error),
}

impl SiteError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
