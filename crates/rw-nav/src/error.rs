//! Route tree loading errors.

use std::path::PathBuf;

/// Error returned when a route tree cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// I/O error reading the route file.
    #[error("Failed to read route file {}: {source}", path.display())]
    Io {
        /// Route file path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// YAML parsing error.
    #[error("Invalid YAML route tree: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// JSON parsing error.
    #[error("Invalid JSON route tree: {0}")]
    Json(#[from] serde_json::Error),
    /// File extension is neither YAML nor JSON.
    #[error("Unsupported route file format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}
