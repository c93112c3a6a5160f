//! CLI error types.

use rw_config::ConfigError;
use rw_nav::NavError;
use rw_sidebar::SchedulerError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Routes(#[from] NavError),

    #[error("{0}")]
    Scheduler(#[from] SchedulerError),

    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}
