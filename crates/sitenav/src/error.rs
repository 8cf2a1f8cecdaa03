//! CLI error types.

use sitenav_config::ConfigError;
use sitenav_core::NavigationError;
use sitenav_graph::GraphError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Graph(#[from] GraphError),

    #[error("{0}")]
    Navigation(#[from] NavigationError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
