use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or validating a [`GardenConfig`](crate::config::GardenConfig).
///
/// Runtime degradations (missing spawn region, unresolvable fairy owner) are
/// logged by the simulation instead of surfacing here.
#[derive(Debug, Error)]
pub enum GardenError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}
