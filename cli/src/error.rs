use std::path::PathBuf;

use flight_route_core::{GraphError, PathError};
use thiserror::Error;

/// Application-level errors for the route planner.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("unknown city: {0}")]
    UnknownCity(String),
    #[error("graph construction failed: {0}")]
    Graph(#[from] GraphError),
    #[error("route search failed: {0}")]
    Path(#[from] PathError),
    #[error("JSON output failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
