//! Harness error types.

use std::path::PathBuf;

use anchorflex::Item;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("no frame for {0}; run a layout pass first")]
    UnknownItem(Item),

    #[error("failed to read config {path}: {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid host config: {0}")]
    Config(#[from] serde_json::Error),
}
