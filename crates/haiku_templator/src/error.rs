//! Error types for templating.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for templator operations.
pub type TemplatorResult<T> = Result<T, TemplatorError>;

/// Errors that can occur while resolving and evaluating an environment.
#[derive(Error, Debug)]
pub enum TemplatorError {
    #[error("Couldn't find entry file for environment '{environment}', tried: {}", display_paths(.candidates))]
    EntryNotFound {
        environment: String,
        candidates: Vec<PathBuf>,
    },

    #[error("Jsonnet evaluation failed: {0}")]
    Evaluation(String),

    #[error("Failed to decode evaluation output: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Manifest(#[from] haiku_manifest::ManifestError),
}

/// Errors raised by the native helpers exposed to Jsonnet.
#[derive(Error, Debug)]
pub enum NativeError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// Result type alias for native helpers.
pub type NativeResult<T> = Result<T, NativeError>;

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
