//! Error types for resource extraction.

use thiserror::Error;

/// Result type alias for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Errors that can occur while turning evaluated output into resources.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// A scalar sat where an object or array was expected.
    #[error("Unexpected object structure: {found}")]
    UnexpectedStructure { found: &'static str },

    /// An extracted object could not be coerced into a resource.
    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    #[error("Unknown output format '{0}', expected yaml or json")]
    UnknownFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
