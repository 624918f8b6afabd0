//! Serialization of resources for downstream tools.

use std::fmt;
use std::str::FromStr;

use crate::error::{ManifestError, ManifestResult};
use crate::resource::Resource;

/// Supported output encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Multi-document YAML stream.
    #[default]
    Yaml,
    /// A single JSON array.
    Json,
}

impl OutputFormat {
    /// Render `resources` in this format.
    pub fn render(&self, resources: &[Resource]) -> ManifestResult<String> {
        match self {
            OutputFormat::Yaml => to_yaml_stream(resources),
            OutputFormat::Json => to_json(resources),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ManifestError::UnknownFormat(s.to_string())),
        }
    }
}

/// Serialize resources as YAML documents separated by `---`.
pub fn to_yaml_stream(resources: &[Resource]) -> ManifestResult<String> {
    let mut out = String::new();
    for (i, resource) in resources.iter().enumerate() {
        if i > 0 {
            out.push_str("---\n");
        }
        out.push_str(&serde_yaml::to_string(resource)?);
    }
    Ok(out)
}

/// Serialize resources as a pretty-printed JSON array.
pub fn to_json(resources: &[Resource]) -> ManifestResult<String> {
    let mut out = serde_json::to_string_pretty(resources)?;
    out.push('\n');
    Ok(out)
}
