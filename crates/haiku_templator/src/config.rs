//! Project layout configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TemplatorError, TemplatorResult};

/// Default entry file candidates, in order of preference.
pub const DEFAULT_ENTRY_FILES: [&str; 2] = ["main.libsonnet", "main.jsonnet"];

/// Where a project keeps its library code, vendored dependencies and environments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatorConfig {
    /// Project root; the current directory when unset
    pub root: Option<PathBuf>,
    /// Local library directory, first import root
    pub lib_dir: String,
    /// Vendored dependencies, second import root
    pub vendor_dir: String,
    /// Directory holding one subdirectory per environment
    pub environments_dir: String,
    /// Per-environment metadata directory, third import root
    pub metadata_dir: String,
    /// Entry file names tried inside the environment directory
    pub entry_files: Vec<String>,
}

impl Default for TemplatorConfig {
    fn default() -> Self {
        Self {
            root: None,
            lib_dir: "lib".to_string(),
            vendor_dir: "vendor".to_string(),
            environments_dir: "environments".to_string(),
            metadata_dir: ".metadata".to_string(),
            entry_files: DEFAULT_ENTRY_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TemplatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config file. Missing keys keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> TemplatorResult<Self> {
        let path = path.as_ref();
        debug!("Loading config from {:?}", path);

        let content = fs::read_to_string(path)?;
        let config: TemplatorConfig = serde_yaml::from_str(&content)
            .map_err(|e| TemplatorError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_lib_dir(mut self, dir: impl Into<String>) -> Self {
        self.lib_dir = dir.into();
        self
    }

    pub fn with_vendor_dir(mut self, dir: impl Into<String>) -> Self {
        self.vendor_dir = dir.into();
        self
    }

    pub fn with_environments_dir(mut self, dir: impl Into<String>) -> Self {
        self.environments_dir = dir.into();
        self
    }

    /// Resolve the project root, falling back to the current directory.
    pub fn root_dir(&self) -> TemplatorResult<PathBuf> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    fn validate(&self) -> TemplatorResult<()> {
        if self.entry_files.is_empty() {
            return Err(TemplatorError::Config(
                "entry_files must name at least one file".to_string(),
            ));
        }
        Ok(())
    }
}
