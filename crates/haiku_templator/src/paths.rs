//! Entry file and import path resolution for environments.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::TemplatorConfig;
use crate::error::{TemplatorError, TemplatorResult};

/// Where an environment's evaluation starts and where its imports are searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Import search directories, highest priority first.
    pub import_paths: Vec<PathBuf>,
    /// The script to evaluate.
    pub entry_file: PathBuf,
}

/// Resolves environment names against a project layout.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentResolver {
    config: TemplatorConfig,
}

impl EnvironmentResolver {
    pub fn new(config: TemplatorConfig) -> Self {
        Self { config }
    }

    /// Resolve the import paths and entry file for `environment`.
    ///
    /// The import paths are, in order, the library directory, the vendor
    /// directory and `<environment>/<metadata_dir>`, all under the project
    /// root. Note the metadata directory sits directly under the root, not
    /// under the environments directory. The entry file is the first of the
    /// configured candidates that exists in `<environments_dir>/<environment>`.
    pub fn resolve(&self, environment: &str) -> TemplatorResult<ResolvedPaths> {
        let root = self.config.root_dir()?;

        let import_paths = vec![
            root.join(&self.config.lib_dir),
            root.join(&self.config.vendor_dir),
            root.join(environment).join(&self.config.metadata_dir),
        ];

        let env_dir = self.environment_dir(&root, environment);
        let candidates: Vec<PathBuf> = self
            .config
            .entry_files
            .iter()
            .map(|name| env_dir.join(name))
            .collect();

        let mut entry_file = None;
        for candidate in &candidates {
            if is_present(candidate)? {
                entry_file = Some(candidate.clone());
                break;
            }
        }
        let entry_file = entry_file.ok_or_else(|| TemplatorError::EntryNotFound {
            environment: environment.to_string(),
            candidates: candidates.clone(),
        })?;

        debug!(
            "Resolved environment '{}' to {:?} with import paths {:?}",
            environment, entry_file, import_paths
        );

        Ok(ResolvedPaths {
            import_paths,
            entry_file,
        })
    }

    fn environment_dir(&self, root: &Path, environment: &str) -> PathBuf {
        root.join(&self.config.environments_dir).join(environment)
    }
}

/// Only a missing path counts as absent; any other stat failure is an error.
fn is_present(path: &Path) -> TemplatorResult<bool> {
    match fs::metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Resolve `environment` against the default layout in the current directory.
pub fn resolve(environment: &str) -> TemplatorResult<ResolvedPaths> {
    EnvironmentResolver::default().resolve(environment)
}
