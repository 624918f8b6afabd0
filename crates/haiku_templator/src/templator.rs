//! Environment templating.

use std::path::{Path, PathBuf};

use haiku_manifest::{decode_and_flatten, extract, Resource};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::TemplatorConfig;
use crate::error::TemplatorResult;
use crate::paths::EnvironmentResolver;
use crate::vm::JsonnetVm;

/// Produces the resources of an environment.
pub trait Templator {
    fn template(&self) -> TemplatorResult<Vec<Resource>>;
}

/// A [`Templator`] backed by Jsonnet.
pub struct JsonnetTemplator {
    environment: String,
    entry_file: PathBuf,
    vm: JsonnetVm,
}

impl JsonnetTemplator {
    /// Resolve `environment` in the current directory with the default layout.
    pub fn new(environment: &str) -> TemplatorResult<Self> {
        Self::with_config(environment, &TemplatorConfig::default())
    }

    /// Resolve `environment` using an explicit project layout.
    pub fn with_config(environment: &str, config: &TemplatorConfig) -> TemplatorResult<Self> {
        let paths = EnvironmentResolver::new(config.clone()).resolve(environment)?;
        info!(
            "Templating environment '{}' from {:?}",
            environment, paths.entry_file
        );

        Ok(Self {
            environment: environment.to_string(),
            entry_file: paths.entry_file,
            vm: JsonnetVm::new(paths.import_paths),
        })
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn entry_file(&self) -> &Path {
        &self.entry_file
    }

    pub fn import_paths(&self) -> &[PathBuf] {
        self.vm.import_paths()
    }

    /// Evaluate the entry file and return the raw JSON output.
    pub fn evaluate(&self) -> TemplatorResult<String> {
        self.vm.evaluate_file(&self.entry_file)
    }
}

impl Templator for JsonnetTemplator {
    fn template(&self) -> TemplatorResult<Vec<Resource>> {
        let json = self.evaluate()?;
        let document: Value = serde_json::from_str(&json)?;

        let objects = extract(document)?;
        debug!("Extracted {} objects", objects.len());

        let resources = decode_and_flatten(objects)?;
        info!(
            "Environment '{}' produced {} resources",
            self.environment,
            resources.len()
        );
        Ok(resources)
    }
}
