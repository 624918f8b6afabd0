//! CLI command definitions.
//!
//! Every subcommand takes an environment name, resolves it against the
//! project layout and evaluates it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use haiku_templator::{JsonnetTemplator, TemplatorConfig};

pub mod eval;
pub mod list;
pub mod show;

/// haiku - Jsonnet environment templating
#[derive(Parser, Debug)]
#[command(name = "haiku")]
#[command(version, about = "haiku - render Jsonnet environments into resources")]
#[command(long_about = r#"
haiku evaluates the Jsonnet entry file of an environment and prints every
resource (an object with `kind` and `apiVersion`) it produces, with list
objects expanded into their items.

PROJECT LAYOUT:
  lib/                                  import root
  vendor/                               import root
  <env>/.metadata/                      import root
  environments/<env>/main.libsonnet     entry file (or main.jsonnet)

EXIT CODES:
  0 - Success
  1 - General error
  2 - Entry file not found
  3 - Evaluation error
  4 - Resource structure error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Project root directory
    #[arg(long, global = true, env = "HAIKU_ROOT")]
    pub root: Option<PathBuf>,

    /// YAML file overriding the project layout
    #[arg(long, global = true, env = "HAIKU_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the resources of an environment
    Show(show::ShowArgs),

    /// List the resources of an environment, one per line
    List(list::ListArgs),

    /// Print the raw JSON produced by evaluating an environment
    Eval(eval::EvalArgs),
}

impl Cli {
    /// Build the project layout from `--config` and `--root`.
    ///
    /// `--root` wins over a `root` key in the config file.
    pub fn templator_config(&self) -> Result<TemplatorConfig> {
        let mut config = match &self.config {
            Some(path) => TemplatorConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => TemplatorConfig::default(),
        };
        if let Some(root) = &self.root {
            config = config.with_root(root);
        }
        Ok(config)
    }
}

/// Open a templator for `environment`.
pub(crate) fn open(environment: &str, config: &TemplatorConfig) -> Result<JsonnetTemplator> {
    JsonnetTemplator::with_config(environment, config)
        .with_context(|| format!("Failed to load environment '{}'", environment))
}
