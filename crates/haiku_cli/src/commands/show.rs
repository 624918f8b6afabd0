//! Show command - Print the resources of an environment.

use anyhow::{Context, Result};
use clap::Args;
use haiku_manifest::OutputFormat;
use haiku_templator::{Templator, TemplatorConfig};
use tracing::info;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Environment to render, relative to the environments directory
    pub environment: String,

    /// Output format (yaml or json)
    #[arg(short, long, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,
}

pub fn execute(args: ShowArgs, config: &TemplatorConfig) -> Result<()> {
    let templator = super::open(&args.environment, config)?;
    let resources = templator.template()?;

    info!("Rendering {} resources as {}", resources.len(), args.output);
    let rendered = args
        .output
        .render(&resources)
        .context("Failed to serialize resources")?;
    print!("{}", rendered);

    Ok(())
}
