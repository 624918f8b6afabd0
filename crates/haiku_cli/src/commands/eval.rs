//! Eval command - Print the raw evaluation output.

use anyhow::Result;
use clap::Args;
use haiku_templator::TemplatorConfig;

#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Environment to evaluate, relative to the environments directory
    pub environment: String,
}

pub fn execute(args: EvalArgs, config: &TemplatorConfig) -> Result<()> {
    let templator = super::open(&args.environment, config)?;
    let json = templator.evaluate()?;
    println!("{}", json.trim_end());
    Ok(())
}
