//! List command - Print one line per resource.

use anyhow::Result;
use clap::Args;
use haiku_manifest::Resource;
use haiku_templator::{Templator, TemplatorConfig};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Environment to render, relative to the environments directory
    pub environment: String,
}

pub fn execute(args: ListArgs, config: &TemplatorConfig) -> Result<()> {
    let templator = super::open(&args.environment, config)?;

    for resource in templator.template()? {
        println!("{}", describe(&resource));
    }

    Ok(())
}

/// `apiVersion kind namespace/name`, dropping the parts a resource lacks.
fn describe(resource: &Resource) -> String {
    let name = resource.name().unwrap_or("-");
    match resource.namespace() {
        Some(namespace) => format!(
            "{} {} {}/{}",
            resource.api_version(),
            resource.kind(),
            namespace,
            name
        ),
        None => format!("{} {} {}", resource.api_version(), resource.kind(), name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resource(value: serde_json::Value) -> Resource {
        match value {
            serde_json::Value::Object(map) => Resource::from_map(map).unwrap(),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_describe_namespaced() {
        let r = resource(json!({
            "apiVersion": "apps/v1",
            "kind": "Deployment",
            "metadata": {"name": "web", "namespace": "prod"}
        }));
        assert_eq!(describe(&r), "apps/v1 Deployment prod/web");
    }

    #[test]
    fn test_describe_cluster_scoped() {
        let r = resource(json!({
            "apiVersion": "v1",
            "kind": "Namespace",
            "metadata": {"name": "prod"}
        }));
        assert_eq!(describe(&r), "v1 Namespace prod");
    }

    #[test]
    fn test_describe_unnamed() {
        let r = resource(json!({"apiVersion": "v1", "kind": "ConfigMap"}));
        assert_eq!(describe(&r), "v1 ConfigMap -");
    }
}
