//! Recursive discovery of resource objects in an evaluated document.

use serde_json::{Map, Value};
use tracing::trace;

use crate::error::{ManifestError, ManifestResult};
use crate::resource::{looks_like_resource, type_name};

/// Collect every object in `value` that looks like a resource.
///
/// The walk is depth-first. A matching object is returned whole and its
/// children are not visited. Objects that do not match are searched through
/// their values in map order, arrays in element order. A scalar anywhere on
/// the walk is an error, so `{"a": 1}` fails just like a top-level `1`.
pub fn extract(value: Value) -> ManifestResult<Vec<Map<String, Value>>> {
    let mut found = Vec::new();
    walk(value, &mut found)?;
    Ok(found)
}

fn walk(value: Value, found: &mut Vec<Map<String, Value>>) -> ManifestResult<()> {
    match value {
        Value::Object(object) if looks_like_resource(&object) => {
            trace!(
                kind = %object["kind"],
                api_version = %object["apiVersion"],
                "found resource"
            );
            found.push(object);
        }
        Value::Object(object) => {
            for (_, child) in object {
                walk(child, found)?;
            }
        }
        Value::Array(items) => {
            for item in items {
                walk(item, found)?;
            }
        }
        other => {
            return Err(ManifestError::UnexpectedStructure {
                found: type_name(&other),
            });
        }
    }
    Ok(())
}
