//! Expansion of list wrappers into their member resources.

use serde_json::{Map, Value};

use crate::error::ManifestResult;
use crate::resource::{Manifest, Resource, ITEMS};

/// Expand list wrappers into their items, keeping every other resource as is.
///
/// Items of a wrapper are emitted in the order they appear in `items`.
pub fn flatten(manifests: Vec<Manifest>) -> Vec<Resource> {
    let mut out = Vec::with_capacity(manifests.len());
    for manifest in manifests {
        match manifest {
            Manifest::List(list) => out.extend(list.into_items()),
            Manifest::Object(resource) => out.push(resource),
        }
    }

    // Coercion is the only producer of resources; a breach here is a bug.
    debug_assert!(
        out.iter().all(|r| !r.kind().is_empty()
            && !r.api_version().is_empty()
            && !r.as_map().contains_key(ITEMS)),
        "internal consistency violation: flattened output holds a non-resource"
    );
    out
}

/// Coerce extracted objects and flatten them in one step.
pub fn decode_and_flatten(objects: Vec<Map<String, Value>>) -> ManifestResult<Vec<Resource>> {
    let manifests = objects
        .into_iter()
        .map(Manifest::decode)
        .collect::<ManifestResult<Vec<_>>>()?;
    Ok(flatten(manifests))
}
