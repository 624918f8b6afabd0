//! # haiku_manifest
//!
//! Turns the JSON produced by evaluating an environment into a flat list of
//! resources.
//!
//! - [`extract`] walks the document and collects every object carrying
//!   `kind` and `apiVersion`
//! - [`Manifest::decode`] coerces each one into a resource or a list wrapper
//! - [`flatten`] expands list wrappers into their items
//!
//! ## Example
//!
//! ```rust
//! use haiku_manifest::{decode_and_flatten, extract};
//! use serde_json::json;
//!
//! let document = json!({
//!     "app": {"kind": "Deployment", "apiVersion": "apps/v1"},
//!     "extra": [{"kind": "List", "apiVersion": "v1", "items": [
//!         {"kind": "Service", "apiVersion": "v1"}
//!     ]}]
//! });
//!
//! let resources = decode_and_flatten(extract(document).unwrap()).unwrap();
//! assert_eq!(resources.len(), 2);
//! ```

pub mod error;
pub mod extract;
pub mod flatten;
pub mod output;
pub mod resource;

pub use error::{ManifestError, ManifestResult};
pub use extract::extract;
pub use flatten::{decode_and_flatten, flatten};
pub use output::{to_json, to_yaml_stream, OutputFormat};
pub use resource::{Manifest, Resource, ResourceList};

