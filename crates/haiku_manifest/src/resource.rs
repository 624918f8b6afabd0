//! Resource model.
//!
//! A [`Resource`] is an untyped object that is known to carry a `kind` and an
//! `apiVersion`. Objects found by the extractor are coerced into a
//! [`Manifest`], which is either a single resource or a list wrapper whose
//! items are resources themselves.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ManifestError, ManifestResult};

/// Field holding the resource kind.
pub const KIND: &str = "kind";

/// Field holding the resource API version.
pub const API_VERSION: &str = "apiVersion";

/// Field holding the members of a list wrapper.
pub const ITEMS: &str = "items";

/// Returns true when `object` has non-null `kind` and `apiVersion` fields.
///
/// This is the test the extractor applies; it says nothing about the field
/// types, which are checked when the object is coerced.
pub fn looks_like_resource(object: &Map<String, Value>) -> bool {
    let present = |key: &str| object.get(key).is_some_and(|v| !v.is_null());
    present(KIND) && present(API_VERSION)
}

/// A single deployable resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct Resource {
    object: Map<String, Value>,
}

impl Resource {
    /// Wrap an object, checking that `kind` and `apiVersion` are non-empty strings.
    pub fn from_map(object: Map<String, Value>) -> ManifestResult<Self> {
        for field in [KIND, API_VERSION] {
            match object.get(field) {
                Some(Value::String(s)) if !s.is_empty() => {}
                Some(Value::String(_)) | Some(Value::Null) | None => {
                    return Err(ManifestError::InvalidResource(format!(
                        "Object '{}' is missing",
                        field
                    )));
                }
                Some(other) => {
                    return Err(ManifestError::InvalidResource(format!(
                        "'{}' must be a string, found {}",
                        field,
                        type_name(other)
                    )));
                }
            }
        }
        Ok(Self { object })
    }

    pub fn kind(&self) -> &str {
        self.str_field(KIND).unwrap_or_default()
    }

    pub fn api_version(&self) -> &str {
        self.str_field(API_VERSION).unwrap_or_default()
    }

    /// `metadata.name`, if set.
    pub fn name(&self) -> Option<&str> {
        self.metadata_field("name")
    }

    /// `metadata.namespace`, if set.
    pub fn namespace(&self) -> Option<&str> {
        self.metadata_field("namespace")
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.object
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.object
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.object)
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.object.get(key).and_then(Value::as_str)
    }

    fn metadata_field(&self, key: &str) -> Option<&str> {
        self.object
            .get("metadata")
            .and_then(|m| m.get(key))
            .and_then(Value::as_str)
    }
}

impl TryFrom<Map<String, Value>> for Resource {
    type Error = ManifestError;

    fn try_from(object: Map<String, Value>) -> ManifestResult<Self> {
        Self::from_map(object)
    }
}

impl From<Resource> for Map<String, Value> {
    fn from(resource: Resource) -> Self {
        resource.object
    }
}

/// A resource whose only purpose is to hold other resources under `items`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceList {
    kind: String,
    api_version: String,
    items: Vec<Resource>,
}

impl ResourceList {
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn items(&self) -> &[Resource] {
        &self.items
    }

    pub fn into_items(self) -> Vec<Resource> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// An extracted object after coercion.
#[derive(Debug, Clone, PartialEq)]
pub enum Manifest {
    Object(Resource),
    List(ResourceList),
}

impl Manifest {
    /// Coerce an extracted object.
    ///
    /// Objects with an `items` field are list wrappers; a null `items` decodes
    /// as an empty list. Items that carry neither `kind` nor `apiVersion`
    /// inherit them from the wrapper, with the `List` suffix dropped from the
    /// kind. Wrappers found among the
    /// items are expanded, so a decoded list never holds another list.
    pub fn decode(object: Map<String, Value>) -> ManifestResult<Self> {
        if !object.contains_key(ITEMS) {
            return Resource::from_map(object).map(Manifest::Object);
        }

        let mut object = object;
        let items = match object.remove(ITEMS) {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                return Err(ManifestError::InvalidResource(format!(
                    "'{}' must be an array, found {}",
                    ITEMS,
                    type_name(&other)
                )));
            }
        };

        // The wrapper itself must still be a well-formed resource
        let wrapper = Resource::from_map(object)?;
        let kind = wrapper.kind().to_string();
        let api_version = wrapper.api_version().to_string();
        let item_kind = kind.strip_suffix("List").unwrap_or(&kind).to_string();

        let mut resources = Vec::with_capacity(items.len());
        for item in items {
            let mut item = match item {
                Value::Object(map) => map,
                other => {
                    return Err(ManifestError::InvalidResource(format!(
                        "list item must be an object, found {}",
                        type_name(&other)
                    )));
                }
            };
            if is_unset(&item, KIND) && is_unset(&item, API_VERSION) {
                item.insert(KIND.to_string(), Value::String(item_kind.clone()));
                item.insert(API_VERSION.to_string(), Value::String(api_version.clone()));
            }
            // Nested wrappers are expanded in place
            match Manifest::decode(item)? {
                Manifest::Object(resource) => resources.push(resource),
                Manifest::List(nested) => resources.extend(nested.into_items()),
            }
        }

        Ok(Manifest::List(ResourceList {
            kind,
            api_version,
            items: resources,
        }))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Manifest::List(_))
    }
}

fn is_unset(object: &Map<String, Value>, key: &str) -> bool {
    match object.get(key) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// Name of a JSON value's type, as reported in errors.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
