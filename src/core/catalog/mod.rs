//! Per-locale message catalogs.
//!
//! A catalog is a JSON object tree: objects are namespaces, strings are
//! messages. Key order is preserved from the file (`serde_json` is built with
//! `preserve_order`), so untouched entries serialize back byte-for-byte.

pub mod clean;
pub mod codec;
pub mod merge;
pub mod store;

pub use clean::clean;
pub use codec::{FlatCatalog, flatten, restore_namespaces};
pub use merge::{MergeStats, merge};
pub use store::CatalogStore;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::PATH_SEPARATOR;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(Map<String, Value>);

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn as_map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse catalog file content. The root must be an object.
    pub fn parse(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).context("invalid JSON")?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => bail!("root of a catalog must be an object"),
        }
    }

    /// Serialize with 2-space indentation and a trailing newline.
    pub fn to_pretty_json(&self) -> Result<String> {
        let content = serde_json::to_string_pretty(&self.0).context("Failed to serialize JSON")?;
        Ok(format!("{}\n", content))
    }

    /// Look up a value by its dotted path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split(PATH_SEPARATOR);
        let first = segments.next()?;
        segments.try_fold(self.0.get(first)?, |node, segment| {
            node.as_object()?.get(segment)
        })
    }
}

impl From<Value> for Catalog {
    /// Non-object values become an empty catalog.
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}
