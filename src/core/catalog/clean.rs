use std::collections::HashSet;

use serde_json::{Map, Value};

use super::Catalog;
use crate::utils::PATH_SEPARATOR;

/// Remove every leaf whose path is not in `extracted`.
///
/// Namespaces are never removed, even when they end up empty. Returns the
/// removed leaf paths in catalog order.
pub fn clean(catalog: &mut Catalog, extracted: &HashSet<String>) -> Vec<String> {
    let mut removed = Vec::new();
    clean_map(catalog.as_map_mut(), "", extracted, &mut removed);
    removed
}

fn clean_map(
    map: &mut Map<String, Value>,
    prefix: &str,
    extracted: &HashSet<String>,
    removed: &mut Vec<String>,
) {
    let mut stale = Vec::new();
    for (key, value) in map.iter_mut() {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}{}{}", prefix, PATH_SEPARATOR, key)
        };
        match value {
            Value::Object(child) => clean_map(child, &path, extracted, removed),
            _ if !extracted.contains(&path) => {
                stale.push(key.clone());
                removed.push(path);
            }
            _ => {}
        }
    }

    for key in stale {
        map.shift_remove(&key);
    }
}
