//! Flatten/restore codec used around machine translation.
//!
//! Flattening turns a nested catalog into one entry per dotted path. Dots inside
//! message text would be ambiguous with path separators, so every `.` in a
//! string value is replaced by [`SENTINEL`] while flat, and restored afterwards.
//! A literal `:` is written as [`COLON_ESCAPE`] first, which keeps text such as
//! `"Attention :..."` or `"a::b"` exact through the round trip.

use serde_json::{Map, Value};

use super::Catalog;
use crate::utils::PATH_SEPARATOR;

/// Stand-in for `.` inside flattened string values.
pub const SENTINEL: &str = "::";

/// Stand-in for a literal `:` inside flattened string values.
pub const COLON_ESCAPE: &str = ":;";

/// Dotted path → leaf value, in catalog order.
///
/// Empty namespaces appear as empty objects; every other value is a leaf.
pub type FlatCatalog = Map<String, Value>;

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ':' => escaped.push_str(COLON_ESCAPE),
            PATH_SEPARATOR => escaped.push_str(SENTINEL),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Reverse [`escape`]. Every escaped `:` starts a two-character pair; a lone
/// `:` that starts no pair is kept as it is.
pub fn unescape(text: &str) -> String {
    let mut unescaped = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != ':' {
            unescaped.push(c);
            continue;
        }
        match chars.peek() {
            Some(':') => {
                chars.next();
                unescaped.push(PATH_SEPARATOR);
            }
            Some(';') => {
                chars.next();
                unescaped.push(':');
            }
            _ => unescaped.push(':'),
        }
    }
    unescaped
}

pub fn flatten(catalog: &Catalog) -> FlatCatalog {
    let mut flat = Map::new();
    flatten_into(catalog.as_map(), "", &mut flat);
    flat
}

fn flatten_into(map: &Map<String, Value>, prefix: &str, flat: &mut FlatCatalog) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}{}{}", prefix, PATH_SEPARATOR, key)
        };
        match value {
            Value::Object(child) if !child.is_empty() => flatten_into(child, &path, flat),
            Value::String(text) => {
                flat.insert(path, Value::String(escape(text)));
            }
            other => {
                flat.insert(path, other.clone());
            }
        }
    }
}

pub fn restore_namespaces(flat: &FlatCatalog) -> Catalog {
    let mut root = Map::new();
    for (path, value) in flat {
        let (namespace, key) = match path.rsplit_once(PATH_SEPARATOR) {
            Some((namespace, key)) => (Some(namespace), key),
            None => (None, path.as_str()),
        };

        // A leaf already sits where a namespace is expected; keep the leaf.
        let Some(node) = namespace_node(&mut root, namespace) else {
            continue;
        };

        let restored = match value {
            Value::String(text) => Value::String(unescape(text)),
            other => other.clone(),
        };
        match restored {
            Value::Object(_) => {
                node.entry(key.to_string()).or_insert(restored);
            }
            leaf => {
                node.insert(key.to_string(), leaf);
            }
        }
    }
    Catalog::from_map(root)
}

/// Walk to the object for `namespace`, creating missing levels.
fn namespace_node<'m>(
    root: &'m mut Map<String, Value>,
    namespace: Option<&str>,
) -> Option<&'m mut Map<String, Value>> {
    let mut node = root;
    for segment in namespace.into_iter().flat_map(|ns| ns.split(PATH_SEPARATOR)) {
        node = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()?;
    }
    Some(node)
}
