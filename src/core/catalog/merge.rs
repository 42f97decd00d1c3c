use std::collections::HashSet;

use serde_json::{Map, Value};

use super::Catalog;
use crate::{
    core::{error::ScanError, extract::TranslationRecord},
    utils::PATH_SEPARATOR,
};

/// Counts of what one merge did to a catalog.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl MergeStats {
    pub fn absorb(&mut self, other: MergeStats) {
        self.added += other.added;
        self.updated += other.updated;
        self.unchanged += other.unchanged;
    }

    pub fn changed(&self) -> bool {
        self.added > 0 || self.updated > 0
    }
}

/// Merge extracted records into a catalog.
///
/// New messages are appended to their namespace, which is created on demand.
/// Existing messages are replaced only when `overwrite` is set. When several
/// records share a leaf path, the first one wins and the rest are ignored.
///
/// Fails without writing the offending record when a namespace segment holds a
/// message, or when a message would replace a namespace.
pub fn merge(
    catalog: &mut Catalog,
    records: &[TranslationRecord],
    overwrite: bool,
) -> Result<MergeStats, ScanError> {
    let mut stats = MergeStats::default();
    let mut seen: HashSet<String> = HashSet::new();

    for record in records {
        let path = record.leaf_path();
        if !seen.insert(path.clone()) {
            continue;
        }

        let node = namespace_node(catalog.as_map_mut(), &record.namespace)?;
        match node.get_mut(&record.message_key) {
            None => {
                node.insert(
                    record.message_key.clone(),
                    Value::String(record.default_value.clone()),
                );
                stats.added += 1;
            }
            Some(Value::Object(_)) => return Err(ScanError::message_is_namespace(&path)),
            Some(existing) => {
                if overwrite && existing.as_str() != Some(record.default_value.as_str()) {
                    *existing = Value::String(record.default_value.clone());
                    stats.updated += 1;
                } else {
                    stats.unchanged += 1;
                }
            }
        }
    }

    Ok(stats)
}

/// Walk to the object for a dotted namespace, creating missing levels.
fn namespace_node<'m>(
    root: &'m mut Map<String, Value>,
    namespace: &str,
) -> Result<&'m mut Map<String, Value>, ScanError> {
    if namespace.is_empty() {
        return Ok(root);
    }

    let mut node = root;
    let mut walked = String::new();
    for segment in namespace.split(PATH_SEPARATOR) {
        if !walked.is_empty() {
            walked.push(PATH_SEPARATOR);
        }
        walked.push_str(segment);

        node = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| ScanError::namespace_is_message(&walked))?;
    }
    Ok(node)
}
