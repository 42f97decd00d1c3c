//! Duplicate and conflict detection across extracted records.
//!
//! The detector only observes. It never changes what is merged and never fails
//! a run; it tells the pipeline whether a record is the first occurrence of its
//! path so that later occurrences can be dropped before merging.

use std::collections::HashMap;

use super::extract::TranslationRecord;
use crate::issues::ConflictIssue;

/// Outcome of observing one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Path seen for the first time. This record's value is kept.
    First,
    /// Path seen before with the same default value.
    Duplicate,
    /// Path seen before with a different default value.
    Conflict,
}

#[derive(Debug)]
struct Entry {
    value: String,
    files: Vec<String>,
    other_values: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ConflictDetector {
    entries: HashMap<String, Entry>,
    /// Paths in first-seen order.
    order: Vec<String>,
}

impl ConflictDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, record: &TranslationRecord) -> Observation {
        let path = record.leaf_path();
        let Some(entry) = self.entries.get_mut(&path) else {
            self.entries.insert(
                path.clone(),
                Entry {
                    value: record.default_value.clone(),
                    files: vec![record.source_file.clone()],
                    other_values: Vec::new(),
                },
            );
            self.order.push(path);
            return Observation::First;
        };

        if !entry.files.contains(&record.source_file) {
            entry.files.push(record.source_file.clone());
        }
        if entry.value == record.default_value {
            return Observation::Duplicate;
        }
        if !entry.other_values.contains(&record.default_value) {
            entry.other_values.push(record.default_value.clone());
        }
        Observation::Conflict
    }

    /// One issue per path that was seen with more than one value.
    pub fn finish(self) -> Vec<ConflictIssue> {
        let mut entries = self.entries;
        self.order
            .into_iter()
            .filter_map(|path| {
                let entry = entries.remove(&path)?;
                if entry.other_values.is_empty() {
                    return None;
                }
                Some(ConflictIssue {
                    path,
                    original_value: entry.value,
                    files: entry.files,
                    other_values: entry.other_values,
                })
            })
            .collect()
    }
}
