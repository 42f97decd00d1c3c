//! Translation records produced by the extractor.
//!
//! A record is the handoff between extraction and the catalog engines. Records are
//! created fresh on every run and never persisted; only their projection into a
//! catalog (`namespace` → `message_key` = `default_value`) is written to disk.

use crate::utils::leaf_path;

/// One translatable message found in a source file.
///
/// # Examples
///
/// ```ignore
/// const t = useTranslations("payment");
/// t("title", {}, "Payment Title");
/// // → { namespace: "payment", message_key: "title", default_value: "Payment Title" }
///
/// <FormattedMessage namespace="common" messageKey="all" string="All" />
/// // → { namespace: "common", message_key: "all", default_value: "All" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRecord {
    /// Dotted namespace path; empty for the catalog root.
    pub namespace: String,
    pub message_key: String,
    pub default_value: String,
    /// Path of the source file the record was extracted from.
    pub source_file: String,
    /// 1-based line of the call site or marker element.
    pub line: usize,
}

impl TranslationRecord {
    /// Full dotted path from the catalog root to this record's message.
    pub fn leaf_path(&self) -> String {
        leaf_path(&self.namespace, &self.message_key)
    }
}
