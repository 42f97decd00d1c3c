//! Extraction: parsed source file → translation records.
//!
//! Each file is walked twice. The first pass ([`NamespaceResolver`]) builds the
//! table of translation bindings, the second ([`FileExtractor`]) collects every
//! call site and marker element that resolves through it. Because the table is
//! complete before extraction starts, a call written above its binding still
//! resolves.

pub mod bindings;
pub mod file_extractor;
pub mod literals;
pub mod record;

pub use bindings::{NamespaceBindings, NamespaceResolver};
pub use file_extractor::FileExtractor;
pub use record::TranslationRecord;

use swc_ecma_visit::VisitWith;

use crate::{
    config::CustomJsxPattern, core::error::ScanError, core::parsers::jsx::ParsedJSX,
    utils::PATH_SEPARATOR,
};

/// Extract all translation records from one parsed file, in source order.
pub fn extract_file(
    parsed: &ParsedJSX,
    file_path: &str,
    patterns: &[CustomJsxPattern],
) -> Vec<TranslationRecord> {
    let bindings = NamespaceResolver::resolve(&parsed.module);
    if bindings.is_empty() && patterns.is_empty() {
        return Vec::new();
    }

    let mut extractor =
        FileExtractor::new(file_path, parsed.source_map.clone(), &bindings, patterns);
    parsed.module.visit_with(&mut extractor);
    extractor.into_records()
}

/// Fail on the first record whose message key contains the path separator.
pub fn ensure_no_separator(records: &[TranslationRecord]) -> Result<(), ScanError> {
    match records
        .iter()
        .find(|r| r.message_key.contains(PATH_SEPARATOR))
    {
        Some(record) => Err(ScanError::KeyContainsSeparator {
            key: record.message_key.clone(),
            file: record.source_file.clone(),
            line: record.line,
        }),
        None => Ok(()),
    }
}
