//! Machine translation of missing or untranslated catalog entries.

pub mod google;

pub use google::GoogleTranslator;

use std::future::Future;

use anyhow::Result;
use serde_json::{Map, Value};

use super::{
    catalog::{
        Catalog,
        codec::{FlatCatalog, escape, flatten, restore_namespaces, unescape},
    },
    reporter::Reporter,
};
use crate::issues::{Issue, TranslationFailedIssue};

/// A machine translation backend.
pub trait Translator {
    /// Translate `texts` from `source` to `target`.
    ///
    /// On success the result has the same length and order as `texts`.
    fn translate_batch(
        &self,
        texts: &[String],
        source: &str,
        target: &str,
    ) -> impl Future<Output = Result<Vec<String>>>;
}

/// Result of translating one target catalog.
#[derive(Debug)]
pub struct TranslateOutcome {
    pub catalog: Catalog,
    /// Number of entries that received a translation.
    pub translated: usize,
    /// Number of entries that needed one.
    pub pending: usize,
    pub issues: Vec<Issue>,
}

pub struct AutoTranslator<T> {
    translator: T,
    batch_size: usize,
}

impl<T: Translator> AutoTranslator<T> {
    pub fn new(translator: T, batch_size: usize) -> Self {
        Self {
            translator,
            batch_size: batch_size.max(1),
        }
    }

    /// Fill `target` with translations of every default-locale message that is
    /// missing from it or still identical to the default text.
    ///
    /// Entries that already differ from the default are never sent and come back
    /// unchanged. A failed batch leaves its entries as they were and is reported
    /// as an issue.
    pub async fn translate_catalog(
        &self,
        default: &Catalog,
        target: &Catalog,
        source_locale: &str,
        target_locale: &str,
        reporter: &dyn Reporter,
    ) -> TranslateOutcome {
        let source = flatten(default);
        let flat = flatten(target);

        let pending: Vec<(String, String)> = source
            .iter()
            .filter_map(|(path, value)| {
                let Value::String(text) = value else {
                    return None;
                };
                match flat.get(path) {
                    None => Some((path.clone(), unescape(text))),
                    Some(Value::String(current)) if current == text => {
                        Some((path.clone(), unescape(text)))
                    }
                    Some(_) => None,
                }
            })
            .collect();

        let mut outcome = TranslateOutcome {
            catalog: target.clone(),
            translated: 0,
            pending: pending.len(),
            issues: Vec::new(),
        };
        if pending.is_empty() {
            return outcome;
        }

        reporter.info(&format!(
            "Translating {} entries to '{}'",
            pending.len(),
            target_locale
        ));

        let mut translated_flat = FlatCatalog::new();
        for batch in pending.chunks(self.batch_size) {
            let texts: Vec<String> = batch.iter().map(|(_, text)| text.clone()).collect();
            let result = self
                .translator
                .translate_batch(&texts, source_locale, target_locale)
                .await
                .and_then(|translations| {
                    if translations.len() == texts.len() {
                        Ok(translations)
                    } else {
                        anyhow::bail!(
                            "expected {} translations, received {}",
                            texts.len(),
                            translations.len()
                        )
                    }
                });

            match result {
                Ok(translations) => {
                    for ((path, _), translated) in batch.iter().zip(translations) {
                        translated_flat
                            .insert(path.clone(), Value::String(escape(&translated)));
                    }
                    outcome.translated += batch.len();
                    reporter.debug(&format!(
                        "Translated batch of {} entries to '{}'",
                        batch.len(),
                        target_locale
                    ));
                }
                Err(err) => {
                    reporter.warn(&format!(
                        "Translation to '{}' failed for {} entries: {:#}",
                        target_locale,
                        batch.len(),
                        err
                    ));
                    outcome
                        .issues
                        .push(Issue::TranslationFailed(TranslationFailedIssue {
                            locale: target_locale.to_string(),
                            paths: batch.iter().map(|(path, _)| path.clone()).collect(),
                            error: format!("{:#}", err),
                        }));
                }
            }
        }

        if !translated_flat.is_empty() {
            let translations = restore_namespaces(&translated_flat);
            write_leaves(outcome.catalog.as_map_mut(), translations.as_map());
        }
        outcome
    }
}

/// Copy every leaf of `patch` into `target`, creating namespaces as needed.
///
/// Entries of `target` that `patch` does not name are left untouched. A leaf
/// that sits where `patch` expects a namespace is kept.
fn write_leaves(target: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (key, value) in patch {
        match value {
            Value::Object(child) => {
                let node = target
                    .entry(key.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Some(node) = node.as_object_mut() {
                    write_leaves(node, child);
                }
            }
            leaf => {
                target.insert(key.clone(), leaf.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::core::reporter::{Level, MemoryReporter};

    /// Prefixes every text with the target locale and records each request.
    #[derive(Default)]
    struct FakeTranslator {
        requests: RefCell<Vec<Vec<String>>>,
        fail_on_call: Option<usize>,
        drop_last: bool,
    }

    impl Translator for FakeTranslator {
        async fn translate_batch(
            &self,
            texts: &[String],
            _source: &str,
            target: &str,
        ) -> Result<Vec<String>> {
            let call = self.requests.borrow().len();
            self.requests.borrow_mut().push(texts.to_vec());
            if self.fail_on_call == Some(call) {
                anyhow::bail!("quota exceeded");
            }
            let mut out: Vec<String> = texts.iter().map(|t| format!("[{}] {}", target, t)).collect();
            if self.drop_last {
                out.pop();
            }
            Ok(out)
        }
    }

    #[tokio::test]
    async fn test_only_untranslated_entries_are_sent() {
        let default = Catalog::from(json!({
            "Page": { "hello": "Hello", "bye": "Bye", "new": "New. Entry." },
            "count": 3
        }));
        let target = Catalog::from(json!({
            "Page": { "hello": "Bonjour", "bye": "Bye" }
        }));
        let translator = FakeTranslator::default();
        let auto = AutoTranslator::new(translator, 100);
        let reporter = MemoryReporter::new();

        let outcome = auto
            .translate_catalog(&default, &target, "en", "fr", &reporter)
            .await;

        assert_eq!(
            auto.translator.requests.borrow().clone(),
            vec![vec!["Bye".to_string(), "New. Entry.".to_string()]]
        );
        assert_eq!(
            outcome.catalog,
            Catalog::from(json!({
                "Page": { "hello": "Bonjour", "bye": "[fr] Bye", "new": "[fr] New. Entry." }
            }))
        );
        assert_eq!(outcome.translated, 2);
        assert!(outcome.issues.is_empty());
    }

    #[tokio::test]
    async fn test_translated_entries_with_colons_stay_byte_identical() {
        let default = Catalog::from(json!({
            "Page": { "warn": "Warning...", "new": "New" }
        }));
        let target = Catalog::parse(
            "{\n  \"Page\": {\n    \"warn\": \"Attention :...\",\n    \"time\": \"à 10:30.\"\n  }\n}\n",
        )
        .unwrap();
        let auto = AutoTranslator::new(FakeTranslator::default(), 100);

        let outcome = auto
            .translate_catalog(&default, &target, "en", "fr", &MemoryReporter::new())
            .await;

        assert_eq!(
            auto.translator.requests.borrow().clone(),
            vec![vec!["New".to_string()]]
        );
        assert_eq!(
            outcome.catalog.to_pretty_json().unwrap(),
            "{\n  \"Page\": {\n    \"warn\": \"Attention :...\",\n    \"time\": \"à 10:30.\",\n    \"new\": \"[fr] New\"\n  }\n}\n"
        );
    }

    #[tokio::test]
    async fn test_translations_keep_dots_and_colons() {
        let default = Catalog::from(json!({ "Page": { "title": "Note: see p. 2." } }));
        let auto = AutoTranslator::new(FakeTranslator::default(), 100);

        let outcome = auto
            .translate_catalog(&default, &Catalog::new(), "en", "fr", &MemoryReporter::new())
            .await;

        assert_eq!(
            auto.translator.requests.borrow().clone(),
            vec![vec!["Note: see p. 2.".to_string()]]
        );
        assert_eq!(
            outcome.catalog,
            Catalog::from(json!({ "Page": { "title": "[fr] Note: see p. 2." } }))
        );
    }

    #[tokio::test]
    async fn test_fully_translated_catalog_sends_nothing() {
        let default = Catalog::from(json!({ "Page": { "hello": "Hello" } }));
        let target = Catalog::from(json!({ "Page": { "hello": "Bonjour" } }));
        let auto = AutoTranslator::new(FakeTranslator::default(), 100);

        let outcome = auto
            .translate_catalog(&default, &target, "en", "fr", &MemoryReporter::new())
            .await;

        assert!(auto.translator.requests.borrow().is_empty());
        assert_eq!(outcome.catalog, target);
        assert_eq!(outcome.pending, 0);
    }

    #[tokio::test]
    async fn test_batches_respect_batch_size() {
        let default = Catalog::from(json!({ "a": "A", "b": "B", "c": "C" }));
        let auto = AutoTranslator::new(FakeTranslator::default(), 2);

        auto.translate_catalog(&default, &Catalog::new(), "en", "de", &MemoryReporter::new())
            .await;

        let sizes: Vec<usize> = auto
            .translator
            .requests
            .borrow()
            .iter()
            .map(Vec::len)
            .collect();
        assert_eq!(sizes, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_failed_batch_keeps_prior_values() {
        let default = Catalog::from(json!({ "a": "A", "b": "B", "c": "C" }));
        let target = Catalog::from(json!({ "a": "A", "b": "B" }));
        let translator = FakeTranslator {
            fail_on_call: Some(0),
            ..Default::default()
        };
        let auto = AutoTranslator::new(translator, 2);
        let reporter = MemoryReporter::new();

        let outcome = auto
            .translate_catalog(&default, &target, "en", "es", &reporter)
            .await;

        assert_eq!(
            outcome.catalog,
            Catalog::from(json!({ "a": "A", "b": "B", "c": "[es] C" }))
        );
        assert_eq!(outcome.translated, 1);
        assert_eq!(
            outcome.issues,
            vec![Issue::TranslationFailed(TranslationFailedIssue {
                locale: "es".to_string(),
                paths: vec!["a".to_string(), "b".to_string()],
                error: "quota exceeded".to_string(),
            })]
        );
        assert_eq!(reporter.at(Level::Warn).len(), 1);
    }

    #[tokio::test]
    async fn test_length_mismatch_is_a_failed_batch() {
        let default = Catalog::from(json!({ "a": "A", "b": "B" }));
        let translator = FakeTranslator {
            drop_last: true,
            ..Default::default()
        };
        let auto = AutoTranslator::new(translator, 10);

        let outcome = auto
            .translate_catalog(&default, &Catalog::new(), "en", "it", &MemoryReporter::new())
            .await;

        assert!(outcome.catalog.is_empty());
        assert_eq!(outcome.translated, 0);
        assert_eq!(outcome.issues.len(), 1);
    }
}
