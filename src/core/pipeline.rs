//! The extract pipeline: scan → extract → merge → clean → translate.
//!
//! Source files are processed in batches. Each batch is parsed on the rayon
//! pool, checked, de-duplicated against everything seen so far and merged into
//! every locale catalog, which is then written before the next batch starts.
//! Cleaning and translation run once, after the last batch.

use std::{
    collections::HashSet,
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use anyhow::{Result, bail};
use rayon::prelude::*;
use swc_common::SourceMap;

use super::{
    catalog::{self, Catalog, CatalogStore, MergeStats},
    conflicts::{ConflictDetector, Observation},
    extract::{TranslationRecord, ensure_no_separator, extract_file},
    file_scanner::scan_files,
    parsers::jsx::parse_jsx_source,
    reporter::Reporter,
    translate::{AutoTranslator, Translator},
};
use crate::{
    config::{Config, CustomJsxPattern},
    issues::{CatalogErrorIssue, Issue, ParseErrorIssue},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Replace existing catalog values with extracted defaults.
    pub overwrite: bool,
    /// Remove catalog entries no longer found in source.
    pub clean: bool,
}

/// Where sources are read from and catalogs written to.
#[derive(Debug, Clone)]
pub struct ExtractPaths {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl ExtractPaths {
    /// Resolve the configured directories against `base`.
    ///
    /// Leading `./` segments are dropped, so `"./messages"` under `.` becomes
    /// `messages` rather than `././messages`.
    pub fn resolve(config: &Config, base: &Path) -> Self {
        Self {
            source_dir: resolve_dir(base, &config.source_directory),
            output_dir: resolve_dir(base, &config.output_directory),
        }
    }
}

fn resolve_dir(base: &Path, dir: &str) -> PathBuf {
    let rel: PathBuf = Path::new(dir)
        .components()
        .skip_while(|c| matches!(c, Component::CurDir))
        .collect();
    if rel.as_os_str().is_empty() {
        base.to_path_buf()
    } else if base == Path::new(".") {
        rel
    } else {
        base.join(rel)
    }
}

#[derive(Debug, Default)]
pub struct LocaleSummary {
    pub locale: String,
    /// Catalog file was created by this run.
    pub created: bool,
    /// Catalog could not be read; nothing was written for this locale.
    pub skipped: bool,
    pub stats: MergeStats,
    pub removed: Vec<String>,
    pub translated: usize,
}

#[derive(Debug, Default)]
pub struct ExtractSummary {
    pub files_scanned: usize,
    pub files_failed: usize,
    /// Records extracted, including repeated paths.
    pub records: usize,
    /// Distinct leaf paths extracted.
    pub paths: usize,
    pub locales: Vec<LocaleSummary>,
    pub issues: Vec<Issue>,
}

struct LocaleState {
    summary: LocaleSummary,
    catalog: Option<Catalog>,
}

/// Run extraction with merge and optional clean.
pub async fn run_extract(
    config: &Config,
    paths: &ExtractPaths,
    options: ExtractOptions,
    reporter: &dyn Reporter,
) -> Result<ExtractSummary> {
    run_extract_with::<NoTranslator>(config, paths, options, None, reporter).await
}

/// Run extraction, then translate every non-default locale with `translator`.
pub async fn run_extract_with<T: Translator>(
    config: &Config,
    paths: &ExtractPaths,
    options: ExtractOptions,
    translator: Option<&AutoTranslator<T>>,
    reporter: &dyn Reporter,
) -> Result<ExtractSummary> {
    if !paths.source_dir.is_dir() {
        bail!(
            "Source directory does not exist: {}",
            paths.source_dir.display()
        );
    }

    let scan = scan_files(&paths.source_dir, &config.pages, &config.ignore, reporter);
    reporter.info(&format!(
        "Found {} source {} in {}",
        scan.files.len(),
        if scan.files.len() == 1 { "file" } else { "files" },
        paths.source_dir.display()
    ));
    if scan.skipped_count > 0 {
        reporter.warn(&format!(
            "{} path(s) could not be accessed (use -v for details)",
            scan.skipped_count
        ));
    }

    let mut summary = ExtractSummary {
        files_scanned: scan.files.len(),
        ..Default::default()
    };

    let store = CatalogStore::new(&paths.output_dir);
    let mut locales = Vec::with_capacity(config.locales.len());
    for locale in &config.locales {
        locales.push(open_locale(&store, locale, reporter, &mut summary.issues).await?);
    }

    let mut detector = ConflictDetector::new();
    let mut extracted: HashSet<String> = HashSet::new();

    for (index, batch) in scan.files.chunks(config.file_batch_size).enumerate() {
        reporter.debug(&format!(
            "Processing batch {} ({} files)",
            index + 1,
            batch.len()
        ));

        let records = extract_batch(batch, &config.custom_jsx_pattern, reporter, &mut summary).await;
        ensure_no_separator(&records)?;

        let mut fresh = Vec::new();
        for record in records {
            if detector.observe(&record) == Observation::First {
                extracted.insert(record.leaf_path());
                fresh.push(record);
            }
        }

        for state in locales.iter_mut() {
            let Some(catalog) = state.catalog.as_mut() else {
                continue;
            };
            let stats = catalog::merge(catalog, &fresh, options.overwrite)?;
            state.summary.stats.absorb(stats);
            if stats.changed() {
                store.save(&state.summary.locale, catalog).await?;
                reporter.debug(&format!(
                    "Wrote {} ({} added, {} updated)",
                    store.path_for(&state.summary.locale).display(),
                    stats.added,
                    stats.updated
                ));
            }
        }
    }
    summary.paths = extracted.len();

    if options.clean {
        for state in locales.iter_mut() {
            let Some(catalog) = state.catalog.as_mut() else {
                continue;
            };
            let removed = catalog::clean(catalog, &extracted);
            if !removed.is_empty() {
                store.save(&state.summary.locale, catalog).await?;
                for path in &removed {
                    reporter.debug(&format!(
                        "Removed '{}' from {}",
                        path, state.summary.locale
                    ));
                }
            }
            state.summary.removed = removed;
        }
    }

    if let Some(translator) = translator {
        translate_locales(config, &store, translator, &mut locales, reporter, &mut summary)
            .await?;
    }

    summary
        .issues
        .extend(detector.finish().into_iter().map(Issue::Conflict));
    summary.locales = locales.into_iter().map(|state| state.summary).collect();
    Ok(summary)
}

async fn open_locale(
    store: &CatalogStore,
    locale: &str,
    reporter: &dyn Reporter,
    issues: &mut Vec<Issue>,
) -> Result<LocaleState> {
    let created = store.ensure_initialized(locale).await?;
    if created {
        reporter.info(&format!(
            "Created {}",
            store.path_for(locale).display()
        ));
    }

    let mut summary = LocaleSummary {
        locale: locale.to_string(),
        created,
        ..Default::default()
    };
    let catalog = match store.load(locale).await {
        Ok(catalog) => Some(catalog),
        Err(err) => {
            reporter.error(&format!(
                "Skipping locale '{}': {:#}",
                locale, err
            ));
            issues.push(Issue::CatalogError(CatalogErrorIssue {
                locale: locale.to_string(),
                file_path: store.path_for(locale).display().to_string(),
                error: format!("{:#}", err),
            }));
            summary.skipped = true;
            None
        }
    };
    Ok(LocaleState { summary, catalog })
}

/// Read, parse and extract one batch of files, keeping file order.
async fn extract_batch(
    files: &[String],
    patterns: &[CustomJsxPattern],
    reporter: &dyn Reporter,
    summary: &mut ExtractSummary,
) -> Vec<TranslationRecord> {
    let mut sources = Vec::with_capacity(files.len());
    for file in files {
        match tokio::fs::read_to_string(file).await {
            Ok(code) => sources.push((file.as_str(), code)),
            Err(err) => {
                let error = format!("Failed to read {}: {}", file, err);
                skip_file(file, error, reporter, summary);
            }
        }
    }

    let results: Vec<(&str, Result<Vec<TranslationRecord>>)> = sources
        .into_par_iter()
        .map(|(file, code)| {
            let source_map = Arc::new(SourceMap::default());
            let records = parse_jsx_source(code, file, source_map)
                .map(|parsed| extract_file(&parsed, file, patterns));
            (file, records)
        })
        .collect();

    let mut records = Vec::new();
    for (file, result) in results {
        match result {
            Ok(mut file_records) => {
                reporter.debug(&format!("{}: {} messages", file, file_records.len()));
                records.append(&mut file_records);
            }
            Err(err) => skip_file(file, err.to_string(), reporter, summary),
        }
    }
    summary.records += records.len();
    records
}

fn skip_file(file: &str, error: String, reporter: &dyn Reporter, summary: &mut ExtractSummary) {
    reporter.warn(&format!("Skipping {}: {}", file, error));
    summary.files_failed += 1;
    summary.issues.push(Issue::ParseError(ParseErrorIssue {
        file_path: file.to_string(),
        error,
    }));
}

async fn translate_locales<T: Translator>(
    config: &Config,
    store: &CatalogStore,
    translator: &AutoTranslator<T>,
    locales: &mut [LocaleState],
    reporter: &dyn Reporter,
    summary: &mut ExtractSummary,
) -> Result<()> {
    let Some(default) = locales
        .iter()
        .find(|state| state.summary.locale == config.default_locale)
        .and_then(|state| state.catalog.clone())
    else {
        reporter.warn(&format!(
            "Default locale '{}' is unavailable; skipping translation",
            config.default_locale
        ));
        return Ok(());
    };

    for state in locales.iter_mut() {
        if state.summary.locale == config.default_locale {
            continue;
        }
        let Some(catalog) = state.catalog.as_mut() else {
            continue;
        };

        let outcome = translator
            .translate_catalog(
                &default,
                catalog,
                &config.default_locale,
                &state.summary.locale,
                reporter,
            )
            .await;
        summary.issues.extend(outcome.issues);
        state.summary.translated = outcome.translated;
        if outcome.translated > 0 {
            *catalog = outcome.catalog;
            store.save(&state.summary.locale, catalog).await?;
        }
    }
    Ok(())
}

/// Placeholder translator type for runs without translation.
enum NoTranslator {}

impl Translator for NoTranslator {
    async fn translate_batch(
        &self,
        _texts: &[String],
        _source: &str,
        _target: &str,
    ) -> Result<Vec<String>> {
        match *self {}
    }
}
