use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};

use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

use super::reporter::Reporter;
use crate::config::PageConfig;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Result of scanning files.
pub struct ScanResult {
    /// Files in page order, then path order, without duplicates.
    pub files: Vec<String>,
    pub skipped_count: usize,
}

/// Expand `{a,b}` alternatives, which the `glob` crate does not support.
///
/// `**/*.{ts,tsx}` → `["**/*.ts", "**/*.tsx"]`. Nested groups are expanded too.
/// Unbalanced braces are left as they are.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };

    let mut depth = 0;
    let mut close = None;
    let mut commas = Vec::new();
    for (i, c) in pattern[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(open + i);
                    break;
                }
            }
            ',' if depth == 1 => commas.push(open + i),
            _ => {}
        }
    }
    let Some(close) = close else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    let mut start = open + 1;
    let mut alternatives = Vec::new();
    for comma in commas.into_iter().chain(std::iter::once(close)) {
        alternatives.push(&pattern[start..comma]);
        start = comma + 1;
    }

    alternatives
        .into_iter()
        .flat_map(|alt| expand_braces(&format!("{}{}{}", prefix, alt, suffix)))
        .collect()
}

fn compile(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .flat_map(|p| expand_braces(p))
        .filter_map(|p| Pattern::new(&p).ok())
        .collect()
}

fn matches_any(patterns: &[Pattern], path: &str) -> bool {
    patterns
        .iter()
        .any(|p| p.matches_with(path, MATCH_OPTIONS))
}

/// Relative path with `/` separators, as glob patterns expect.
fn to_match_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Scan `source_dir` for the files selected by `pages`.
///
/// Patterns are matched against paths relative to `source_dir`. A file is
/// selected by a page when it matches the page's `match` pattern and none of
/// the page's or the global `ignore` patterns. Directories matched by an ignore
/// pattern of the form `dir/**` are not descended into.
pub fn scan_files(
    source_dir: &Path,
    pages: &[PageConfig],
    ignore: &[String],
    reporter: &dyn Reporter,
) -> ScanResult {
    let global_ignore = compile(ignore);
    let pruned_dirs: Vec<Pattern> = ignore
        .iter()
        .filter_map(|p| p.strip_suffix("/**"))
        .flat_map(expand_braces)
        .filter_map(|p| Pattern::new(&p).ok())
        .collect();

    let mut skipped_count = 0;
    let mut candidates: Vec<PathBuf> = Vec::new();
    let walker = WalkDir::new(source_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if entry.depth() == 0 || !entry.file_type().is_dir() {
                return true;
            }
            let rel = entry.path().strip_prefix(source_dir).unwrap_or(entry.path());
            !matches_any(&pruned_dirs, &to_match_path(rel))
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                skipped_count += 1;
                reporter.debug(&format!("Cannot access path: {}", e));
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(source_dir) {
            candidates.push(rel.to_path_buf());
        }
    }

    let mut seen: HashSet<&PathBuf> = HashSet::new();
    let mut files = Vec::new();
    for page in pages {
        let include = compile(std::slice::from_ref(&page.pattern));
        let page_ignore = compile(&page.ignore);

        for rel in &candidates {
            let match_path = to_match_path(rel);
            if !matches_any(&include, &match_path)
                || matches_any(&page_ignore, &match_path)
                || matches_any(&global_ignore, &match_path)
            {
                continue;
            }
            if seen.insert(rel) {
                files.push(display_path(source_dir, rel));
            }
        }
    }

    ScanResult {
        files,
        skipped_count,
    }
}

/// Path of a scanned file as shown to users and stored in records.
fn display_path(source_dir: &Path, rel: &Path) -> String {
    let joined = source_dir.join(rel);
    let shown = joined.strip_prefix(".").unwrap_or(&joined);
    shown.to_string_lossy().into_owned()
}
