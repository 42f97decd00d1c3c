//! Issue types for recoverable problems found during a run.
//!
//! Issues never abort a run. They are collected by the pipeline and rendered in
//! the final summary. Fatal conditions are [`crate::core::error::ScanError`]s.

use enum_dispatch::enum_dispatch;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    Conflict,
    ParseError,
    CatalogError,
    TranslationFailed,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::Conflict => write!(f, "conflict"),
            Rule::ParseError => write!(f, "parse-error"),
            Rule::CatalogError => write!(f, "catalog-error"),
            Rule::TranslationFailed => write!(f, "translation-failed"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// The same leaf path was extracted with different default values.
///
/// The first-seen value is the one written to the catalogs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictIssue {
    /// Full dotted leaf path.
    pub path: String,
    /// First-seen default value.
    pub original_value: String,
    /// Every file the path was seen in, first-seen order, no duplicates.
    pub files: Vec<String>,
    /// Differing default values, first-seen order, no duplicates.
    pub other_values: Vec<String>,
}

impl ConflictIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Conflict
    }
}

/// Source file could not be read or parsed. The file was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

/// Catalog file is not valid JSON or its root is not an object.
///
/// The locale is skipped for the rest of the run and its file is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogErrorIssue {
    pub locale: String,
    pub file_path: String,
    pub error: String,
}

impl CatalogErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::CatalogError
    }
}

/// A translation batch failed. Its entries kept their previous values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFailedIssue {
    pub locale: String,
    /// Leaf paths of the batch that were left untranslated.
    pub paths: Vec<String>,
    pub error: String,
}

impl TranslationFailedIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::TranslationFailed
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    Conflict(ConflictIssue),
    ParseError(ParseErrorIssue),
    CatalogError(CatalogErrorIssue),
    TranslationFailed(TranslationFailedIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A source or catalog file.
    File { path: &'a str },
    /// A catalog leaf path, not tied to one file.
    Catalog { path: &'a str },
    /// A locale as a whole.
    Locale { locale: &'a str },
}

/// Trait for types that can be reported to CLI.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for ConflictIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Catalog { path: &self.path }
    }

    fn message(&self) -> String {
        format!(
            "conflicting default values, keeping \"{}\"",
            self.original_value
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        let others = self
            .other_values
            .iter()
            .map(|v| format!("\"{}\"", v))
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!("also {} in {}", others, self.files.join(", ")))
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

impl Report for CatalogErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("locale '{}' was skipped", self.locale))
    }
}

impl Report for TranslationFailedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Locale {
            locale: &self.locale,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("{} entries left untranslated", self.paths.len()))
    }
}
