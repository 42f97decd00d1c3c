//! Terminal output.
//!
//! Progress messages go to stderr through [`TerminalReporter`]; the final
//! summary and issue list go to stdout.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, ExtractReport, InitSummary};
use crate::core::reporter::{Level, Reporter};
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Coloured stderr reporter. Debug messages are shown only in verbose mode.
pub struct TerminalReporter {
    verbose: bool,
}

impl TerminalReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, level: Level, message: &str) {
        if level == Level::Debug && !self.verbose {
            return;
        }
        let mut stderr = io::stderr().lock();
        write_message(level, message, &mut stderr);
    }
}

fn write_message<W: Write>(level: Level, message: &str, writer: &mut W) {
    let _ = match level {
        Level::Debug => writeln!(writer, "{} {}", "debug:".dimmed(), message.dimmed()),
        Level::Info => writeln!(writer, "{} {}", "info:".bold().blue(), message),
        Level::Success => writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green()),
        Level::Warn => writeln!(writer, "{} {}", "warning:".bold().yellow(), message),
        Level::Error => writeln!(writer, "{} {}", "error:".bold().red(), message),
    };
}

/// Print the result of a command to stdout.
pub fn print(result: &CommandResult) {
    print_to(result, &mut io::stdout().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, writer: &mut W) {
    match &result.summary {
        CommandSummary::Extract(report) => {
            report_to(result.issues(), writer);
            print_extract_summary_to(report, writer);
        }
        CommandSummary::Init(summary) => print_init_to(summary, writer),
    }
}

/// Print issues in cargo-style format.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort_by_key(|issue| issue.report_rule());

    for issue in &sorted {
        print_issue(issue, writer);
    }
    print_problem_count(&sorted, writer);
}

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    let location = match issue.location() {
        ReportLocation::File { path } => path.to_string(),
        ReportLocation::Catalog { path } => format!("key {}", path),
        ReportLocation::Locale { locale } => format!("locale {}", locale),
    };
    let _ = writeln!(writer, "  {} {}", "-->".blue(), location);

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "  {} {} {}", "=".blue(), "note:".bold(), details);
    }

    let _ = writeln!(writer);
}

fn print_problem_count<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

fn print_extract_summary_to<W: Write>(report: &ExtractReport, writer: &mut W) {
    let summary = &report.summary;

    for locale in &summary.locales {
        if locale.skipped {
            let _ = writeln!(
                writer,
                "{} {}: skipped",
                FAILURE_MARK.red(),
                locale.locale.bold()
            );
            continue;
        }

        let mut parts = vec![
            format!("{} added", locale.stats.added),
            format!("{} updated", locale.stats.updated),
            format!("{} unchanged", locale.stats.unchanged),
        ];
        if report.clean {
            parts.push(format!("{} removed", locale.removed.len()));
        }
        if report.auto_translate {
            parts.push(format!("{} translated", locale.translated));
        }
        let _ = writeln!(
            writer,
            "{} {}: {}",
            SUCCESS_MARK.green(),
            locale.locale.bold(),
            parts.join(", ")
        );
    }

    let mut line = format!(
        "Extracted {} from {}",
        plural(summary.paths, "message"),
        plural(summary.files_scanned, "source file")
    );
    if summary.files_failed > 0 {
        line.push_str(&format!(" ({} skipped)", summary.files_failed));
    }
    let _ = writeln!(writer, "{}", line.green());
}

fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", summary.path.display()).green()
    );
}
