use std::path::PathBuf;

use crate::core::ExtractSummary;
use crate::issues::{Issue, Severity};

#[derive(Debug)]
pub enum CommandSummary {
    Extract(ExtractReport),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct ExtractReport {
    pub summary: ExtractSummary,
    /// Config file in use, or `None` for built-in defaults.
    pub config_path: Option<PathBuf>,
    pub clean: bool,
    pub auto_translate: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
}

/// Result of running a command to completion.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        let (error_count, warning_count) = match &summary {
            CommandSummary::Extract(report) => count_by_severity(&report.summary.issues),
            CommandSummary::Init(_) => (0, 0),
        };
        Self {
            summary,
            error_count,
            warning_count,
        }
    }

    pub fn issues(&self) -> &[Issue] {
        match &self.summary {
            CommandSummary::Extract(report) => &report.summary.issues,
            CommandSummary::Init(_) => &[],
        }
    }
}

fn count_by_severity(issues: &[Issue]) -> (usize, usize) {
    let errors = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    (errors, issues.len() - errors)
}
