use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): Command completed, possibly with warnings
/// - `Error` (2): Command aborted (config error, dotted key, structural conflict, I/O error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Command completed. Recoverable issues may have been reported.
    Success,
    /// Command aborted on a fatal error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
