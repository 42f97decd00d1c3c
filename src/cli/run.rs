use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, extract::extract, init::init},
    report::TerminalReporter,
};

/// Dispatch the parsed arguments to their command handler.
///
/// Returns `Err` when the command aborts (config error, dotted key,
/// structural catalog conflict, I/O failure).
pub fn run(Arguments { command }: Arguments, reporter: &TerminalReporter) -> Result<CommandResult> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd, reporter),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
