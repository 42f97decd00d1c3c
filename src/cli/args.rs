//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Extract messages from source and update locale catalogs
//! - `init`: Write a default configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ExtractCommand {
    /// Configuration file (default: search upwards for next-intl-scanner.config.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Replace existing catalog values with the extracted defaults
    #[arg(long)]
    pub overwrite: bool,

    /// Machine-translate missing and untranslated entries of non-default locales
    #[arg(long)]
    pub auto_translate: bool,

    /// Remove catalog entries that are no longer used in source
    #[arg(long)]
    pub clean: bool,

    /// Google Cloud Translation API key (used with --auto-translate)
    #[arg(
        long,
        value_name = "KEY",
        env = "GOOGLE_TRANSLATE_API_KEY",
        hide_env_values = true
    )]
    pub api_key: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract translation messages and update locale catalogs
    Extract(ExtractCommand),
    /// Initialize a new next-intl-scanner.config.json configuration file
    Init,
}
