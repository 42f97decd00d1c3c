//! next-intl-scanner - message extraction for next-intl projects
//!
//! Scans JavaScript/TypeScript sources for `useTranslations` / `getTranslations`
//! calls and configured marker elements (such as `<FormattedMessage>`), then
//! merges the discovered messages into one JSON catalog per locale. Optionally
//! removes stale entries and machine-translates untranslated ones.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, terminal output)
//! - `config`: Configuration file discovery, loading and validation
//! - `core`: Extraction engine (file scanning, parsing, catalogs, translation)
//! - `issues`: Recoverable issue types and their report formatting
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
pub mod utils;
