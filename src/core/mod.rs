//! Extraction and catalog engine.
//!
//! The engine never prints and never reads the environment. Progress goes
//! through a [`reporter::Reporter`], recoverable problems come back as
//! [`crate::issues::Issue`]s and fatal ones as [`error::ScanError`]s.

pub mod catalog;
pub mod conflicts;
pub mod error;
pub mod extract;
pub mod file_scanner;
pub mod parsers;
pub mod pipeline;
pub mod reporter;
pub mod translate;

pub use catalog::{Catalog, MergeStats};
pub use error::ScanError;
pub use extract::TranslationRecord;
pub use pipeline::{ExtractOptions, ExtractPaths, ExtractSummary, LocaleSummary};
