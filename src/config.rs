use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail, ensure};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::file_scanner::expand_braces;

pub const CONFIG_FILE_NAME: &str = "next-intl-scanner.config.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    #[serde(default = "default_source_directory")]
    pub source_directory: String,
    #[serde(default = "default_output_directory")]
    pub output_directory: String,
    #[serde(default = "default_locale")]
    pub default_locale: String,
    #[serde(default = "default_pages")]
    pub pages: Vec<PageConfig>,
    /// Ignore patterns applied to every page. Always includes the defaults.
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
    #[serde(default, rename = "customJSXPattern")]
    pub custom_jsx_pattern: Vec<CustomJsxPattern>,
    /// Number of source files extracted and merged together.
    #[serde(default = "default_file_batch_size")]
    pub file_batch_size: usize,
    /// Maximum number of texts sent in one translation request.
    #[serde(default = "default_translation_batch_size")]
    pub translation_batch_size: usize,
}

/// A set of source files to scan, relative to `sourceDirectory`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageConfig {
    #[serde(rename = "match")]
    pub pattern: String,
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// A marker element whose attributes carry a complete message:
/// `<FormattedMessage namespace="common" messageKey="all" string="All" />`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CustomJsxPattern {
    pub element: String,
    #[serde(default)]
    pub attributes: CustomJsxAttributes,
}

/// Attribute names used by a [`CustomJsxPattern`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomJsxAttributes {
    #[serde(default = "default_namespace_attribute")]
    pub namespace: String,
    #[serde(default = "default_string_attribute")]
    pub string: String,
    #[serde(default = "default_message_key_attribute")]
    pub message_key: String,
}

impl Default for CustomJsxAttributes {
    fn default() -> Self {
        Self {
            namespace: default_namespace_attribute(),
            string: default_string_attribute(),
            message_key: default_message_key_attribute(),
        }
    }
}

fn default_locales() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_source_directory() -> String {
    "./".to_string()
}

fn default_output_directory() -> String {
    "./messages".to_string()
}

fn default_locale() -> String {
    "en".to_string()
}

fn default_pages() -> Vec<PageConfig> {
    vec![PageConfig {
        pattern: "**/*.{js,jsx,ts,tsx}".to_string(),
        ignore: ["**/*.test.{js,jsx,ts,tsx}", "**/*.spec.{js,jsx,ts,tsx}"]
            .map(String::from)
            .to_vec(),
    }]
}

fn default_ignore() -> Vec<String> {
    ["**/node_modules/**", "**/.next/**", ".git/**"]
        .map(String::from)
        .to_vec()
}

fn default_file_batch_size() -> usize {
    50
}

fn default_translation_batch_size() -> usize {
    100
}

fn default_namespace_attribute() -> String {
    "namespace".to_string()
}

fn default_string_attribute() -> String {
    "string".to_string()
}

fn default_message_key_attribute() -> String {
    "messageKey".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales: default_locales(),
            source_directory: default_source_directory(),
            output_directory: default_output_directory(),
            default_locale: default_locale(),
            pages: default_pages(),
            ignore: default_ignore(),
            custom_jsx_pattern: Vec::new(),
            file_batch_size: default_file_batch_size(),
            translation_batch_size: default_translation_batch_size(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// A configuration that fails validation aborts the run before any file is read.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.locales.is_empty(), "'locales' must not be empty");
        if let Some(locale) = self.locales.iter().find(|l| l.trim().is_empty()) {
            bail!("Invalid locale in 'locales': \"{}\"", locale);
        }
        ensure!(
            !self.source_directory.is_empty(),
            "'sourceDirectory' is required"
        );
        ensure!(
            !self.output_directory.is_empty(),
            "'outputDirectory' is required"
        );
        ensure!(!self.default_locale.is_empty(), "'defaultLocale' is required");
        ensure!(
            self.locales.contains(&self.default_locale),
            "'defaultLocale' \"{}\" is not listed in 'locales'",
            self.default_locale
        );
        ensure!(self.file_batch_size > 0, "'fileBatchSize' must be positive");
        ensure!(
            self.translation_batch_size > 0,
            "'translationBatchSize' must be positive"
        );

        for page in &self.pages {
            validate_pattern(&page.pattern, "pages.match")?;
            for pattern in &page.ignore {
                validate_pattern(pattern, "pages.ignore")?;
            }
        }
        for pattern in &self.ignore {
            validate_pattern(pattern, "ignore")?;
        }

        for custom in &self.custom_jsx_pattern {
            ensure!(
                !custom.element.is_empty(),
                "'customJSXPattern' entries need an 'element'"
            );
            let attributes = &custom.attributes;
            ensure!(
                !attributes.namespace.is_empty()
                    && !attributes.string.is_empty()
                    && !attributes.message_key.is_empty(),
                "'customJSXPattern' for <{}> needs non-empty attribute names",
                custom.element
            );
        }

        Ok(())
    }
}

fn validate_pattern(pattern: &str, field: &str) -> Result<()> {
    for expanded in expand_braces(pattern) {
        Pattern::new(&expanded)
            .with_context(|| format!("Invalid glob pattern in '{}': \"{}\"", field, pattern))?;
    }
    Ok(())
}

/// Union of two ignore lists, keeping first-seen order.
fn merge_ignores(defaults: Vec<String>, user: Vec<String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(defaults.len() + user.len());
    for pattern in defaults.into_iter().chain(user) {
        if !merged.contains(&pattern) {
            merged.push(pattern);
        }
    }
    merged
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// The file the config was read from, or `None` when using defaults.
    pub path: Option<PathBuf>,
}

/// Parse a config file, merge it with the defaults and validate it.
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let mut config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.ignore = merge_ignores(default_ignore(), config.ignore);
    config.validate()?;
    Ok(config)
}

/// Load configuration.
///
/// An explicit path must exist. Without one, the config file is searched from
/// `start_dir` upwards, falling back to the defaults when none is found.
pub fn load_config(explicit: Option<&Path>, start_dir: &Path) -> Result<ConfigLoadResult> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("Config file does not exist: {}", path.display());
            }
            Some(path.to_path_buf())
        }
        None => find_config_file(start_dir),
    };

    match path {
        Some(path) => Ok(ConfigLoadResult {
            config: parse_config_file(&path)?,
            path: Some(path),
        }),
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
