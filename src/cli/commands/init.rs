use std::{fs, path::Path};

use anyhow::{Context, Result, bail};

use super::{CommandResult, CommandSummary, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init() -> Result<CommandResult> {
    let summary = init_in(Path::new("."))?;
    Ok(CommandResult::new(CommandSummary::Init(summary)))
}

/// Write the default configuration into `dir`, refusing to overwrite.
pub fn init_in(dir: &Path) -> Result<InitSummary> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(&config_path, format!("{}\n", default_config_json()?))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(InitSummary {
        path: config_path.strip_prefix(".").unwrap_or(&config_path).to_path_buf(),
    })
}
