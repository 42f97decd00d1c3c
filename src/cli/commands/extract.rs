use std::path::Path;

use anyhow::{Context, Result, bail};

use super::super::args::ExtractCommand;
use super::{CommandResult, CommandSummary, ExtractReport};
use crate::{
    config::{CONFIG_FILE_NAME, ConfigLoadResult, load_config},
    core::{
        ExtractOptions, ExtractPaths,
        pipeline::{run_extract, run_extract_with},
        reporter::Reporter,
        translate::{AutoTranslator, GoogleTranslator},
    },
};

pub fn extract(cmd: ExtractCommand, reporter: &dyn Reporter) -> Result<CommandResult> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let ConfigLoadResult { config, path } = load_config(cmd.config.as_deref(), &cwd)?;
    match &path {
        Some(path) => reporter.debug(&format!("Using config {}", path.display())),
        None => reporter.info(&format!(
            "No {} found, using default configuration",
            CONFIG_FILE_NAME
        )),
    }

    let api_key = if cmd.auto_translate {
        match cmd.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Some(key.to_string()),
            _ => bail!(
                "--auto-translate requires an API key (--api-key or GOOGLE_TRANSLATE_API_KEY)"
            ),
        }
    } else {
        None
    };

    let paths = ExtractPaths::resolve(&config, Path::new("."));
    let options = ExtractOptions {
        overwrite: cmd.overwrite,
        clean: cmd.clean,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let summary = match api_key {
        Some(api_key) => {
            let translator = AutoTranslator::new(
                GoogleTranslator::new(api_key)?,
                config.translation_batch_size,
            );
            runtime.block_on(run_extract_with(
                &config,
                &paths,
                options,
                Some(&translator),
                reporter,
            ))?
        }
        None => runtime.block_on(run_extract(&config, &paths, options, reporter))?,
    };

    Ok(CommandResult::new(CommandSummary::Extract(ExtractReport {
        summary,
        config_path: path,
        clean: cmd.clean,
        auto_translate: cmd.auto_translate,
    })))
}
