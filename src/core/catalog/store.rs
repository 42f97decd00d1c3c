//! Catalog files on disk: `<output_dir>/<locale>.json`.

use std::{io::ErrorKind, path::PathBuf};

use anyhow::{Context, Result};
use tokio::fs;

use super::Catalog;

#[derive(Debug, Clone)]
pub struct CatalogStore {
    output_dir: PathBuf,
}

impl CatalogStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn path_for(&self, locale: &str) -> PathBuf {
        self.output_dir.join(format!("{}.json", locale))
    }

    /// Create the output directory and an empty catalog for `locale` if missing.
    ///
    /// Returns `true` when a file was created.
    pub async fn ensure_initialized(&self, locale: &str) -> Result<bool> {
        let path = self.path_for(locale);
        if fs::try_exists(&path)
            .await
            .with_context(|| format!("Failed to access {}", path.display()))?
        {
            return Ok(false);
        }
        self.save(locale, &Catalog::new()).await?;
        Ok(true)
    }

    /// Read the catalog for `locale`. A missing file is an empty catalog.
    pub async fn load(&self, locale: &str) -> Result<Catalog> {
        let path = self.path_for(locale);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Catalog::new()),
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to read {}", path.display()));
            }
        };
        Catalog::parse(&content).with_context(|| format!("Invalid catalog {}", path.display()))
    }

    /// Write the catalog through a temporary file and a rename, so a crash never
    /// leaves a truncated catalog behind.
    pub async fn save(&self, locale: &str, catalog: &Catalog) -> Result<()> {
        fs::create_dir_all(&self.output_dir).await.with_context(|| {
            format!("Failed to create directory: {}", self.output_dir.display())
        })?;

        let path = self.path_for(locale);
        let tmp_path = self.output_dir.join(format!(".{}.json.tmp", locale));
        fs::write(&tmp_path, catalog.to_pretty_json()?)
            .await
            .with_context(|| format!("Failed to write file: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &path)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(())
    }
}
