//! Layered application configuration.
//!
//! Values come from built-in defaults, then the optional
//! `<config_dir>/rate-your-games/config.toml`, then `RYG__*` environment
//! variables (e.g. `RYG__NOTICE_SECONDS=5`).

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::store::{Store, DEFAULT_STORAGE_KEY};

/// Directory name used under the platform config and data directories.
pub const APP_DIR: &str = "rate-your-games";
const CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "RYG";

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory holding the collection slot and logs.
    pub data_dir: PathBuf,
    /// Name of the slot inside `data_dir`.
    pub storage_key: String,
    /// Where exports are written.
    pub export_dir: PathBuf,
    /// Where the import picker looks for JSON files.
    pub import_dir: PathBuf,
    /// How long notices stay on screen.
    pub notice_seconds: u64,
    /// How many directory levels the import picker descends.
    pub import_depth: usize,
}

impl AppConfig {
    /// Load configuration from the default config file location.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load configuration using `path` as the optional file layer.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let defaults = Self::defaults();
        let settings = Config::builder()
            .set_default("data_dir", path_string(&defaults.data_dir))?
            .set_default("storage_key", defaults.storage_key.clone())?
            .set_default("export_dir", path_string(&defaults.export_dir))?
            .set_default("import_dir", path_string(&defaults.import_dir))?
            .set_default("notice_seconds", defaults.notice_seconds as i64)?
            .set_default("import_depth", defaults.import_depth as i64)?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).prefix_separator("__"))
            .build()
            .with_context(|| format!("failed to read configuration from {}", path.display()))?;

        let config: Self = settings
            .try_deserialize()
            .context("invalid configuration values")?;
        Ok(config)
    }

    /// Built-in defaults based on the platform directories.
    pub fn defaults() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR);
        let exchange_dir = dirs::download_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_dir,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            export_dir: exchange_dir.clone(),
            import_dir: exchange_dir,
            notice_seconds: 3,
            import_depth: 2,
        }
    }

    /// Store for the configured slot.
    pub fn store(&self) -> Store {
        Store::new(&self.data_dir, &self.storage_key)
    }

    /// Directory for log files.
    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    /// Notice lifetime as a duration.
    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_seconds)
    }
}

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}

/// Write a commented default config file if none exists yet.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = default_config_path();
    write_default_config(&path)?;
    Ok(path)
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let defaults = AppConfig::defaults();
    let contents = format!(
        "# Rate Your Games configuration\n\
         # Environment variables prefixed with RYG__ override these values.\n\n\
         # data_dir = \"{}\"\n\
         # storage_key = \"{}\"\n\
         # export_dir = \"{}\"\n\
         # import_dir = \"{}\"\n\
         notice_seconds = {}\n\
         import_depth = {}\n",
        path_string(&defaults.data_dir),
        defaults.storage_key,
        path_string(&defaults.export_dir),
        path_string(&defaults.import_dir),
        defaults.notice_seconds,
        defaults.import_depth,
    );
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote default configuration");
    Ok(())
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
