//! Persistence of the collection slot.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::models::GameRecord;

/// Key of the slot holding the collection.
pub const DEFAULT_STORAGE_KEY: &str = "games";

/// Single named slot on disk holding the whole collection as one JSON array.
#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
    key: String,
}

impl Store {
    /// Create a store for `key` rooted at the provided directory.
    pub fn new(root: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            key: key.into(),
        }
    }

    /// Store using the default `games` key.
    pub fn with_default_key(root: impl Into<PathBuf>) -> Self {
        Self::new(root, DEFAULT_STORAGE_KEY)
    }

    /// Path of the slot file.
    pub fn slot_path(&self) -> PathBuf {
        self.root.join(format!("{}.json", self.key))
    }

    /// Read the slot, returning an empty collection when nothing was saved yet.
    pub fn load(&self) -> Result<Vec<GameRecord>> {
        let path = self.slot_path();
        if !path.exists() {
            debug!(path = %path.display(), "slot absent; starting empty");
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let games: Vec<GameRecord> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        debug!(path = %path.display(), total = games.len(), "slot loaded");
        Ok(games)
    }

    /// Overwrite the slot with the full collection.
    pub fn save(&self, games: &[GameRecord]) -> Result<()> {
        let path = self.slot_path();
        let serialised = serde_json::to_vec(games).context("failed to serialize collection")?;
        write_atomic(&path, &serialised)?;
        debug!(path = %path.display(), total = games.len(), "slot saved");
        Ok(())
    }

    /// Remove the slot entirely.
    pub fn clear(&self) -> Result<()> {
        let path = self.slot_path();
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("failed to remove {}", path.display()))?;
        }
        Ok(())
    }
}

/// Write `contents` to `path` through a temp file in the same directory.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)
        .with_context(|| format!("failed to create {}", parent.display()))?;

    let mut temp = NamedTempFile::new_in(&parent)
        .with_context(|| format!("failed to create temp file in {}", parent.display()))?;
    temp.write_all(contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    temp.persist(path)
        .map_err(|err| err.error)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
