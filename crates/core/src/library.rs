//! The in-memory collection and the operations that mutate it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, SubsecRound, Utc};
use tracing::{info, warn};

use crate::{
    models::{GameDraft, GameRecord},
    stats::ScoreStats,
    store::Store,
    transfer,
    view::{self, CardView, StatsView},
};

/// Owns the collection and persists it after every mutation.
#[derive(Debug)]
pub struct GameLibrary {
    store: Store,
    games: Vec<GameRecord>,
}

impl GameLibrary {
    /// Load the collection from the store. A malformed slot is an error.
    pub fn open(store: Store) -> Result<Self> {
        let games = store
            .load()
            .context("failed to load saved games")?;
        info!(total = games.len(), slot = %store.slot_path().display(), "Collection loaded");
        Ok(Self { store, games })
    }

    /// Records in display order.
    pub fn games(&self) -> &[GameRecord] {
        &self.games
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Backing store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Validate and append a new record, then persist.
    pub fn add(&mut self, draft: GameDraft, now: DateTime<Utc>) -> Result<&GameRecord> {
        draft.validate()?;

        let id = self.next_id(now.timestamp_millis());
        let record = GameRecord::from_draft(id, draft, now.trunc_subsecs(3));
        self.games.push(record);
        if let Err(err) = self.persist() {
            self.games.pop();
            return Err(err);
        }

        let index = self.games.len() - 1;
        let record = &self.games[index];
        info!(id = ?record.id, title = %record.display_title(), score = ?record.score, "Game added");
        Ok(record)
    }

    /// Remove the record at `index`. Out-of-range indices change nothing.
    pub fn delete(&mut self, index: usize) -> Result<Option<GameRecord>> {
        if index >= self.games.len() {
            warn!(index, total = self.games.len(), "Delete index out of range");
            return Ok(None);
        }

        let removed = self.games.remove(index);
        if let Err(err) = self.persist() {
            self.games.insert(index, removed);
            return Err(err);
        }
        info!(id = ?removed.id, title = %removed.display_title(), "Game deleted");
        Ok(Some(removed))
    }

    /// Replace the whole collection with the records in `text`.
    ///
    /// Decoding failures carry an [`ImportError`](crate::transfer::ImportError).
    pub fn import_json(&mut self, text: &str) -> Result<usize> {
        let imported = transfer::parse_import(text)?;
        self.replace(imported)
    }

    /// Replace the whole collection with the records in the file at `path`.
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let imported = transfer::read_import(path)
            .with_context(|| format!("failed to import {}", path.display()))?;
        self.replace(imported)
    }

    fn replace(&mut self, games: Vec<GameRecord>) -> Result<usize> {
        let previous = std::mem::replace(&mut self.games, games);
        if let Err(err) = self.persist() {
            self.games = previous;
            return Err(err);
        }
        info!(total = self.games.len(), "Collection replaced by import");
        Ok(self.games.len())
    }

    /// Pretty JSON of the full collection.
    pub fn export_json(&self) -> Result<String> {
        transfer::export_json(&self.games)
    }

    /// Write the export file into `dir`.
    pub fn export_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = transfer::export_to_dir(&self.games, dir)?;
        info!(path = %path.display(), total = self.games.len(), "Collection exported");
        Ok(path)
    }

    /// Re-read the slot, picking up writes from other instances.
    pub fn reload(&mut self) -> Result<()> {
        self.games = self.store.load()?;
        Ok(())
    }

    /// Aggregate statistics for the current collection.
    pub fn stats(&self) -> ScoreStats {
        ScoreStats::compute(&self.games)
    }

    /// Stats panel view model.
    pub fn stats_view(&self) -> StatsView {
        view::stats_view(&self.stats())
    }

    /// Card view models in display order.
    pub fn cards(&self) -> Vec<CardView> {
        view::cards(&self.games)
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.games)
    }

    fn next_id(&self, candidate: i64) -> i64 {
        if self.games.iter().any(|game| game.id == Some(candidate)) {
            let max = self
                .games
                .iter()
                .filter_map(|game| game.id)
                .max()
                .unwrap_or(candidate);
            max.saturating_add(1)
        } else {
            candidate
        }
    }
}
