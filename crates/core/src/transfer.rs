//! Export and import of the collection as a standalone JSON file.

use std::{
    io,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;
use walkdir::WalkDir;

use crate::models::GameRecord;

/// File name used for exports.
pub const EXPORT_FILE_NAME: &str = "rate_your_games_data.json";

/// Reasons an import file is refused. The collection is never touched on error.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file could not be read.
    #[error("failed to read import file: {0}")]
    Io(#[from] io::Error),
    /// The text is not valid JSON.
    #[error("file is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),
    /// Valid JSON, but the top-level value is not an array.
    #[error("file is not a list of game scores")]
    NotAnArray,
    /// An element of the array is not a JSON object.
    #[error("entry {index} is not a valid game record: {source}")]
    InvalidRecord {
        /// Position of the offending element.
        index: usize,
        /// Decoder error for that element.
        #[source]
        source: serde_json::Error,
    },
}

/// Render the collection as pretty JSON with two-space indentation.
pub fn export_json(games: &[GameRecord]) -> Result<String> {
    serde_json::to_string_pretty(games).context("failed to serialize export")
}

/// Write an export file into `dir`, returning its path.
pub fn export_to_dir(games: &[GameRecord], dir: impl AsRef<Path>) -> Result<PathBuf> {
    let path = dir.as_ref().join(EXPORT_FILE_NAME);
    let contents = export_json(games)?;
    crate::store::write_atomic(&path, contents.as_bytes())?;
    Ok(path)
}

/// Decode import text into records.
pub fn parse_import(text: &str) -> Result<Vec<GameRecord>, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::Malformed)?;
    let Value::Array(items) = value else {
        return Err(ImportError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|source| ImportError::InvalidRecord { index, source })
        })
        .collect()
}

/// Read and decode an import file.
pub fn read_import(path: impl AsRef<Path>) -> Result<Vec<GameRecord>, ImportError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    parse_import(&text)
}

/// JSON files under `dir` that can be offered for import, sorted by path.
pub fn import_candidates(dir: impl AsRef<Path>, max_depth: usize) -> Vec<PathBuf> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(max_depth.max(1))
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("Skipping unreadable import entry: {err}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("json"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    use crate::models::GameDraft;

    fn sample() -> Vec<GameRecord> {
        let date = Utc.with_ymd_and_hms(2023, 11, 2, 8, 15, 30).unwrap();
        let mut odd = GameRecord::from_draft(
            1698912930001,
            GameDraft {
                title: "Pentiment".to_string(),
                platform: "Xbox".to_string(),
                score: 87,
                reference_link: "https://example.com/pentiment".to_string(),
                ..GameDraft::default()
            },
            date,
        );
        odd.extra.insert("tags".to_string(), json!(["narrative"]));
        vec![
            GameRecord::from_draft(
                1698912930000,
                GameDraft {
                    title: "Dredge".to_string(),
                    score: 74,
                    image_link: "https://example.com/dredge.png".to_string(),
                    notes: "spooky fishing".to_string(),
                    ..GameDraft::default()
                },
                date,
            ),
            odd,
        ]
    }

    #[test]
    fn export_uses_two_space_indent() -> Result<()> {
        let games = sample();
        let text = export_json(&games[..1])?;
        assert!(text.starts_with("[\n  {\n    \"id\": 1698912930000,"));
        assert!(text.contains("\n    \"dateAdded\": \"2023-11-02T08:15:30.000Z\"\n"));
        assert_eq!(export_json(&[])?, "[]");
        Ok(())
    }

    #[test]
    fn export_then_import_reproduces_collection() -> Result<()> {
        let dir = tempdir()?;
        let games = sample();
        let path = export_to_dir(&games, dir.path())?;
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(EXPORT_FILE_NAME));
        let imported = read_import(&path)?;
        assert_eq!(imported, games);
        Ok(())
    }

    #[test]
    fn rejects_non_array_and_malformed_input() {
        assert!(matches!(parse_import(r#"{"a":1}"#), Err(ImportError::NotAnArray)));
        assert!(matches!(parse_import("[1,"), Err(ImportError::Malformed(_))));
        assert!(matches!(
            parse_import(r#"[{"title":"ok","score":50}, 3]"#),
            Err(ImportError::InvalidRecord { index: 1, .. })
        ));
    }

    #[test]
    fn import_skips_per_record_validation() -> Result<()> {
        let games = parse_import(r#"[{"id":1,"title":"Bad","score":150},{"id":1,"title":"Dup","score":3}]"#)?;
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].score, Some(150));
        assert_eq!(games[1].id, games[0].id);
        Ok(())
    }

    #[test]
    fn loose_entries_import_without_error() -> Result<()> {
        let games = parse_import(
            r#"[{"title":"No score"},{"score":null},{"id":"17","dateAdded":"2024-05-01"},{}]"#,
        )?;
        assert_eq!(games.len(), 4);
        assert!(games.iter().all(|game| game.rating().is_none()));
        assert_eq!(games[2].extra.get("id"), Some(&json!("17")));
        Ok(())
    }

    #[test]
    fn lists_json_candidates() -> Result<()> {
        let dir = tempdir()?;
        fs::create_dir_all(dir.path().join("backups"))?;
        fs::write(dir.path().join("b.json"), "[]")?;
        fs::write(dir.path().join("a.JSON"), "[]")?;
        fs::write(dir.path().join("notes.txt"), "")?;
        fs::write(dir.path().join("backups/old.json"), "[]")?;

        let shallow = import_candidates(dir.path(), 1);
        assert_eq!(
            shallow,
            vec![dir.path().join("a.JSON"), dir.path().join("b.json")]
        );

        let deep = import_candidates(dir.path(), 2);
        assert_eq!(deep.len(), 3);
        assert!(import_candidates(dir.path().join("missing"), 2).is_empty());
        Ok(())
    }
}
