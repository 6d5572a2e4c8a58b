#![warn(clippy::all, missing_docs)]

//! Core domain logic for Rate Your Games.
//!
//! This crate hosts the game record model, the collection store,
//! statistics, export/import, view models and configuration used by
//! the terminal UI and any future frontends.

pub mod config;
pub mod library;
pub mod models;
pub mod notice;
pub mod stats;
pub mod store;
pub mod transfer;
pub mod view;

pub use config::AppConfig;
pub use library::GameLibrary;
pub use models::{parse_score, GameDraft, GameRecord, RecordError, ScoreTier};
pub use notice::{Notice, NoticeKind};
pub use stats::{ScoreBucket, ScoreStats};
pub use store::Store;
pub use transfer::{ImportError, EXPORT_FILE_NAME};
pub use view::{BarView, CardView, StatsView};
