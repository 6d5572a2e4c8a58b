//! Render-ready view models derived from the collection.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    models::{GameRecord, ScoreTier},
    stats::ScoreStats,
};

/// Shown in place of the card list when the collection is empty.
pub const EMPTY_COLLECTION_MESSAGE: &str = "Your game garden is empty! Add a few titles.";
/// Shown in place of the histogram when there is nothing to analyse.
pub const EMPTY_STATS_MESSAGE: &str = "No games to analyse yet!";

/// One card in the collection list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    /// Position in the collection, used for deletion.
    pub index: usize,
    /// Title, empty when the record has none.
    pub title: String,
    /// Platform, hidden when blank.
    pub platform: Option<String>,
    /// Score, `None` for imported records without a usable one.
    pub score: Option<i64>,
    /// Colour band; `None` outside the creation range.
    pub tier: Option<ScoreTier>,
    /// Cover art link, hidden when blank.
    pub image_link: Option<String>,
    /// Reference link, hidden when blank.
    pub reference_link: Option<String>,
    /// Notes, hidden when blank.
    pub notes: Option<String>,
    /// Parsed creation time.
    pub date_added: Option<DateTime<Utc>>,
}

/// One histogram bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarView {
    /// Bucket label such as `40-49`.
    pub label: String,
    /// Records in the bucket.
    pub count: usize,
    /// Width relative to the fullest bucket, 0 to 100.
    pub width_percent: f64,
    /// Colour band of the bar.
    pub tier: ScoreTier,
}

/// Everything the stats panel displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsView {
    /// Number of records.
    pub total: usize,
    /// Mean score as displayed, `0` when empty.
    pub average_label: String,
    /// One bar per histogram bucket.
    pub bars: Vec<BarView>,
    /// Records left out of the histogram.
    pub out_of_range: usize,
    /// Set when the collection is empty.
    pub empty_message: Option<&'static str>,
}

/// Build cards for every record, in collection order.
pub fn cards(games: &[GameRecord]) -> Vec<CardView> {
    games
        .iter()
        .enumerate()
        .map(|(index, game)| card(index, game))
        .collect()
}

fn card(index: usize, game: &GameRecord) -> CardView {
    CardView {
        index,
        title: game.display_title().to_string(),
        platform: present(&game.platform),
        score: game.rating(),
        tier: game.tier(),
        image_link: present(&game.image_link),
        reference_link: present(&game.reference_link),
        notes: present(&game.notes),
        date_added: game.added_at(),
    }
}

/// Build the stats panel from precomputed statistics.
pub fn stats_view(stats: &ScoreStats) -> StatsView {
    let bars = stats
        .buckets
        .iter()
        .map(|bucket| BarView {
            label: bucket.label(),
            count: bucket.count,
            width_percent: stats.width_percent(bucket),
            tier: bucket.tier(),
        })
        .collect();

    if stats.is_empty() {
        return StatsView {
            total: 0,
            average_label: "0".to_string(),
            bars,
            out_of_range: 0,
            empty_message: Some(EMPTY_STATS_MESSAGE),
        };
    }

    StatsView {
        total: stats.total,
        average_label: stats.average_label(),
        bars,
        out_of_range: stats.out_of_range,
        empty_message: None,
    }
}

fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> GameRecord {
        serde_json::from_value(value).expect("valid record")
    }

    #[test]
    fn cards_follow_collection_order_and_hide_blanks() {
        let games = vec![
            record(json!({"id": 1, "title": "Ico", "score": 95, "platform": "", "notes": "  "})),
            record(json!({"id": 2, "title": "Bubsy", "score": 12, "imageLink": "https://x/y.png"})),
            record(json!({"id": 3, "title": "Imported", "score": 5})),
        ];
        let cards = cards(&games);
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].index, 0);
        assert_eq!(cards[0].platform, None);
        assert_eq!(cards[0].notes, None);
        assert_eq!(cards[0].tier, Some(ScoreTier::High));
        assert_eq!(cards[1].image_link.as_deref(), Some("https://x/y.png"));
        assert_eq!(cards[1].tier, Some(ScoreTier::Low));
        assert_eq!(cards[2].score, Some(5));
        assert_eq!(cards[2].tier, None);
    }

    #[test]
    fn empty_stats_view_reports_no_data() {
        let view = stats_view(&ScoreStats::compute(&[]));
        assert_eq!(view.total, 0);
        assert_eq!(view.average_label, "0");
        assert_eq!(view.empty_message, Some(EMPTY_STATS_MESSAGE));
        assert_eq!(view.bars.len(), 10);
    }

    #[test]
    fn stats_view_carries_widths_and_tiers() {
        let games = vec![
            record(json!({"title": "A", "score": 91})),
            record(json!({"title": "B", "score": 95})),
            record(json!({"title": "C", "score": 42})),
        ];
        let view = stats_view(&ScoreStats::compute(&games));
        assert_eq!(view.total, 3);
        assert_eq!(view.average_label, "76.00");
        assert_eq!(view.empty_message, None);
        let top = &view.bars[9];
        assert_eq!(top.label, "90-100");
        assert_eq!(top.count, 2);
        assert_eq!(top.width_percent, 100.0);
        assert_eq!(top.tier, ScoreTier::High);
        assert_eq!(view.bars[4].width_percent, 50.0);
        assert_eq!(view.bars[4].tier, ScoreTier::MidLow);
    }
}
