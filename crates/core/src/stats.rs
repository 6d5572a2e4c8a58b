//! Aggregate statistics over the collection.
//!
//! Scores are grouped into ten buckets: `0-9`, `10-19`, ... `80-89` and a
//! final `90-100` bucket that is closed on both ends (eleven scores wide).
//! Scores below 0 or above 100, and imported records with no usable score,
//! land in [`ScoreStats::out_of_range`] so that bucket counts plus that
//! figure always add up to the total.

use serde::Serialize;

use crate::models::{GameRecord, ScoreTier};

/// Number of histogram buckets.
pub const BUCKET_COUNT: usize = 10;
const BUCKET_WIDTH: i64 = 10;
const TOP_SCORE: i64 = 100;

/// One histogram bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBucket {
    /// First score in the bucket.
    pub start: i64,
    /// Last score in the bucket, inclusive.
    pub end: i64,
    /// Number of records in the bucket.
    pub count: usize,
}

impl ScoreBucket {
    /// Label like `40-49`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }

    /// Colour band for the bar drawn for this bucket.
    pub fn tier(&self) -> ScoreTier {
        ScoreTier::for_bucket_start(self.start)
    }
}

/// Count, mean and histogram of a collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreStats {
    /// Number of records.
    pub total: usize,
    /// Mean of the usable scores rounded to two decimals; 0 when there are none.
    pub average: f64,
    /// Histogram buckets in ascending order.
    pub buckets: Vec<ScoreBucket>,
    /// Records whose score is missing or falls outside `[0, 100]`.
    pub out_of_range: usize,
}

impl ScoreStats {
    /// Compute statistics for the given records.
    pub fn compute(games: &[GameRecord]) -> Self {
        let mut buckets = empty_buckets();
        let mut out_of_range = 0;
        let mut sum: i64 = 0;
        let mut scored = 0usize;

        for game in games {
            let Some(score) = game.rating() else {
                out_of_range += 1;
                continue;
            };
            sum = sum.saturating_add(score);
            scored += 1;
            match bucket_index(score) {
                Some(index) => buckets[index].count += 1,
                None => out_of_range += 1,
            }
        }

        let total = games.len();
        let average = if scored == 0 {
            0.0
        } else {
            round_two(sum as f64 / scored as f64)
        };

        Self {
            total,
            average,
            buckets,
            out_of_range,
        }
    }

    /// Whether there is anything to report.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Average formatted with two decimals, e.g. `20.00`.
    pub fn average_label(&self) -> String {
        format!("{:.2}", self.average)
    }

    /// Largest single bucket count.
    pub fn max_bucket_count(&self) -> usize {
        self.buckets
            .iter()
            .map(|bucket| bucket.count)
            .max()
            .unwrap_or(0)
    }

    /// Bar width of a bucket as a percentage of the fullest bucket.
    pub fn width_percent(&self, bucket: &ScoreBucket) -> f64 {
        let max = self.max_bucket_count();
        if max == 0 {
            0.0
        } else {
            bucket.count as f64 / max as f64 * 100.0
        }
    }
}

/// Bucket index for a score, or `None` when it lies outside `[0, 100]`.
pub fn bucket_index(score: i64) -> Option<usize> {
    if !(0..=TOP_SCORE).contains(&score) {
        return None;
    }
    let index = (score / BUCKET_WIDTH) as usize;
    Some(index.min(BUCKET_COUNT - 1))
}

fn empty_buckets() -> Vec<ScoreBucket> {
    (0..BUCKET_COUNT as i64)
        .map(|index| {
            let start = index * BUCKET_WIDTH;
            let end = if index == BUCKET_COUNT as i64 - 1 {
                TOP_SCORE
            } else {
                start + BUCKET_WIDTH - 1
            };
            ScoreBucket {
                start,
                end,
                count: 0,
            }
        })
        .collect()
}

fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn games(scores: &[i64]) -> Vec<GameRecord> {
        scores
            .iter()
            .enumerate()
            .map(|(idx, score)| GameRecord {
                id: Some(idx as i64),
                title: Some(format!("Game {idx}")),
                platform: None,
                score: Some(*score),
                image_link: None,
                reference_link: None,
                notes: None,
                date_added: None,
                extra: Map::new(),
            })
            .collect()
    }

    #[test]
    fn empty_collection_has_zero_average() {
        let stats = ScoreStats::compute(&[]);
        assert!(stats.is_empty());
        assert_eq!(stats.average, 0.0);
        assert_eq!(stats.average_label(), "0.00");
        assert_eq!(stats.buckets.len(), BUCKET_COUNT);
        assert!(stats
            .buckets
            .iter()
            .all(|bucket| stats.width_percent(bucket) == 0.0));
    }

    #[test]
    fn average_is_rounded_to_two_decimals() {
        let stats = ScoreStats::compute(&games(&[10, 20, 30]));
        assert_eq!(stats.total, 3);
        assert_eq!(stats.average_label(), "20.00");

        let stats = ScoreStats::compute(&games(&[10, 10, 11]));
        assert_eq!(stats.average, 10.33);
    }

    #[test]
    fn bucket_layout_covers_zero_to_hundred() {
        let stats = ScoreStats::compute(&[]);
        let labels: Vec<String> = stats.buckets.iter().map(ScoreBucket::label).collect();
        assert_eq!(
            labels,
            [
                "0-9", "10-19", "20-29", "30-39", "40-49", "50-59", "60-69", "70-79", "80-89",
                "90-100"
            ]
        );
    }

    #[test]
    fn bucket_edges() {
        assert_eq!(bucket_index(0), Some(0));
        assert_eq!(bucket_index(9), Some(0));
        assert_eq!(bucket_index(10), Some(1));
        assert_eq!(bucket_index(89), Some(8));
        assert_eq!(bucket_index(90), Some(9));
        assert_eq!(bucket_index(100), Some(9));
        assert_eq!(bucket_index(101), None);
        assert_eq!(bucket_index(-1), None);
    }

    #[test]
    fn counts_sum_to_total() {
        let scores = [0, 5, 10, 19, 45, 60, 77, 89, 90, 99, 100, 100];
        let stats = ScoreStats::compute(&games(&scores));
        let sum: usize = stats.buckets.iter().map(|bucket| bucket.count).sum();
        assert_eq!(sum, stats.total);
        assert_eq!(stats.out_of_range, 0);
        assert_eq!(stats.buckets[9].count, 4);
    }

    #[test]
    fn out_of_range_scores_are_counted_separately() {
        let stats = ScoreStats::compute(&games(&[-5, 50, 150]));
        let sum: usize = stats.buckets.iter().map(|bucket| bucket.count).sum();
        assert_eq!(sum, 1);
        assert_eq!(stats.out_of_range, 2);
        assert_eq!(sum + stats.out_of_range, stats.total);
    }

    #[test]
    fn unscored_records_stay_out_of_the_average() -> anyhow::Result<()> {
        let mut games = games(&[40, 60]);
        games.extend(serde_json::from_value::<Vec<GameRecord>>(serde_json::json!([
            {"title": "No score"},
            {"title": "Text score", "score": "80 points"}
        ]))?);
        let stats = ScoreStats::compute(&games);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.average, 60.0);
        assert_eq!(stats.buckets[8].count, 1);
        assert_eq!(stats.out_of_range, 1);
        Ok(())
    }

    #[test]
    fn widths_are_relative_to_fullest_bucket() {
        let stats = ScoreStats::compute(&games(&[50, 55, 58, 91, 12]));
        assert_eq!(stats.max_bucket_count(), 3);
        assert_eq!(stats.width_percent(&stats.buckets[5]), 100.0);
        let ninety = stats.width_percent(&stats.buckets[9]);
        assert!((ninety - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.width_percent(&stats.buckets[0]), 0.0);
    }
}
