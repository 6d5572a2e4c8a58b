//! Shared domain models.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Lowest score accepted when creating a record.
pub const MIN_SCORE: i64 = 10;
/// Highest score accepted when creating a record.
pub const MAX_SCORE: i64 = 100;

static LEADING_INTEGER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("valid leading integer pattern"));

/// Validation failures raised while creating a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Score outside the accepted creation range.
    #[error("Score must be between {MIN_SCORE} and {MAX_SCORE}.")]
    ScoreOutOfRange {
        /// The rejected score.
        score: i64,
    },
    /// Score text that does not start with an integer.
    #[error("Score '{input}' is not a number.")]
    InvalidScore {
        /// Raw text entered for the score.
        input: String,
    },
    /// Title left blank.
    #[error("A title is required.")]
    MissingTitle,
}

/// One rated title as persisted in the collection slot.
///
/// Known fields are only picked up when they have the expected JSON type.
/// Anything else, including known keys with an unexpected shape, stays in
/// [`GameRecord::extra`] and is written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    /// Creation timestamp in milliseconds, used as identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Game title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Platform the game was played on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    /// Integer rating, expected in `[MIN_SCORE, MAX_SCORE]` for records created locally.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    /// Cover art link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,
    /// Link to a review, store page or wiki entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_link: Option<String>,
    /// Free-form notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the record was created, as the ISO text it was stored with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_added: Option<String>,
    /// Fields this version does not know about, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GameRecord {
    /// Build a record from a validated draft.
    pub fn from_draft(id: i64, draft: GameDraft, date_added: DateTime<Utc>) -> Self {
        Self {
            id: Some(id),
            title: Some(draft.title.trim().to_string()),
            platform: non_blank(draft.platform),
            score: Some(draft.score),
            image_link: non_blank(draft.image_link),
            reference_link: non_blank(draft.reference_link),
            notes: non_blank(draft.notes),
            date_added: Some(date_added.to_rfc3339_opts(SecondsFormat::Millis, true)),
            extra: Map::new(),
        }
    }

    /// Title for display, empty when the record has none.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Numeric rating. Imported records may carry the score as a float or
    /// numeric text; those are read the way the form reads its input.
    pub fn rating(&self) -> Option<i64> {
        self.score
            .or_else(|| self.extra.get("score").and_then(lenient_score))
    }

    /// Parsed creation time. Date-only values are taken as midnight UTC.
    pub fn added_at(&self) -> Option<DateTime<Utc>> {
        let text = self.date_added.as_deref()?;
        if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// Colour class of the card for this record, if the score has one.
    pub fn tier(&self) -> Option<ScoreTier> {
        self.rating().and_then(ScoreTier::for_score)
    }
}

impl<'de> Deserialize<'de> for GameRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            id: take(&mut fields, "id", Value::as_i64),
            title: take_text(&mut fields, "title"),
            platform: take_text(&mut fields, "platform"),
            score: take(&mut fields, "score", Value::as_i64),
            image_link: take_text(&mut fields, "imageLink"),
            reference_link: take_text(&mut fields, "referenceLink"),
            notes: take_text(&mut fields, "notes"),
            date_added: take_text(&mut fields, "dateAdded"),
            extra: fields,
        })
    }
}

fn take<T>(
    fields: &mut Map<String, Value>,
    key: &str,
    extract: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let value = fields.get(key).and_then(extract)?;
    fields.remove(key);
    Some(value)
}

fn take_text(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    take(fields, key, |value| value.as_str().map(str::to_string))
}

/// Creation payload collected from the add-game form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameDraft {
    /// Title as typed.
    pub title: String,
    /// Platform, may be blank.
    pub platform: String,
    /// Parsed score, see [`parse_score`].
    pub score: i64,
    /// Cover art link, may be blank.
    pub image_link: String,
    /// Reference link, may be blank.
    pub reference_link: String,
    /// Notes, may be blank.
    pub notes: String,
}

impl GameDraft {
    /// Check the draft against the creation rules.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.title.trim().is_empty() {
            return Err(RecordError::MissingTitle);
        }
        if !(MIN_SCORE..=MAX_SCORE).contains(&self.score) {
            return Err(RecordError::ScoreOutOfRange { score: self.score });
        }
        Ok(())
    }
}

/// Parse score text the way the form does: leading integer prefix, rest ignored.
///
/// A prefix too long for `i64` saturates, so it fails the range check
/// instead of reading as "not a number".
pub fn parse_score(input: &str) -> Result<i64, RecordError> {
    leading_integer(input).ok_or_else(|| RecordError::InvalidScore {
        input: input.to_string(),
    })
}

fn leading_integer(input: &str) -> Option<i64> {
    let digits = LEADING_INTEGER.captures(input)?.get(1)?.as_str();
    let saturated = if digits.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    };
    Some(digits.parse::<i64>().unwrap_or(saturated))
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Colour band used for cards and histogram bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoreTier {
    /// 10 to 39.
    Low,
    /// 40 to 59.
    MidLow,
    /// 60 to 74.
    Mid,
    /// 75 to 89.
    MidHigh,
    /// 90 to 100.
    High,
}

impl ScoreTier {
    /// Tier of a single card. Scores outside `[10, 100]` have none.
    pub fn for_score(score: i64) -> Option<Self> {
        match score {
            10..=39 => Some(Self::Low),
            40..=59 => Some(Self::MidLow),
            60..=74 => Some(Self::Mid),
            75..=89 => Some(Self::MidHigh),
            90..=100 => Some(Self::High),
            _ => None,
        }
    }

    /// Tier of a histogram bar, keyed by the first score of its bucket.
    pub fn for_bucket_start(start: i64) -> Self {
        match start {
            s if s >= 90 => Self::High,
            s if s >= 75 => Self::MidHigh,
            s if s >= 60 => Self::Mid,
            s if s >= 40 => Self::MidLow,
            _ => Self::Low,
        }
    }
}

fn lenient_score(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|value| value.is_finite())
                .map(|value| value.trunc() as i64)
        }),
        Value::String(text) => leading_integer(text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use chrono::TimeZone;
    use serde_json::json;

    fn draft(score: i64) -> GameDraft {
        GameDraft {
            title: "Outer Wilds".to_string(),
            platform: "PC".to_string(),
            score,
            ..GameDraft::default()
        }
    }

    #[test]
    fn validates_score_bounds() {
        assert!(draft(10).validate().is_ok());
        assert!(draft(100).validate().is_ok());
        assert_eq!(
            draft(9).validate(),
            Err(RecordError::ScoreOutOfRange { score: 9 })
        );
        assert_eq!(
            draft(101).validate(),
            Err(RecordError::ScoreOutOfRange { score: 101 })
        );
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut draft = draft(50);
        draft.title = "   ".to_string();
        assert_eq!(draft.validate(), Err(RecordError::MissingTitle));
    }

    #[test]
    fn parse_score_takes_leading_integer() {
        assert_eq!(parse_score("85"), Ok(85));
        assert_eq!(parse_score("  85abc"), Ok(85));
        assert_eq!(parse_score("-3"), Ok(-3));
        assert!(matches!(
            parse_score("abc"),
            Err(RecordError::InvalidScore { .. })
        ));
        assert!(parse_score("").is_err());
    }

    #[test]
    fn overflowing_score_text_is_out_of_range() -> Result<()> {
        let score = parse_score("100000000000000000000")?;
        assert_eq!(score, i64::MAX);
        assert_eq!(parse_score("-99999999999999999999"), Ok(i64::MIN));
        assert_eq!(
            draft(score).validate(),
            Err(RecordError::ScoreOutOfRange { score })
        );
        Ok(())
    }

    #[test]
    fn card_and_bar_tiers() {
        assert_eq!(ScoreTier::for_score(9), None);
        assert_eq!(ScoreTier::for_score(39), Some(ScoreTier::Low));
        assert_eq!(ScoreTier::for_score(74), Some(ScoreTier::Mid));
        assert_eq!(ScoreTier::for_score(75), Some(ScoreTier::MidHigh));
        assert_eq!(ScoreTier::for_score(100), Some(ScoreTier::High));
        assert_eq!(ScoreTier::for_score(101), None);

        assert_eq!(ScoreTier::for_bucket_start(0), ScoreTier::Low);
        assert_eq!(ScoreTier::for_bucket_start(40), ScoreTier::MidLow);
        assert_eq!(ScoreTier::for_bucket_start(70), ScoreTier::Mid);
        assert_eq!(ScoreTier::for_bucket_start(80), ScoreTier::MidHigh);
        assert_eq!(ScoreTier::for_bucket_start(90), ScoreTier::High);
    }

    #[test]
    fn record_from_draft_drops_blank_fields() {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut draft = draft(88);
        draft.notes = "  loved the ending ".to_string();
        let record = GameRecord::from_draft(7, draft, date);
        assert_eq!(record.platform.as_deref(), Some("PC"));
        assert_eq!(record.image_link, None);
        assert_eq!(record.notes.as_deref(), Some("loved the ending"));
        assert_eq!(record.added_at(), Some(date));
    }

    #[test]
    fn serializes_camel_case_with_millisecond_dates() -> Result<()> {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let record = GameRecord::from_draft(1714564800000, draft(90), date);
        let value = serde_json::to_value(&record)?;
        assert_eq!(
            value,
            json!({
                "id": 1714564800000_i64,
                "title": "Outer Wilds",
                "platform": "PC",
                "score": 90,
                "dateAdded": "2024-05-01T12:00:00.000Z"
            })
        );
        Ok(())
    }

    #[test]
    fn decodes_loose_records_and_keeps_unknown_fields() -> Result<()> {
        let record: GameRecord = serde_json::from_value(json!({
            "title": "Celeste",
            "score": "95",
            "imageLink": "",
            "rating_source": "friend"
        }))?;
        assert_eq!(record.id, None);
        assert_eq!(record.score, None);
        assert_eq!(record.rating(), Some(95));
        assert_eq!(record.image_link.as_deref(), Some(""));
        assert_eq!(record.extra.get("rating_source"), Some(&json!("friend")));

        let float: GameRecord = serde_json::from_value(json!({"score": 72.9}))?;
        assert_eq!(float.rating(), Some(72));
        assert_eq!(float.display_title(), "");

        let wordy: GameRecord = serde_json::from_value(json!({"score": "great"}))?;
        assert_eq!(wordy.rating(), None);
        assert_eq!(wordy.tier(), None);
        Ok(())
    }

    #[test]
    fn legacy_shapes_are_written_back_unchanged() -> Result<()> {
        let legacy = json!([
            {"title": "No score"},
            {"title": "Date", "score": 50, "dateAdded": "2024-05-01"},
            {"score": null},
            {"id": "1714564800000", "title": "Text id", "score": 61},
            {
                "title": "T",
                "score": 50,
                "platform": null,
                "dateAdded": "2024-05-01T12:00:00.123456+02:00"
            }
        ]);
        let records: Vec<GameRecord> = serde_json::from_value(legacy.clone())?;

        assert_eq!(records[0].rating(), None);
        assert_eq!(
            records[1].added_at(),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(records[2].rating(), None);
        assert_eq!(records[3].id, None);
        assert_eq!(records[3].rating(), Some(61));
        assert_eq!(records[4].platform, None);
        let noon_in_utc = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        assert_eq!(
            records[4].added_at(),
            Some(noon_in_utc + chrono::Duration::microseconds(123_456))
        );

        assert_eq!(serde_json::to_value(&records)?, legacy);
        Ok(())
    }

    #[test]
    fn non_object_entries_do_not_decode() {
        assert!(serde_json::from_value::<GameRecord>(json!(1)).is_err());
        assert!(serde_json::from_value::<GameRecord>(json!("x")).is_err());
    }
}
