//! Core data models for the ranking and filter engine.
//!
//! These types describe the content records being searched, the caller's
//! filter constraints, and the ranked results handed back to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{FilterError, ParseValueError};

/// The closed set of content kinds a record can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Mention,
    Keyword,
    Competitor,
    Insight,
    Report,
}

impl RecordKind {
    pub const ALL: [RecordKind; 5] = [
        RecordKind::Mention,
        RecordKind::Keyword,
        RecordKind::Competitor,
        RecordKind::Insight,
        RecordKind::Report,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Mention => "mention",
            RecordKind::Keyword => "keyword",
            RecordKind::Competitor => "competitor",
            RecordKind::Insight => "insight",
            RecordKind::Report => "report",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseValueError::new("kind", s))
    }
}

/// Sentiment label attached to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sentiment::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseValueError::new("sentiment", s))
    }
}

/// A searchable content item.
///
/// `id` and `extras` are carried through to results untouched; the filter
/// and ranking logic only look at the typed fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub kind: RecordKind,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Numeric score, 0–100 by convention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Free-form metadata. Opaque to the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<serde_json::Map<String, serde_json::Value>>,
}

impl Record {
    /// Minimal record with just the required fields set.
    pub fn new(kind: RecordKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: None,
            kind,
            title: title.into(),
            body: body.into(),
            platform: None,
            sentiment: None,
            date: None,
            score: None,
            extras: None,
        }
    }
}

/// Inclusive date interval. A missing bound is open-ended.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// True when both bounds are set and `start` is after `end`.
    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(s), Some(e)) if s > e)
    }
}

pub const SCORE_FLOOR: f64 = 0.0;
pub const SCORE_CEILING: f64 = 100.0;

/// Inclusive score interval, `[0, 100]` by default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    #[serde(default = "default_score_min")]
    pub min: f64,
    #[serde(default = "default_score_max")]
    pub max: f64,
}

fn default_score_min() -> f64 {
    SCORE_FLOOR
}
fn default_score_max() -> f64 {
    SCORE_CEILING
}

impl Default for ScoreRange {
    fn default() -> Self {
        Self {
            min: SCORE_FLOOR,
            max: SCORE_CEILING,
        }
    }
}

impl ScoreRange {
    /// Whether the interval narrows the conventional `[0, 100]` range.
    /// NaN bounds count as restrictive since they admit no score.
    pub fn is_restrictive(&self) -> bool {
        !(self.min <= SCORE_FLOOR && self.max >= SCORE_CEILING)
    }

    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    pub fn contains(&self, score: f64) -> bool {
        self.min <= score && score <= self.max
    }
}

/// The caller's active inclusion constraints.
///
/// An empty allow-set means "no restriction" for that attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub kinds: BTreeSet<RecordKind>,
    #[serde(default)]
    pub platforms: BTreeSet<String>,
    #[serde(default)]
    pub sentiments: BTreeSet<Sentiment>,
    #[serde(default)]
    pub date_range: DateRange,
    #[serde(default)]
    pub score_range: ScoreRange,
}

impl FilterState {
    /// True when no constraint narrows the record set at all.
    pub fn is_unrestricted(&self) -> bool {
        self.kinds.is_empty()
            && self.platforms.is_empty()
            && self.sentiments.is_empty()
            && self.date_range.is_unbounded()
            && !self.score_range.is_restrictive()
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        if let (Some(start), Some(end)) = (self.date_range.start, self.date_range.end) {
            if start > end {
                return Err(FilterError::InvalidDateInterval { start, end });
            }
        }
        if !self.score_range.is_finite() {
            return Err(FilterError::NonFiniteScoreBound {
                min: self.score_range.min,
                max: self.score_range.max,
            });
        }
        if self.score_range.min > self.score_range.max {
            return Err(FilterError::InvalidScoreInterval {
                min: self.score_range.min,
                max: self.score_range.max,
            });
        }
        Ok(())
    }
}

/// Per-component view of how a relevance number was reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RelevanceBreakdown {
    pub title_match: TitleMatch,
    pub title_bonus: f64,
    pub body_bonus: f64,
    pub recency_bonus: f64,
}

/// Strongest way the title matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TitleMatch {
    Exact,
    Prefix,
    Contains,
    None,
}

/// A matching record, with its relevance when a query was supplied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRecord {
    #[serde(flatten)]
    pub record: Record,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explain: Option<RelevanceBreakdown>,
}
