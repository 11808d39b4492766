//! Relevance scoring for query-driven ordering.
//!
//! # Scoring
//!
//! Points accumulate across rules:
//!
//! | Rule | Points |
//! |------|--------|
//! | title equals query | 100 |
//! | else title starts with query | 50 |
//! | else title contains query | 25 |
//! | body contains query | 10 |
//! | recency (`10 - age_in_days`, clamped to `[0, 10]`) | 0–10 |
//!
//! All comparisons are case-insensitive. Relevance is used only for
//! ordering; it never removes a record from the result set.

use chrono::{DateTime, Utc};

use crate::models::{RankedRecord, Record, RelevanceBreakdown, TitleMatch};

pub const EXACT_TITLE_POINTS: f64 = 100.0;
pub const PREFIX_TITLE_POINTS: f64 = 50.0;
pub const CONTAINS_TITLE_POINTS: f64 = 25.0;
pub const BODY_POINTS: f64 = 10.0;
/// Recency bonus for a record dated on the evaluation day.
pub const MAX_RECENCY_POINTS: i64 = 10;

impl RelevanceBreakdown {
    pub fn total(&self) -> f64 {
        self.title_bonus + self.body_bonus + self.recency_bonus
    }
}

/// Score `record` against an already lower-cased, non-empty query.
pub fn score(record: &Record, query_lower: &str, now: DateTime<Utc>) -> RelevanceBreakdown {
    let title = record.title.to_lowercase();
    let (title_match, title_bonus) = if title == query_lower {
        (TitleMatch::Exact, EXACT_TITLE_POINTS)
    } else if title.starts_with(query_lower) {
        (TitleMatch::Prefix, PREFIX_TITLE_POINTS)
    } else if title.contains(query_lower) {
        (TitleMatch::Contains, CONTAINS_TITLE_POINTS)
    } else {
        (TitleMatch::None, 0.0)
    };

    let body_bonus = if record.body.to_lowercase().contains(query_lower) {
        BODY_POINTS
    } else {
        0.0
    };

    RelevanceBreakdown {
        title_match,
        title_bonus,
        body_bonus,
        recency_bonus: recency_bonus(record.date, now),
    }
}

/// Linear recency bonus: full points same day, zero at ten days or older.
///
/// Future dates have a negative age and clamp to the maximum.
pub fn recency_bonus(date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    match date {
        Some(date) => {
            let age_days = (now - date).num_days();
            (MAX_RECENCY_POINTS - age_days).clamp(0, MAX_RECENCY_POINTS) as f64
        }
        None => 0.0,
    }
}

/// Attach relevance to each record and sort by it, descending.
///
/// The sort is stable: records with equal relevance keep their input order.
/// With a blank query no relevance is computed and the input order is kept.
pub fn rank(
    records: Vec<Record>,
    query: &str,
    now: DateTime<Utc>,
    explain: bool,
) -> Vec<RankedRecord> {
    let query_lower = query.trim().to_lowercase();
    if query_lower.is_empty() {
        return records
            .into_iter()
            .map(|record| RankedRecord {
                record,
                relevance: None,
                explain: None,
            })
            .collect();
    }

    let mut ranked: Vec<RankedRecord> = records
        .into_iter()
        .map(|record| {
            let breakdown = score(&record, &query_lower, now);
            RankedRecord {
                record,
                relevance: Some(breakdown.total()),
                explain: explain.then_some(breakdown),
            }
        })
        .collect();

    // `sort_by` is stable, which the tie-break on input order relies on.
    ranked.sort_by(|a, b| {
        let a = a.relevance.unwrap_or(0.0);
        let b = b.relevance.unwrap_or(0.0);
        b.partial_cmp(&a).unwrap_or(std::cmp::Ordering::Equal)
    });

    ranked
}
