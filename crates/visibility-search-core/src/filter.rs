//! Record filter predicate.
//!
//! A record is kept iff every individual check passes: text, kind,
//! platform, sentiment, date, and score. Records that lack an optional
//! attribute (platform, sentiment, date, score) always pass that check.
//!
//! The evaluation timestamp `now` is captured once by the caller and used
//! for every record of a pass, so a single pass is deterministic.

use chrono::{DateTime, Utc};

use crate::models::{FilterState, Record};

/// Query and filters prepared once for a whole evaluation pass.
#[derive(Debug, Clone)]
pub struct Predicate<'a> {
    query_lower: String,
    filters: &'a FilterState,
    now: DateTime<Utc>,
}

impl<'a> Predicate<'a> {
    pub fn new(query: &str, filters: &'a FilterState, now: DateTime<Utc>) -> Self {
        Self {
            query_lower: query.trim().to_lowercase(),
            filters,
            now,
        }
    }

    /// Whether `record` satisfies the query and every filter.
    pub fn matches(&self, record: &Record) -> bool {
        self.text_matches(record)
            && self.kind_matches(record)
            && self.platform_matches(record)
            && self.sentiment_matches(record)
            && self.date_matches(record)
            && self.score_matches(record)
    }

    fn text_matches(&self, record: &Record) -> bool {
        self.query_lower.is_empty()
            || record.title.to_lowercase().contains(&self.query_lower)
            || record.body.to_lowercase().contains(&self.query_lower)
    }

    fn kind_matches(&self, record: &Record) -> bool {
        self.filters.kinds.is_empty() || self.filters.kinds.contains(&record.kind)
    }

    fn platform_matches(&self, record: &Record) -> bool {
        match &record.platform {
            Some(p) => self.filters.platforms.is_empty() || self.filters.platforms.contains(p),
            None => true,
        }
    }

    fn sentiment_matches(&self, record: &Record) -> bool {
        match record.sentiment {
            Some(s) => self.filters.sentiments.is_empty() || self.filters.sentiments.contains(&s),
            None => true,
        }
    }

    fn date_matches(&self, record: &Record) -> bool {
        let range = &self.filters.date_range;
        if range.is_unbounded() {
            return true;
        }
        let Some(date) = record.date else {
            return true;
        };
        let start = range.start.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        let end = range.end.unwrap_or(self.now);
        start <= date && date <= end
    }

    fn score_matches(&self, record: &Record) -> bool {
        record
            .score
            .map_or(true, |score| self.filters.score_range.contains(score))
    }
}
