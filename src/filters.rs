//! Command-line filter flags shared by `search`, `stats`, and `preset save`.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::Args;
use tracing::warn;

use visibility_search_core::models::{DateRange, FilterState, RecordKind, ScoreRange, Sentiment};

#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only include these kinds (mention, keyword, competitor, insight, report).
    /// Repeat the flag to allow several.
    #[arg(long = "kind")]
    pub kinds: Vec<RecordKind>,

    /// Only include these platforms. Records without a platform always pass.
    #[arg(long = "platform")]
    pub platforms: Vec<String>,

    /// Only include these sentiments (positive, neutral, negative).
    /// Records without a sentiment always pass.
    #[arg(long = "sentiment")]
    pub sentiments: Vec<Sentiment>,

    /// Only include records dated on or after this day (YYYY-MM-DD).
    #[arg(long)]
    pub since: Option<String>,

    /// Only include records dated on or before this day (YYYY-MM-DD).
    #[arg(long)]
    pub until: Option<String>,

    /// Minimum record score, inclusive.
    #[arg(long)]
    pub min_score: Option<f64>,

    /// Maximum record score, inclusive.
    #[arg(long)]
    pub max_score: Option<f64>,
}

impl FilterArgs {
    pub fn to_filter_state(&self) -> Result<FilterState> {
        let defaults = ScoreRange::default();
        for (flag, bound) in [("--min-score", self.min_score), ("--max-score", self.max_score)] {
            if let Some(value) = bound.filter(|v| !v.is_finite()) {
                bail!("Invalid {} '{}', expected a finite number", flag, value);
            }
        }
        Ok(FilterState {
            kinds: self.kinds.iter().copied().collect(),
            platforms: self.platforms.iter().cloned().collect(),
            sentiments: self.sentiments.iter().copied().collect(),
            date_range: DateRange {
                start: self.since.as_deref().map(start_of_day).transpose()?,
                end: self.until.as_deref().map(end_of_day).transpose()?,
            },
            score_range: ScoreRange {
                min: self.min_score.unwrap_or(defaults.min),
                max: self.max_score.unwrap_or(defaults.max),
            },
        })
    }
}

/// Tell the user when `filters` can never match anything.
///
/// The engine still runs and returns an empty result; this only makes
/// the reason visible.
pub fn warn_if_unmatchable(filters: &FilterState) {
    if let Err(e) = filters.validate() {
        warn!(error = %e, "filters can never match");
        eprintln!("Warning: {}. No records can match.", e);
    }
}

fn parse_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

fn start_of_day(s: &str) -> Result<DateTime<Utc>> {
    Ok(parse_day(s)?
        .and_hms_opt(0, 0, 0)
        .with_context(|| format!("Invalid start of day for {}", s))?
        .and_utc())
}

fn end_of_day(s: &str) -> Result<DateTime<Utc>> {
    Ok(parse_day(s)?
        .and_hms_opt(23, 59, 59)
        .with_context(|| format!("Invalid end of day for {}", s))?
        .and_utc())
}
