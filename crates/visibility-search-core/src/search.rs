//! The ranking and filter engine.
//!
//! [`search`] is a pure function over an explicit record list and a
//! [`SearchRequest`]. Every call recomputes from scratch; nothing is
//! indexed or cached between calls.
//!
//! # Pipeline
//!
//! 1. Short-circuit to an empty page when nothing is constrained
//!    (blank query and unrestricted filters) or the filters can never
//!    match (an inverted interval or a non-finite score bound).
//! 2. Keep records passing the [`Predicate`].
//! 3. Rank by relevance when the query is non-empty (stable).
//! 4. Cap to `max_results`, then slice the requested page.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::filter::Predicate;
use crate::models::{FilterState, RankedRecord, Record};
use crate::paginate::{paginate, Page, PageRequest};
use crate::rank;

pub type SearchPage = Page<RankedRecord>;

/// Bundles all inputs for a single engine invocation.
#[derive(Debug, Clone)]
pub struct SearchRequest<'a> {
    /// Free-text query. Blank means "no text constraint".
    pub query: &'a str,
    pub filters: &'a FilterState,
    pub page: PageRequest,
    /// Evaluation timestamp for date defaults and recency scoring.
    pub now: DateTime<Utc>,
    /// If true, populate the relevance breakdown on each result.
    pub explain: bool,
}

impl<'a> SearchRequest<'a> {
    pub fn new(query: &'a str, filters: &'a FilterState, now: DateTime<Utc>) -> Self {
        Self {
            query,
            filters,
            page: PageRequest::default(),
            now,
            explain: false,
        }
    }

    /// Whether the request constrains the record set at all.
    pub fn has_constraints(&self) -> bool {
        !self.query.trim().is_empty() || !self.filters.is_unrestricted()
    }
}

/// All matches for `req`, ranked, before capping and pagination.
///
/// Returns an empty list when the request has no active constraints or
/// [`FilterState::validate`] rejects its filters. An invalid date or score
/// interval drops records lacking that field too, so the outcome is
/// "no records" either way.
pub fn ranked_matches(records: &[Record], req: &SearchRequest<'_>) -> Vec<RankedRecord> {
    if !req.has_constraints() {
        debug!("no active constraints, returning empty result set");
        return Vec::new();
    }
    if let Err(e) = req.filters.validate() {
        debug!(error = %e, "filters can never match, returning empty result set");
        return Vec::new();
    }

    let predicate = Predicate::new(req.query, req.filters, req.now);
    let matched: Vec<Record> = records
        .iter()
        .filter(|r| predicate.matches(r))
        .cloned()
        .collect();

    debug!(
        candidates = records.len(),
        matched = matched.len(),
        "filter pass complete"
    );

    rank::rank(matched, req.query, req.now, req.explain)
}

/// Run the engine and return the requested page.
pub fn search(records: &[Record], req: &SearchRequest<'_>) -> SearchPage {
    paginate(ranked_matches(records, req), req.page)
}
