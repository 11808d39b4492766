//! Facet counts for the current query and filters.
//!
//! Gives the per-kind, per-platform and per-sentiment breakdown a
//! dashboard shows beside each filter option. Counts cover the capped
//! match list, the same set `search` pages through.

use anyhow::Result;
use chrono::Utc;

use visibility_search_core::facets::{count_facets, FacetCounts};
use visibility_search_core::models::FilterState;
use visibility_search_core::search::{ranked_matches, SearchRequest};

use crate::config::Config;
use crate::dataset;
use crate::filters::warn_if_unmatchable;

pub fn facet_counts(config: &Config, query: &str, filters: &FilterState) -> Result<FacetCounts> {
    warn_if_unmatchable(filters);

    let records = dataset::load_records(&config.records.path)?;
    let req = SearchRequest::new(query, filters, Utc::now());
    let matches = ranked_matches(&records, &req);
    Ok(count_facets(matches.iter().take(config.results.max_results)))
}

/// Run the stats command: compute facet counts and print a summary.
pub fn run_stats(config: &Config, query: &str, filters: &FilterState, json: bool) -> Result<()> {
    let counts = facet_counts(config, query, filters)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    println!("Visibility Search — Facets");
    println!("==========================");
    println!();
    println!("  Matches:     {}", counts.total);

    if counts.total == 0 {
        return Ok(());
    }

    println!();
    println!("  By kind:");
    for (kind, n) in &counts.kinds {
        println!("    {:<14} {:>5}", kind.as_str(), n);
    }

    println!();
    println!("  By platform:");
    for (platform, n) in &counts.platforms {
        println!("    {:<14} {:>5}", platform, n);
    }
    if counts.without_platform > 0 {
        println!("    {:<14} {:>5}", "(none)", counts.without_platform);
    }

    println!();
    println!("  By sentiment:");
    for (sentiment, n) in &counts.sentiments {
        println!("    {:<14} {:>5}", sentiment.as_str(), n);
    }
    if counts.without_sentiment > 0 {
        println!("    {:<14} {:>5}", "(none)", counts.without_sentiment);
    }

    Ok(())
}
