use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::info;

use visibility_search_core::models::{FilterState, RankedRecord, TitleMatch};
use visibility_search_core::paginate::PageRequest;
use visibility_search_core::search::{search, SearchPage, SearchRequest};

use crate::config::Config;
use crate::dataset;
use crate::filters::warn_if_unmatchable;

/// Output and paging options for a single `search` invocation.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// 1-based page index.
    pub page: usize,
    /// Overrides `results.page_size` from config.
    pub page_size: Option<usize>,
    pub explain: bool,
    pub json: bool,
}

/// Load the configured records and run the engine once.
///
/// Used by the CLI; `now` is sampled once by the caller for the whole pass.
pub fn search_records(
    config: &Config,
    query: &str,
    filters: &FilterState,
    opts: &SearchOptions,
    now: DateTime<Utc>,
) -> Result<SearchPage> {
    warn_if_unmatchable(filters);

    let records = dataset::load_records(&config.records.path)?;
    let req = SearchRequest {
        query,
        filters,
        page: PageRequest {
            page: opts.page,
            page_size: opts.page_size.unwrap_or(config.results.page_size),
            max_results: config.results.max_results,
        },
        now,
        explain: opts.explain,
    };
    let page = search(&records, &req);
    info!(
        total_matches = page.total_matches,
        page = page.page,
        returned = page.items.len(),
        "search complete"
    );
    Ok(page)
}

pub fn run_search(
    config: &Config,
    query: &str,
    filters: &FilterState,
    opts: &SearchOptions,
) -> Result<()> {
    let page = search_records(config, query, filters, opts, Utc::now())?;

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    if page.total_matches == 0 {
        println!("No results.");
        return Ok(());
    }
    if page.items.is_empty() {
        println!(
            "No results on page {} (of {}).",
            page.page, page.total_pages
        );
        return Ok(());
    }

    let first = (page.page - 1) * page.page_size + 1;
    println!(
        "Showing {}-{} of {} matches (page {}/{})",
        first,
        first + page.items.len() - 1,
        page.total_matches,
        page.page,
        page.total_pages
    );
    println!();

    for (i, result) in page.items.iter().enumerate() {
        print_result(first + i, result);
    }

    Ok(())
}

fn print_result(position: usize, result: &RankedRecord) {
    let r = &result.record;
    match result.relevance {
        Some(relevance) => println!("{}. [{:.2}] {} / {}", position, relevance, r.kind, r.title),
        None => println!("{}. {} / {}", position, r.kind, r.title),
    }
    if let Some(ref platform) = r.platform {
        println!("    platform: {}", platform);
    }
    if let Some(sentiment) = r.sentiment {
        println!("    sentiment: {}", sentiment);
    }
    if let Some(date) = r.date {
        println!("    date: {}", date.format("%Y-%m-%d"));
    }
    if let Some(score) = r.score {
        println!("    score: {}", score);
    }
    if let Some(explain) = result.explain {
        let title = match explain.title_match {
            TitleMatch::Exact => "exact",
            TitleMatch::Prefix => "prefix",
            TitleMatch::Contains => "contains",
            TitleMatch::None => "none",
        };
        println!(
            "    relevance: title={}(+{}) body=+{} recency=+{}",
            title, explain.title_bonus, explain.body_bonus, explain.recency_bonus
        );
    }
    let excerpt: String = r.body.chars().take(160).collect();
    if !excerpt.trim().is_empty() {
        println!("    excerpt: \"{}\"", excerpt.replace('\n', " ").trim());
    }
    if let Some(ref id) = r.id {
        println!("    id: {}", id);
    }
    println!();
}
