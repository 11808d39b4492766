//! Result capping and page slicing.
//!
//! The full match list is first truncated to the result cap, then sliced
//! into 1-based pages. The engine keeps no page position between calls;
//! callers reset to page 1 whenever the query or filters change.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_MAX_RESULTS: usize = 50;

/// One page of results plus the totals a pager needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Matches after the cap, before slicing.
    pub total_matches: usize,
    pub total_pages: usize,
    pub page: usize,
    pub page_size: usize,
}

/// Pagination parameters. A zero page or page size is treated as 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
    pub max_results: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Cap `items` to `req.max_results`, then return the requested page.
///
/// A page past the end yields an empty `items` vector, not an error.
pub fn paginate<T>(mut items: Vec<T>, req: PageRequest) -> Page<T> {
    let page = req.page.max(1);
    let page_size = req.page_size.max(1);

    items.truncate(req.max_results);
    let total_matches = items.len();
    let total_pages = total_matches.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size);
    let items: Vec<T> = if start >= total_matches {
        Vec::new()
    } else {
        let end = start.saturating_add(page_size).min(total_matches);
        items.drain(start..end).collect()
    };

    Page {
        items,
        total_matches,
        total_pages,
        page,
        page_size,
    }
}
