//! Facet counts over a result set.
//!
//! Dashboards show a count next to each filter option. Counts are taken
//! over the capped match list, so they agree with `total_matches`.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{RankedRecord, RecordKind, Sentiment};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacetCounts {
    pub total: usize,
    pub kinds: BTreeMap<RecordKind, usize>,
    pub platforms: BTreeMap<String, usize>,
    pub sentiments: BTreeMap<Sentiment, usize>,
    /// Records with no platform.
    pub without_platform: usize,
    /// Records with no sentiment.
    pub without_sentiment: usize,
}

pub fn count_facets<'a, I>(records: I) -> FacetCounts
where
    I: IntoIterator<Item = &'a RankedRecord>,
{
    let mut counts = FacetCounts::default();
    for ranked in records {
        let r = &ranked.record;
        counts.total += 1;
        *counts.kinds.entry(r.kind).or_default() += 1;
        match &r.platform {
            Some(p) => *counts.platforms.entry(p.clone()).or_default() += 1,
            None => counts.without_platform += 1,
        }
        match r.sentiment {
            Some(s) => *counts.sentiments.entry(s).or_default() += 1,
            None => counts.without_sentiment += 1,
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;

    fn ranked(kind: RecordKind, platform: Option<&str>, sentiment: Option<Sentiment>) -> RankedRecord {
        let mut record = Record::new(kind, "t", "");
        record.platform = platform.map(str::to_string);
        record.sentiment = sentiment;
        RankedRecord {
            record,
            relevance: None,
            explain: None,
        }
    }

    #[test]
    fn counts_each_facet() {
        let rs = vec![
            ranked(RecordKind::Mention, Some("reddit"), Some(Sentiment::Negative)),
            ranked(RecordKind::Mention, Some("x"), None),
            ranked(RecordKind::Report, None, Some(Sentiment::Negative)),
        ];
        let c = count_facets(&rs);
        assert_eq!(c.total, 3);
        assert_eq!(c.kinds[&RecordKind::Mention], 2);
        assert_eq!(c.kinds[&RecordKind::Report], 1);
        assert_eq!(c.platforms["reddit"], 1);
        assert_eq!(c.without_platform, 1);
        assert_eq!(c.sentiments[&Sentiment::Negative], 2);
        assert_eq!(c.without_sentiment, 1);
    }

    #[test]
    fn empty_input_counts_nothing() {
        assert_eq!(count_facets(&Vec::<RankedRecord>::new()), FacetCounts::default());
    }
}
