//! # Visibility Search Core
//!
//! Shared, I/O-free logic for Visibility Search: the record model, the
//! filter predicate, relevance ranking, pagination, facet counts, and the
//! named preset store.
//!
//! Every engine function is a pure function of its inputs. The evaluation
//! timestamp used for date filtering and recency scoring is always passed
//! in by the caller. The only persisted state is the preset list, which
//! goes through the [`store::KeyValueStore`] trait supplied by the host.

pub mod error;
pub mod facets;
pub mod filter;
pub mod models;
pub mod paginate;
pub mod preset;
pub mod rank;
pub mod search;
pub mod store;
