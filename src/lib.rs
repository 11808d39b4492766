//! # Visibility Search
//!
//! Ranking and filter engine for brand-visibility content (mentions,
//! keywords, competitors, insights, reports), with named search presets.
//!
//! The engine itself lives in [`visibility_search_core`] and is a pure
//! function over an explicit record list. This crate wraps it in the
//! `vsearch` CLI: configuration, dataset loading, and a file-backed
//! key-value store for presets.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────────────┐
//! │ records.json │──▶│ filter ─▶ rank ─▶ cap/page   │──▶ CLI output
//! └──────────────┘   └──────────────▲───────────────┘
//!                                   │ (query, filters)
//!                    ┌──────────────┴───────────────┐
//!                    │ PresetStore ─▶ presets.json  │
//!                    └──────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! vsearch search "acme" --sentiment negative --since 2024-01-01
//! vsearch preset save complaints "acme" --sentiment negative
//! vsearch search --preset complaints --page 2
//! vsearch stats --kind mention
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`dataset`] | Record list loading |
//! | [`filters`] | Filter command-line flags |
//! | [`kv_file`] | File-backed key-value store |
//! | [`presets`] | Preset commands and replay |
//! | [`search`] | Search command |
//! | [`stats`] | Facet counts |

pub mod config;
pub mod dataset;
pub mod filters;
pub mod kv_file;
pub mod presets;
pub mod search;
pub mod stats;
