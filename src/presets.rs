//! `vsearch preset` commands and preset replay for `search`.
//!
//! Presets live in the file-backed key-value store configured under
//! `[presets]`. Recoverable failures (unknown name, corrupt store) are
//! reported and the command carries on with nothing loaded.

use anyhow::Result;
use tracing::{debug, warn};

use visibility_search_core::error::PresetError;
use visibility_search_core::models::FilterState;
use visibility_search_core::preset::{Preset, PresetStore};

use crate::config::Config;
use crate::kv_file::FileKeyValueStore;

pub fn open_store(config: &Config) -> PresetStore<FileKeyValueStore> {
    let kv = FileKeyValueStore::new(&config.presets.path);
    debug!(path = %kv.path().display(), key = %config.presets.key, "opening preset store");
    PresetStore::with_key(kv, config.presets.key.clone())
}

/// Load a preset for replay, falling back to empty inputs if it can't be.
///
/// Empty inputs make the engine return nothing, which is the intended
/// outcome for a preset that no longer exists.
pub fn replay_preset(config: &Config, name: &str) -> Result<(String, FilterState)> {
    match open_store(config).load(name) {
        Ok(inputs) => Ok(inputs),
        Err(e) if e.is_recoverable() => {
            warn!(name, error = %e, "preset replay skipped");
            eprintln!("Warning: {}. Continuing with empty filters.", e);
            Ok((String::new(), FilterState::default()))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn run_save(config: &Config, name: &str, query: &str, filters: &FilterState) -> Result<()> {
    if let Err(e) = filters.validate() {
        eprintln!("Warning: {}. This preset will match no records.", e);
    }
    open_store(config).save(name, query, filters)?;
    println!("Saved preset '{}'.", name);
    Ok(())
}

pub fn run_show(config: &Config, name: &str) -> Result<()> {
    match open_store(config).load(name) {
        Ok((query, filters)) => {
            print_preset(&Preset {
                name: name.to_string(),
                query,
                filters,
            });
            Ok(())
        }
        Err(PresetError::NotFound { name }) => {
            println!("Preset '{}' not found.", name);
            Ok(())
        }
        Err(PresetError::StoreCorrupt { .. }) => {
            println!("No presets available.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn run_delete(config: &Config, name: &str) -> Result<()> {
    open_store(config).delete(name)?;
    println!("Deleted preset '{}'.", name);
    Ok(())
}

pub fn run_list(config: &Config) -> Result<()> {
    let presets = match open_store(config).list() {
        Ok(p) => p,
        Err(PresetError::StoreCorrupt { .. }) => Vec::new(),
        Err(e) => return Err(e.into()),
    };

    if presets.is_empty() {
        println!("No presets available.");
        return Ok(());
    }

    for preset in &presets {
        print_preset(preset);
        println!();
    }
    Ok(())
}

fn print_preset(preset: &Preset) {
    let f = &preset.filters;
    println!("--- Preset: {} ---", preset.name);
    println!("query:      {}", display_or(&preset.query, "(none)"));
    println!("kinds:      {}", join_or_any(f.kinds.iter().map(|k| k.to_string())));
    println!("platforms:  {}", join_or_any(f.platforms.iter().cloned()));
    println!("sentiments: {}", join_or_any(f.sentiments.iter().map(|s| s.to_string())));
    println!(
        "dates:      {} .. {}",
        f.date_range
            .start
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "*".to_string()),
        f.date_range
            .end
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "*".to_string()),
    );
    println!("score:      {} .. {}", f.score_range.min, f.score_range.max);
}

fn display_or<'a>(s: &'a str, fallback: &'a str) -> &'a str {
    if s.trim().is_empty() {
        fallback
    } else {
        s
    }
}

fn join_or_any(values: impl Iterator<Item = String>) -> String {
    let joined = values.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        "(any)".to_string()
    } else {
        joined
    }
}
