//! Named presets: persisted `(query, filters)` snapshots.
//!
//! The whole preset list is stored as one JSON array under a single key of
//! an injected [`KeyValueStore`]. Presets are opaque to the engine; loading
//! one just hands back the inputs that were saved.
//!
//! Corrupt persisted data is never partially trusted. It is logged and
//! removed, and the store behaves as empty from then on.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::error::PresetError;
use crate::models::FilterState;
use crate::store::KeyValueStore;

/// Key under which the preset list is stored by default.
pub const PRESETS_KEY: &str = "search_presets";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub filters: FilterState,
}

/// Preset CRUD over a key-value backend.
///
/// `save` and `delete` are read-modify-write cycles; they are serialized
/// by an internal mutex so concurrent upserts never lose updates.
pub struct PresetStore<S> {
    kv: S,
    key: String,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> PresetStore<S> {
    pub fn new(kv: S) -> Self {
        Self::with_key(kv, PRESETS_KEY)
    }

    pub fn with_key(kv: S, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// All presets in insertion order.
    ///
    /// Returns [`PresetError::StoreCorrupt`] once if the persisted data
    /// doesn't parse; the bad payload is discarded at that point.
    pub fn list(&self) -> Result<Vec<Preset>, PresetError> {
        self.read_all()
    }

    /// Insert a preset, or replace the one with the same name in place.
    pub fn save(&self, name: &str, query: &str, filters: &FilterState) -> Result<(), PresetError> {
        if name.trim().is_empty() {
            return Err(PresetError::InvalidName);
        }
        let _guard = self.lock()?;

        let mut presets = self.read_all_locked()?;
        let preset = Preset {
            name: name.to_string(),
            query: query.to_string(),
            filters: filters.clone(),
        };
        match presets.iter_mut().find(|p| p.name == name) {
            Some(existing) => {
                debug!(name, "replacing preset");
                *existing = preset;
            }
            None => {
                debug!(name, "adding preset");
                presets.push(preset);
            }
        }
        self.write_all(&presets)
    }

    /// The saved `(query, filters)` for `name`.
    pub fn load(&self, name: &str) -> Result<(String, FilterState), PresetError> {
        self.read_all()?
            .into_iter()
            .find(|p| p.name == name)
            .map(|p| (p.query, p.filters))
            .ok_or_else(|| PresetError::not_found(name))
    }

    /// Remove the preset called `name`. Unknown names are a no-op.
    pub fn delete(&self, name: &str) -> Result<(), PresetError> {
        let _guard = self.lock()?;

        let mut presets = self.read_all_locked()?;
        let before = presets.len();
        presets.retain(|p| p.name != name);
        if presets.len() == before {
            debug!(name, "delete of unknown preset ignored");
            return Ok(());
        }
        self.write_all(&presets)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, PresetError> {
        self.write_lock
            .lock()
            .map_err(|_| PresetError::Backend(anyhow::anyhow!("preset store lock poisoned")))
    }

    /// Read for `list`/`load`, which don't hold the write lock.
    fn read_all(&self) -> Result<Vec<Preset>, PresetError> {
        let Some(raw) = self.kv.get(&self.key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Preset>>(&raw) {
            Ok(presets) => Ok(presets),
            Err(e) => {
                let _guard = self.lock()?;
                self.discard_if_unchanged(&raw, &e)?;
                Err(PresetError::store_corrupt(e.to_string()))
            }
        }
    }

    /// Read for `save`/`delete`; the caller holds the write lock. A corrupt
    /// store reads as empty.
    fn read_all_locked(&self) -> Result<Vec<Preset>, PresetError> {
        let Some(raw) = self.kv.get(&self.key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Preset>>(&raw) {
            Ok(presets) => Ok(presets),
            Err(e) => {
                self.discard_if_unchanged(&raw, &e)?;
                Ok(Vec::new())
            }
        }
    }

    /// Remove the stored payload only if it is still the corrupt `raw` that
    /// was read. Must be called with the write lock held.
    fn discard_if_unchanged(&self, raw: &str, error: &serde_json::Error) -> Result<(), PresetError> {
        if self.kv.get(&self.key)?.as_deref() == Some(raw) {
            warn!(key = %self.key, error = %error, "discarding corrupt preset data");
            self.kv.remove(&self.key)?;
        } else {
            debug!(key = %self.key, "preset data replaced since read, not discarding");
        }
        Ok(())
    }

    fn write_all(&self, presets: &[Preset]) -> Result<(), PresetError> {
        let json = serde_json::to_string(presets).map_err(anyhow::Error::from)?;
        self.kv.set(&self.key, &json)?;
        Ok(())
    }
}
