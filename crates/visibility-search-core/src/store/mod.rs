//! Key-value storage abstraction for persisted engine state.
//!
//! The [`KeyValueStore`] trait is the only I/O seam in the core crate. The
//! preset store serializes its whole preset list under a single key, so a
//! backend only needs string `get`/`set`/`remove`.
//!
//! Implementations must be `Send + Sync` so a store can be shared by
//! reference across threads; the preset store serializes its own writes.

pub mod memory;

use anyhow::Result;

/// Abstract string key-value backend.
///
/// | Method | Purpose |
/// |--------|---------|
/// | [`get`](KeyValueStore::get) | Read a value, `None` when the key is absent |
/// | [`set`](KeyValueStore::set) | Insert or overwrite a value |
/// | [`remove`](KeyValueStore::remove) | Delete a key; absent keys are a no-op |
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
