//! Durable storage for the tracker state
//!
//! A `Storage` is a plain string key-value layer (file directory, SQLite
//! table, or an in-memory map in tests). `PersistedStore` sits on top and
//! owns the one fixed key together with the JSON encoding of the state.

pub(crate) mod file;
#[cfg(test)]
pub(crate) mod memory;
pub(crate) mod sqlite;

use log::{debug, warn};

use crate::consts::STORAGE_KEY;
use crate::core::TrackerState;
use crate::error::StoreError;

pub(crate) use file::FileStorage;
#[cfg(test)]
pub(crate) use memory::MemoryStorage;
pub(crate) use sqlite::SqliteStorage;

/// Key-value persistence backend
pub(crate) trait Storage {
    /// Human-readable location, used in diagnostics
    fn location(&self) -> String;

    /// `Ok(None)` when nothing is stored under `key`
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace whatever is stored under `key`
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

pub(crate) type BoxedStorage = Box<dyn Storage>;

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn location(&self) -> String {
        (**self).location()
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }
}

/// Reads and writes the whole `TrackerState` under `STORAGE_KEY`
pub(crate) struct PersistedStore<S> {
    storage: S,
}

impl<S: Storage> PersistedStore<S> {
    pub(crate) fn new(storage: S) -> Self {
        Self { storage }
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }

    #[cfg(test)]
    pub(crate) fn storage_mut_for_tests(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Never fails: absent, unreadable or malformed data yields the default state.
    pub(crate) fn load(&self) -> TrackerState {
        let raw = match self.storage.get_item(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No stored state at {}, starting fresh", self.storage.location());
                return TrackerState::default();
            }
            Err(e) => {
                warn!("Error loading data from storage: {e}; starting fresh");
                return TrackerState::default();
            }
        };

        match TrackerState::from_json(&raw) {
            Ok(state) => {
                debug!(
                    "Loaded {} entries from {}",
                    state.logs.len(),
                    self.storage.location()
                );
                state
            }
            Err(e) => {
                warn!(
                    "Error loading data from storage at {}: {e}; starting fresh",
                    self.storage.location()
                );
                TrackerState::default()
            }
        }
    }

    /// Serialize the full state and overwrite the stored value.
    pub(crate) fn save(&mut self, state: &TrackerState) -> Result<(), StoreError> {
        let json = state.to_json()?;
        self.storage.set_item(STORAGE_KEY, &json)?;
        debug!(
            "Saved {} entries to {}",
            state.logs.len(),
            self.storage.location()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogEntry;
    use crate::utils::Timezone;
    use chrono::{DateTime, Utc};

    fn sample_state() -> TrackerState {
        let mut state = TrackerState::default();
        for (i, text) in ["buy milk", "call mom", "  padded  "].iter().enumerate() {
            let now = format!("2026-10-18T12:00:0{i}.25Z")
                .parse::<DateTime<Utc>>()
                .unwrap();
            state.record(LogEntry::new(
                text.to_string(),
                now,
                Timezone::Named(chrono_tz::UTC),
            ));
        }
        state
    }

    fn store_with(raw: Option<&str>) -> PersistedStore<MemoryStorage> {
        let mut storage = MemoryStorage::default();
        if let Some(raw) = raw {
            storage.set_item(STORAGE_KEY, raw).unwrap();
        }
        PersistedStore::new(storage)
    }

    #[test]
    fn load_absent_key_is_default() {
        assert_eq!(store_with(None).load(), TrackerState::default());
    }

    #[test]
    fn save_then_load_round_trips() {
        let mut store = store_with(None);
        let state = sample_state();
        store.save(&state).unwrap();
        assert_eq!(store.load(), state);
    }

    #[test]
    fn save_overwrites_previous_value() {
        let mut store = store_with(None);
        store.save(&sample_state()).unwrap();
        store.save(&TrackerState::default()).unwrap();
        assert_eq!(
            store.storage().get_item(STORAGE_KEY).unwrap().as_deref(),
            Some(r#"{"counter":0,"logs":[]}"#)
        );
    }

    #[test]
    fn load_recovers_from_corruption() {
        for raw in [
            "{not json",
            "",
            "null",
            r#"{"counter":-3,"logs":[]}"#,
            r#"{"counter":2}"#,
            r#"{"logs":[{"timestamp":"2024-01-02T03:04:05.006Z","description":"x","displayDate":"d"}]}"#,
        ] {
            assert_eq!(store_with(Some(raw)).load(), TrackerState::default(), "{raw}");
        }
    }

    #[test]
    fn load_rejects_array_shaped_records() {
        for raw in [
            "[]",
            r#"[1,[{"timestamp":"2024-01-02T03:04:05.006Z","description":"x","displayDate":"d"}]]"#,
            r#"{"counter":1,"logs":[["2024-01-02T03:04:05.006Z","x","d"]]}"#,
        ] {
            assert_eq!(store_with(Some(raw)).load(), TrackerState::default(), "{raw}");
        }
    }

    #[test]
    fn load_then_save_is_stable_for_fine_timestamps() {
        let raw = r#"{"counter":1,"logs":[{"timestamp":"2024-01-02T03:04:05.123456Z","description":"x","displayDate":"d"}]}"#;
        let mut store = store_with(Some(raw));
        let loaded = store.load();
        assert_eq!(loaded.counter, 1);
        store.save(&loaded).unwrap();
        assert_eq!(store.load(), loaded);
    }

    #[test]
    fn load_recovers_from_read_error() {
        let mut storage = MemoryStorage::default();
        storage.fail_reads(true);
        let store = PersistedStore::new(storage);
        assert_eq!(store.load(), TrackerState::default());
    }

    #[test]
    fn save_propagates_write_error() {
        let mut storage = MemoryStorage::default();
        storage.fail_writes(true);
        let mut store = PersistedStore::new(storage);
        assert!(store.save(&sample_state()).is_err());
        assert_eq!(store.storage().get_item(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn boxed_storage_delegates() {
        let boxed: BoxedStorage = Box::new(MemoryStorage::default());
        let mut store = PersistedStore::new(boxed);
        let state = sample_state();
        store.save(&state).unwrap();
        assert_eq!(store.load(), state);
        assert_eq!(store.storage().location(), "memory");
    }
}
