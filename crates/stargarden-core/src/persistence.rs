//! Save/Load — one JSON blob in a key-value store, gated by consent.
//!
//! The store is the browser-local-storage analog: string keys to string
//! values, abstracted behind [`KvStore`] so the engine and tests can run
//! against an in-memory map. A save is only ever written while consent is
//! accepted; decline means in-memory play only. Corrupt or missing blobs fall
//! back to a fresh game rather than surfacing a hard error.

use std::collections::HashMap;
use std::fmt;

use crate::state::{GameState, GAME_VERSION};

/// Key holding the whole game-state blob.
pub const SAVE_KEY: &str = "stargarden_save";
/// Key holding the persistence-consent flag, separate from the save itself.
pub const CONSENT_KEY: &str = "stargarden_consent";

/// Minimal string key-value store.
pub trait KvStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SaveError>;
    fn remove(&mut self, key: &str);
}

/// In-memory store for tests, the simtest harness, and consent-declined play.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// Whether the player has allowed persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsentState {
    #[default]
    Unset,
    Accepted,
    Declined,
}

impl ConsentState {
    fn as_str(&self) -> &'static str {
        match self {
            ConsentState::Unset => "unset",
            ConsentState::Accepted => "accepted",
            ConsentState::Declined => "declined",
        }
    }
}

/// Read the stored consent flag; anything unrecognized counts as unset.
pub fn load_consent(store: &dyn KvStore) -> ConsentState {
    match store.get(CONSENT_KEY).as_deref() {
        Some("accepted") => ConsentState::Accepted,
        Some("declined") => ConsentState::Declined,
        _ => ConsentState::Unset,
    }
}

pub fn store_consent(store: &mut dyn KvStore, consent: ConsentState) -> Result<(), SaveError> {
    store.set(CONSENT_KEY, consent.as_str())
}

/// Serialize the whole state under [`SAVE_KEY`]. Returns `Ok(false)` without
/// touching the store when consent is not accepted.
pub fn save_game(
    store: &mut dyn KvStore,
    state: &GameState,
    consent: ConsentState,
) -> Result<bool, SaveError> {
    if consent != ConsentState::Accepted {
        log::debug!("save skipped: consent is {:?}", consent);
        return Ok(false);
    }
    let blob = serde_json::to_string(state)?;
    store.set(SAVE_KEY, &blob)?;
    log::debug!("game saved ({} bytes)", blob.len());
    Ok(true)
}

/// Load the saved state, if any. Missing key or malformed JSON both yield
/// `None` (the caller starts a fresh game). A version mismatch is logged and
/// the blob is used as-is — no migration transform exists.
pub fn load_game(store: &dyn KvStore) -> Option<GameState> {
    let blob = store.get(SAVE_KEY)?;
    match serde_json::from_str::<GameState>(&blob) {
        Ok(mut state) => {
            state.normalize();
            if state.version != GAME_VERSION {
                log::warn!(
                    "save version mismatch: found {}, current {}",
                    state.version,
                    GAME_VERSION
                );
            }
            Some(state)
        }
        Err(err) => {
            log::warn!("failed to parse saved game, starting fresh: {}", err);
            None
        }
    }
}

/// Drop the save blob entirely (the reset-game action). Consent is kept.
pub fn clear_save(store: &mut dyn KvStore) {
    store.remove(SAVE_KEY);
}

/// Errors from the store itself or from serialization.
#[derive(Debug)]
pub enum SaveError {
    Store(String),
    Json(serde_json::Error),
}

impl From<serde_json::Error> for SaveError {
    fn from(e: serde_json::Error) -> Self {
        SaveError::Json(e)
    }
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Store(msg) => write!(f, "store error: {}", msg),
            SaveError::Json(e) => write!(f, "serialization error: {}", e),
        }
    }
}

impl std::error::Error for SaveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_requires_consent() {
        let mut store = MemoryStore::default();
        let state = GameState::new_game(1_000);

        let saved = save_game(&mut store, &state, ConsentState::Unset).unwrap();
        assert!(!saved);
        assert!(store.get(SAVE_KEY).is_none());

        let saved = save_game(&mut store, &state, ConsentState::Declined).unwrap();
        assert!(!saved);
        assert!(store.get(SAVE_KEY).is_none());

        let saved = save_game(&mut store, &state, ConsentState::Accepted).unwrap();
        assert!(saved);
        assert!(store.get(SAVE_KEY).is_some());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let mut store = MemoryStore::default();
        let mut state = GameState::new_game(5_000);
        state.resources.energy = 123.5;
        state.discovered_plants.push("cosmo_bloom".to_string());

        save_game(&mut store, &state, ConsentState::Accepted).unwrap();
        let loaded = load_game(&store).expect("save should load");
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_missing_save_is_none() {
        let store = MemoryStore::default();
        assert!(load_game(&store).is_none());
    }

    #[test]
    fn test_corrupt_save_is_none() {
        let mut store = MemoryStore::default();
        store.set(SAVE_KEY, "{not json at all").unwrap();
        assert!(load_game(&store).is_none());
    }

    #[test]
    fn test_version_mismatch_still_loads() {
        let mut store = MemoryStore::default();
        let mut state = GameState::new_game(0);
        state.version = "0.0.1".to_string();
        save_game(&mut store, &state, ConsentState::Accepted).unwrap();

        let loaded = load_game(&store).expect("old version should still load");
        assert_eq!(loaded.version, "0.0.1");
    }

    #[test]
    fn test_consent_roundtrip() {
        let mut store = MemoryStore::default();
        assert_eq!(load_consent(&store), ConsentState::Unset);

        store_consent(&mut store, ConsentState::Accepted).unwrap();
        assert_eq!(load_consent(&store), ConsentState::Accepted);

        store_consent(&mut store, ConsentState::Declined).unwrap();
        assert_eq!(load_consent(&store), ConsentState::Declined);
    }

    #[test]
    fn test_clear_save_keeps_consent() {
        let mut store = MemoryStore::default();
        store_consent(&mut store, ConsentState::Accepted).unwrap();
        save_game(&mut store, &GameState::new_game(0), ConsentState::Accepted).unwrap();

        clear_save(&mut store);
        assert!(store.get(SAVE_KEY).is_none());
        assert_eq!(load_consent(&store), ConsentState::Accepted);
    }
}
