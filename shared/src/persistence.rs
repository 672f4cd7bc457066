use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::wheel_config::{ClaimPolicy, StorageKeys};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No backing store exists in this environment
    Unavailable,
    /// The store refused the operation (quota, permissions, validation)
    Rejected(String),
    /// The store could not be reached
    Transport(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => write!(f, "Storage unavailable"),
            Self::Rejected(e) => write!(f, "Storage rejected write: {}", e),
            Self::Transport(e) => write!(f, "Storage transport error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

/// Durable string key/value storage for the session counters.
#[allow(async_fn_in_trait)]
pub trait Persistence {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// The persisted part of a visitor's session
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionRecord {
    pub spins_used: u32,
    pub prize_claimed: bool,
}

fn parse_spins(raw: Option<String>) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok()).unwrap_or(0)
}

fn parse_flag(raw: Option<String>) -> bool {
    raw.map(|v| v.trim() == "true").unwrap_or(false)
}

/// Reads the record back. Never fails: a broken or missing store means a fresh visitor.
pub async fn load_record<S: Persistence>(
    store: &S,
    keys: &StorageKeys,
    policy: ClaimPolicy,
) -> SessionRecord {
    let spins_used = match store.load(&keys.spins_used).await {
        Ok(raw) => parse_spins(raw),
        Err(e) => {
            log::warn!("Failed to load {}: {}", keys.spins_used, e);
            return SessionRecord::default();
        }
    };

    if !policy.tracks_claim() {
        return SessionRecord { spins_used, prize_claimed: false };
    }

    match store.load(&keys.prize_claimed).await {
        Ok(raw) => SessionRecord { spins_used, prize_claimed: parse_flag(raw) },
        Err(e) => {
            log::warn!("Failed to load {}: {}", keys.prize_claimed, e);
            SessionRecord::default()
        }
    }
}

/// Writes the record. The flag goes first so a failed write never leaves a
/// bumped counter behind.
pub async fn store_record<S: Persistence>(
    store: &S,
    keys: &StorageKeys,
    record: &SessionRecord,
    policy: ClaimPolicy,
) -> Result<(), StorageError> {
    if policy.tracks_claim() {
        store
            .save(&keys.prize_claimed, &record.prize_claimed.to_string())
            .await?;
    }
    store
        .save(&keys.spins_used, &record.spins_used.to_string())
        .await
}

// === API Types ===

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LoadValueResponse {
    pub value: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SaveValueRequest {
    pub value: String,
}

/// Process-local store. Used when the browser offers no storage and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl Persistence for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.get(key))
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.insert(key, value);
        Ok(())
    }
}

impl<S: Persistence> Persistence for std::rc::Rc<S> {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key).await
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl Persistence for BrokenStore {
        async fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        async fn save(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Rejected("quota exceeded".to_string()))
        }
    }

    #[tokio::test]
    async fn test_round_trip() {
        let store = MemoryStore::new();
        let keys = StorageKeys::default();
        let record = SessionRecord { spins_used: 2, prize_claimed: true };

        store_record(&store, &keys, &record, ClaimPolicy::ReplayReward).await.unwrap();
        assert_eq!(store.get("wheel_spins_used").as_deref(), Some("2"));
        assert_eq!(store.get("prize_opened").as_deref(), Some("true"));

        let loaded = load_record(&store, &keys, ClaimPolicy::ReplayReward).await;
        assert_eq!(loaded, record);
    }

    #[tokio::test]
    async fn test_missing_keys_default() {
        let store = MemoryStore::new();
        let loaded = load_record(&store, &StorageKeys::default(), ClaimPolicy::ReplayReward).await;
        assert_eq!(loaded, SessionRecord::default());
    }

    #[tokio::test]
    async fn test_garbage_values_default() {
        let store = MemoryStore::new();
        store.insert("wheel_spins_used", "lots");
        store.insert("prize_opened", "yes");
        let loaded = load_record(&store, &StorageKeys::default(), ClaimPolicy::ReplayReward).await;
        assert_eq!(loaded, SessionRecord::default());
    }

    #[tokio::test]
    async fn test_load_failure_is_fresh_session() {
        let loaded = load_record(&BrokenStore, &StorageKeys::default(), ClaimPolicy::ReplayReward).await;
        assert_eq!(loaded, SessionRecord::default());
    }

    #[tokio::test]
    async fn test_save_failure_propagates() {
        let err = store_record(
            &BrokenStore,
            &StorageKeys::default(),
            &SessionRecord { spins_used: 1, prize_claimed: false },
            ClaimPolicy::ReplayReward,
        )
        .await
        .unwrap_err();
        assert_eq!(err, StorageError::Rejected("quota exceeded".to_string()));
    }

    #[tokio::test]
    async fn test_counter_only_ignores_flag() {
        let store = MemoryStore::new();
        let keys = StorageKeys::default();
        store.insert("prize_opened", "true");

        let record = SessionRecord { spins_used: 1, prize_claimed: false };
        store_record(&store, &keys, &record, ClaimPolicy::CounterOnly).await.unwrap();
        assert_eq!(store.get("prize_opened").as_deref(), Some("true"));

        let loaded = load_record(&store, &keys, ClaimPolicy::CounterOnly).await;
        assert_eq!(loaded, SessionRecord { spins_used: 1, prize_claimed: false });
    }
}
