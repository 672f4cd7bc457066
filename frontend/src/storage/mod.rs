mod host_store;
mod local_store;

pub use host_store::{visitor_id, HostStore};
pub use local_store::LocalStore;

use shared::persistence::{MemoryStore, Persistence, StorageError};
use shared::wheel_config::{StorageBackend, WheelConfig};

use crate::config::get_api_base_url;

/// The persistence backend picked for this page, fixed at construction.
pub enum WidgetStore {
    Local(LocalStore),
    Host(HostStore),
    Memory(MemoryStore),
}

impl WidgetStore {
    pub fn from_config(config: &WheelConfig) -> Self {
        match config.storage {
            StorageBackend::Local => match LocalStore::open() {
                Some(store) => Self::Local(store),
                None => {
                    log::warn!("Local storage unavailable, spins are kept in memory");
                    Self::Memory(MemoryStore::new())
                }
            },
            StorageBackend::Host => {
                let store = HostStore::new(get_api_base_url(), visitor_id());
                log::info!("Using host storage for visitor {}", store.visitor());
                Self::Host(store)
            }
            StorageBackend::Memory => Self::Memory(MemoryStore::new()),
        }
    }
}

impl Persistence for WidgetStore {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Self::Local(store) => store.load(key).await,
            Self::Host(store) => store.load(key).await,
            Self::Memory(store) => store.load(key).await,
        }
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Self::Local(store) => store.save(key, value).await,
            Self::Host(store) => store.save(key, value).await,
            Self::Memory(store) => store.save(key, value).await,
        }
    }
}
