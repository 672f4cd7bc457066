use shared::persistence::{Persistence, StorageError};
use web_sys::{window, Storage};

/// Browser local storage. Survives reloads, scoped to the page's origin.
pub struct LocalStore {
    storage: Storage,
}

impl LocalStore {
    pub fn open() -> Option<Self> {
        window()
            .and_then(|w| w.local_storage().ok().flatten())
            .map(|storage| Self { storage })
    }
}

impl Persistence for LocalStore {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Rejected(format!("{:?}", e)))
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Throws on quota exhaustion and in some private browsing modes
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Rejected(format!("{:?}", e)))
    }
}
