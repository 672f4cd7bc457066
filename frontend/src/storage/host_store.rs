use gloo_net::http::{Request, Response};
use shared::constants::{STORAGE_ENDPOINT, VISITOR_ID_KEY};
use shared::persistence::{LoadValueResponse, Persistence, SaveValueRequest, StorageError};
use uuid::Uuid;
use web_sys::window;

/// Key-value store provided by the host page's backend, one namespace per visitor.
pub struct HostStore {
    base_url: String,
    visitor: String,
}

impl HostStore {
    pub fn new(base_url: String, visitor: String) -> Self {
        Self { base_url, visitor }
    }

    pub fn visitor(&self) -> &str {
        &self.visitor
    }

    fn url(&self, key: &str) -> String {
        format!("{}{}/{}/{}", self.base_url, STORAGE_ENDPOINT, self.visitor, key)
    }
}

/// The visitor id lives in local storage so the host namespace survives reloads.
/// Without local storage the id only lasts for this page view.
pub fn visitor_id() -> String {
    let storage = window().and_then(|w| w.local_storage().ok().flatten());

    if let Some(existing) = storage
        .as_ref()
        .and_then(|s| s.get_item(VISITOR_ID_KEY).ok().flatten())
    {
        return existing;
    }

    let id = Uuid::new_v4().to_string();
    if let Some(storage) = storage {
        if storage.set_item(VISITOR_ID_KEY, &id).is_err() {
            log::warn!("Could not persist visitor id");
        }
    }
    id
}

fn check_status(response: &Response) -> Result<(), StorageError> {
    if response.ok() {
        Ok(())
    } else {
        Err(StorageError::Rejected(format!("Error status: {}", response.status())))
    }
}

impl Persistence for HostStore {
    async fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let response = Request::get(&self.url(key))
            .send()
            .await
            .map_err(|e| StorageError::Transport(format!("Network error: {:?}", e)))?;
        check_status(&response)?;

        response
            .json::<LoadValueResponse>()
            .await
            .map(|body| body.value)
            .map_err(|e| StorageError::Transport(format!("Error parsing response: {:?}", e)))
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let body = SaveValueRequest { value: value.to_string() };
        let response = Request::put(&self.url(key))
            .json(&body)
            .map_err(|e| StorageError::Rejected(format!("Failed to build request: {:?}", e)))?
            .send()
            .await
            .map_err(|e| StorageError::Transport(format!("Network error: {:?}", e)))?;
        check_status(&response)
    }
}
