use std::collections::HashMap;
use std::sync::Arc;

use redis::Client as RedisClient;
use tokio::sync::Mutex;

use crate::error::Error;

const KEY_PREFIX: &str = "wheel_storage";

fn namespaced(visitor: &str, key: &str) -> String {
    format!("{}:{}:{}", KEY_PREFIX, visitor, key)
}

/// Where visitor values live. Redis in production, a map for local runs and tests.
#[derive(Clone)]
pub enum StoreBackend {
    Redis(RedisClient),
    Memory(Arc<Mutex<HashMap<String, String>>>),
}

impl StoreBackend {
    pub fn memory() -> Self {
        StoreBackend::Memory(Arc::new(Mutex::new(HashMap::new())))
    }

    /// `STORAGE_BACKEND=memory` selects the map, anything else connects to `REDIS_URL`.
    pub fn from_env() -> Result<Self, Error> {
        if std::env::var("STORAGE_BACKEND").map(|v| v == "memory").unwrap_or(false) {
            tracing::warn!("Using in-memory storage, values are lost on restart");
            return Ok(Self::memory());
        }

        let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
        let client = RedisClient::open(url)?;
        Ok(StoreBackend::Redis(client))
    }

    pub async fn get(&self, visitor: &str, key: &str) -> Result<Option<String>, Error> {
        let full_key = namespaced(visitor, key);
        match self {
            StoreBackend::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                let value: Option<String> = redis::cmd("GET")
                    .arg(&full_key)
                    .query_async(&mut conn)
                    .await?;
                Ok(value)
            }
            StoreBackend::Memory(map) => Ok(map.lock().await.get(&full_key).cloned()),
        }
    }

    pub async fn set(&self, visitor: &str, key: &str, value: &str) -> Result<(), Error> {
        let full_key = namespaced(visitor, key);
        match self {
            StoreBackend::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                let _: () = redis::cmd("SET")
                    .arg(&full_key)
                    .arg(value)
                    .query_async(&mut conn)
                    .await?;
                Ok(())
            }
            StoreBackend::Memory(map) => {
                map.lock().await.insert(full_key, value.to_string());
                Ok(())
            }
        }
    }

    /// Round-trips the connection so `/health` reflects Redis availability
    pub async fn ping(&self) -> Result<(), Error> {
        match self {
            StoreBackend::Redis(client) => {
                let mut conn = client.get_async_connection().await?;
                let _: String = redis::cmd("PING").query_async(&mut conn).await?;
                Ok(())
            }
            StoreBackend::Memory(_) => Ok(()),
        }
    }
}
