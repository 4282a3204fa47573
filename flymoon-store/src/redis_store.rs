use async_trait::async_trait;
use redis::AsyncCommands;

use crate::storage::{StorageError, StoragePort};

/// Redis-backed session storage. Keys are namespaced per visitor session so
/// one connection pool serves every session on the node.
pub struct RedisStore {
    client: redis::Client,
    prefix: String,
}

impl RedisStore {
    pub async fn new(connection_string: &str, prefix: &str) -> Result<Self, StorageError> {
        let client = redis::Client::open(connection_string)
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        Ok(Self {
            client,
            prefix: prefix.to_owned(),
        })
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, StorageError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl StoragePort for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut conn = self.connection().await?;
        let value: Option<String> = conn
            .get(self.namespaced(key))
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        conn.set::<_, _, ()>(self.namespaced(key), value)
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut conn = self.connection().await?;
        conn.del::<_, ()>(self.namespaced(key))
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn key_namespacing() {
        let store = RedisStore::new("redis://127.0.0.1:6379", "flymoon:sess:abc")
            .await
            .unwrap();
        assert_eq!(
            store.namespaced("search_params"),
            "flymoon:sess:abc:search_params"
        );
    }
}
