use redis::{Client, Commands, Connection, RedisResult};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::db::StorageBackend;
use crate::error::StoreResult;

const KEY_PREFIX: &str = "movie-finder";

/// Creates a Redis client for persisted state
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Backend storing each logical key as a Redis string
///
/// One connection is kept open and reused. Connecting, reading and writing are
/// all bounded by `timeout`, and a connection that fails a command is dropped
/// so the next call reconnects.
pub struct RedisBackend {
    client: Client,
    timeout: Duration,
    connection: Mutex<Option<Connection>>,
}

impl RedisBackend {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self {
            client,
            timeout,
            connection: Mutex::new(None),
        }
    }

    fn namespaced(key: &str) -> String {
        format!("{}:{}", KEY_PREFIX, key)
    }

    fn connect(&self) -> RedisResult<Connection> {
        let conn = self.client.get_connection_with_timeout(self.timeout)?;
        conn.set_read_timeout(Some(self.timeout))?;
        conn.set_write_timeout(Some(self.timeout))?;
        tracing::debug!(timeout_ms = self.timeout.as_millis() as u64, "Connected to Redis");
        Ok(conn)
    }

    fn with_connection<T>(
        &self,
        command: impl FnOnce(&mut Connection) -> RedisResult<T>,
    ) -> StoreResult<T> {
        let mut cached = self.connection.lock().unwrap_or_else(PoisonError::into_inner);

        let mut conn = match cached.take() {
            Some(conn) => conn,
            None => self.connect()?,
        };

        match command(&mut conn) {
            Ok(value) => {
                *cached = Some(conn);
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Dropping Redis connection after failed command");
                Err(e.into())
            }
        }
    }

    #[cfg(test)]
    fn has_cached_connection(&self) -> bool {
        self.connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl StorageBackend for RedisBackend {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let key = Self::namespaced(key);
        self.with_connection(|conn| conn.get(&key))
    }

    fn write(&self, key: &str, json: String) -> StoreResult<()> {
        let key = Self::namespaced(key);
        self.with_connection(|conn| conn.set(&key, json))
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
