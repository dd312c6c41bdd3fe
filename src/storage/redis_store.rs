//! Redis storage implementation
//!
//! The frontier is a Redis list (`LPUSH` / `BRPOP`) and the visited set is a
//! Redis set (`SADD` / `SCARD`). Both outlive the process; completion is
//! tracked in-process, so one crawl at a time may drive a given pair of keys.

use crate::config::StoreConfig;
use crate::storage::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::sync::Mutex;
use std::time::Duration;

/// Redis-backed frontier and visited set
pub struct RedisStorage {
    client: redis::Client,
    /// Shared connection for non-blocking commands
    conn: MultiplexedConnection,
    /// Idle connections reserved for `BRPOP`, which stalls the whole pipeline
    /// of whatever connection it runs on
    blocking_pool: Mutex<Vec<MultiplexedConnection>>,
    url: String,
    queue_key: String,
    visited_key: String,
}

impl RedisStorage {
    /// Connects to Redis and verifies the connection with `PING`
    ///
    /// # Arguments
    ///
    /// * `config` - Store configuration (address and key names)
    ///
    /// # Returns
    ///
    /// * `Ok(RedisStorage)` - Connected and answering
    /// * `Err(StorageError)` - Address invalid or server unreachable
    pub async fn connect(config: &StoreConfig) -> StorageResult<Self> {
        let url = redis_url(&config.address);
        let client = redis::Client::open(url.as_str())?;
        let mut conn = client.get_multiplexed_async_connection().await?;

        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        if pong != "PONG" {
            return Err(StorageError::UnexpectedReply(pong));
        }
        tracing::info!("Connected to Redis at {}", url);

        Ok(Self {
            client,
            conn,
            blocking_pool: Mutex::new(Vec::new()),
            url,
            queue_key: config.queue_key.clone(),
            visited_key: config.visited_key.clone(),
        })
    }

    async fn take_blocking_conn(&self) -> StorageResult<MultiplexedConnection> {
        let idle = match self.blocking_pool.lock() {
            Ok(mut pool) => pool.pop(),
            Err(_) => None,
        };
        match idle {
            Some(conn) => Ok(conn),
            None => Ok(self.client.get_multiplexed_async_connection().await?),
        }
    }

    fn return_blocking_conn(&self, conn: MultiplexedConnection) {
        if let Ok(mut pool) = self.blocking_pool.lock() {
            pool.push(conn);
        }
    }
}

/// Turns `host:port` into a `redis://` URL, leaving full URLs untouched
pub fn redis_url(address: &str) -> String {
    let address = address.trim();
    if address.contains("://") {
        address.to_string()
    } else {
        format!("redis://{}", address)
    }
}

#[async_trait]
impl Storage for RedisStorage {
    async fn mark_visited(&self, address: &str) -> StorageResult<bool> {
        let mut conn = self.conn.clone();
        let added: i64 = conn.sadd(self.visited_key.as_str(), address).await?;
        Ok(added == 1)
    }

    async fn visited_count(&self) -> StorageResult<u64> {
        let mut conn = self.conn.clone();
        let count: u64 = conn.scard(self.visited_key.as_str()).await?;
        Ok(count)
    }

    async fn enqueue(&self, payload: &str) -> StorageResult<()> {
        let mut conn = self.conn.clone();
        let _: i64 = conn.lpush(self.queue_key.as_str(), payload).await?;
        Ok(())
    }

    async fn queue_len(&self) -> StorageResult<u64> {
        let mut conn = self.conn.clone();
        let len: u64 = conn.llen(self.queue_key.as_str()).await?;
        Ok(len)
    }

    async fn dequeue(&self, timeout: Duration) -> StorageResult<Option<String>> {
        let mut conn = self.take_blocking_conn().await?;
        // BRPOP treats 0 as "forever"; keep the wait bounded
        let seconds = timeout.as_secs_f64().max(0.01);
        let popped: Option<(String, String)> =
            conn.brpop(self.queue_key.as_str(), seconds).await?;
        self.return_blocking_conn(conn);
        Ok(popped.map(|(_, payload)| payload))
    }

    async fn clear(&self) -> StorageResult<()> {
        let mut conn = self.conn.clone();
        let _: i64 = conn
            .del(vec![self.queue_key.as_str(), self.visited_key.as_str()])
            .await?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "redis {} (queue '{}', visited '{}')",
            self.url, self.queue_key, self.visited_key
        )
    }
}
