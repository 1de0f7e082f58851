//! Redis client with connection retry and operation retry
//!
//! Wraps a multiplexed async connection. Every operation is retried with
//! exponential backoff when the failure looks transient.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client, RedisError, RedisResult};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use nk_shared::config::CacheConfig;

use crate::InfrastructureError;

const MAX_RETRY_DELAY_MS: u64 = 5000;

type RedisFuture<T> = Pin<Box<dyn Future<Output = RedisResult<T>> + Send>>;

/// Redis client shared by every store
#[derive(Clone)]
pub struct RedisClient {
    connection: MultiplexedConnection,
    key_prefix: String,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl RedisClient {
    /// Connect using the URL and retry settings in `config`
    pub async fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        info!(url = %mask_url(&config.url), "Creating Redis client");

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!(error = %e, "Failed to parse Redis URL");
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection =
            Self::create_connection_with_retry(client, config.max_retries, config.retry_delay_ms)
                .await?;

        info!("Redis connected");

        Ok(Self {
            connection,
            key_prefix: config.key_prefix.clone(),
            max_retries: config.max_retries.max(1),
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    async fn create_connection_with_retry(
        client: Client,
        max_retries: u32,
        retry_delay_ms: u64,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = retry_delay_ms;

        loop {
            attempts += 1;
            debug!(attempt = attempts, "Connecting to Redis");

            match client.get_multiplexed_async_connection().await {
                Ok(connection) => return Ok(connection),
                Err(e) if attempts < max_retries => {
                    warn!(
                        attempt = attempts,
                        max_retries,
                        error = %e,
                        delay_ms = delay,
                        "Redis connect failed, retrying"
                    );
                    sleep(Duration::from_millis(delay)).await;
                    delay = next_delay(delay);
                }
                Err(e) => {
                    error!(attempts, error = %e, "Giving up on Redis connection");
                    return Err(InfrastructureError::Cache(e));
                }
            }
        }
    }

    /// Namespace `key` under the configured prefix
    pub fn key(&self, key: &str) -> String {
        format!("{}:{}", self.key_prefix, key)
    }

    /// Set a value that Redis drops after `expiry_seconds`
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        expiry_seconds: u64,
    ) -> Result<(), InfrastructureError> {
        let key = key.to_string();
        let value = value.to_string();
        self.execute_with_retry(move |mut conn| {
            let key = key.clone();
            let value = value.clone();
            Box::pin(async move { conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await })
        })
        .await
        .map_err(InfrastructureError::Cache)
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        let key = key.to_string();
        self.execute_with_retry(move |mut conn| {
            let key = key.clone();
            Box::pin(async move { conn.get::<_, Option<String>>(key).await })
        })
        .await
        .map_err(InfrastructureError::Cache)
    }

    /// Delete `key` when its stored JSON has `"id": id`
    ///
    /// Runs as a single Lua script so the check and the delete cannot be
    /// split by a concurrent write. Returns whether the key was removed.
    ///
    /// Never retried: a lost reply after a successful `DEL` would make the
    /// retry report 0 and the winning redemption would look like a miss.
    pub async fn delete_if_id(&self, key: &str, id: &str) -> Result<bool, InfrastructureError> {
        let key = key.to_string();
        let id = id.to_string();
        let removed: i64 = self
            .execute_once(move |mut conn| {
                let key = key.clone();
                let id = id.clone();
                Box::pin(async move {
                    redis::Script::new(DELETE_IF_ID_SCRIPT)
                        .key(key)
                        .arg(id)
                        .invoke_async(&mut conn)
                        .await
                })
            })
            .await
            .map_err(InfrastructureError::Cache)?;
        Ok(removed == 1)
    }

    /// Check the connection with a PING
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let response: String = self
            .execute_with_retry(|mut conn| {
                Box::pin(async move { redis::cmd("PING").query_async(&mut conn).await })
            })
            .await
            .map_err(InfrastructureError::Cache)?;
        Ok(response == "PONG")
    }

    async fn execute_with_retry<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        run_with_retry(self.max_retries, self.retry_delay_ms, || {
            operation(self.connection.clone())
        })
        .await
    }

    /// For commands that are unsafe to repeat
    async fn execute_once<F, T>(&self, operation: F) -> RedisResult<T>
    where
        F: Fn(MultiplexedConnection) -> RedisFuture<T>,
    {
        run_with_retry(1, self.retry_delay_ms, || operation(self.connection.clone())).await
    }
}

/// Run `operation` up to `max_attempts` times, backing off between
/// transient failures
pub(crate) async fn run_with_retry<F, Fut, T>(
    max_attempts: u32,
    retry_delay_ms: u64,
    mut operation: F,
) -> RedisResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = RedisResult<T>>,
{
    let mut attempts = 0;
    let mut delay = retry_delay_ms;

    loop {
        attempts += 1;

        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if attempts < max_attempts && is_retriable_error(&e) => {
                warn!(
                    attempt = attempts,
                    max_attempts,
                    error = %e,
                    delay_ms = delay,
                    "Redis command failed, retrying"
                );
                sleep(Duration::from_millis(delay)).await;
                delay = next_delay(delay);
            }
            Err(e) => {
                error!(attempts, error = %e, "Redis command failed");
                return Err(e);
            }
        }
    }
}

const DELETE_IF_ID_SCRIPT: &str = r#"
local value = redis.call('GET', KEYS[1])
if value and cjson.decode(value)['id'] == ARGV[1] then
    return redis.call('DEL', KEYS[1])
end
return 0
"#;

/// Double the backoff, capped at five seconds
pub(crate) fn next_delay(delay_ms: u64) -> u64 {
    delay_ms.saturating_mul(2).min(MAX_RETRY_DELAY_MS)
}

pub(crate) fn is_retriable_error(error: &RedisError) -> bool {
    matches!(
        error.kind(),
        redis::ErrorKind::IoError
            | redis::ErrorKind::ClientError
            | redis::ErrorKind::BusyLoadingError
            | redis::ErrorKind::TryAgain
    )
}

/// Hide credentials in a Redis URL
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
