//! Redis integration service implementation
//!
//! Shared second tier for memoized recommendations, so several processes
//! serving the same events can reuse each other's results.

use redis::{AsyncCommands, Client, RedisResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::RedisConfig;
use crate::models::Recommendation;
use crate::utils::errors::Result;

/// Redis service for caching recommendations
#[derive(Clone, Debug)]
pub struct RedisService {
    client: Client,
    config: RedisConfig,
}

/// Cache entry with TTL information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    pub data: T,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub ttl_seconds: u64,
}

impl RedisService {
    /// Create a new RedisService instance; no connection is made until first use
    pub fn new(config: RedisConfig) -> Result<Self> {
        let client = Client::open(config.url.as_str())?;
        Ok(Self { client, config })
    }

    async fn get_connection(&self) -> Result<redis::aio::Connection> {
        Ok(self.client.get_async_connection().await?)
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.config.prefix, key)
    }

    /// Set a value in Redis with TTL
    pub async fn set<T>(&self, key: &str, value: &T, ttl_seconds: Option<u64>) -> Result<()>
    where
        T: Serialize,
    {
        let mut conn = self.get_connection().await?;
        let entry = CacheEntry {
            data: value,
            created_at: chrono::Utc::now(),
            ttl_seconds: ttl_seconds.unwrap_or(self.config.ttl_seconds),
        };
        let serialized = serde_json::to_string(&entry)?;
        let full_key = self.full_key(key);

        let _: () = conn.set_ex(&full_key, serialized, entry.ttl_seconds).await?;

        debug!(key = %full_key, ttl = entry.ttl_seconds, "Value set in Redis");
        Ok(())
    }

    /// Get a value from Redis
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: for<'de> Deserialize<'de>,
    {
        let mut conn = self.get_connection().await?;
        let full_key = self.full_key(key);

        let result: Option<String> = conn.get(&full_key).await?;

        match result {
            Some(data) => {
                let entry = serde_json::from_str::<CacheEntry<T>>(&data)?;
                debug!(key = %full_key, "Value retrieved from Redis");
                Ok(Some(entry.data))
            }
            None => {
                debug!(key = %full_key, "Key not found in Redis");
                Ok(None)
            }
        }
    }

    /// Get all keys matching a pattern
    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>> {
        let mut conn = self.get_connection().await?;
        let full_pattern = self.full_key(pattern);

        let keys: Vec<String> = conn.keys(&full_pattern).await?;

        debug!(pattern = %full_pattern, count = keys.len(), "Keys retrieved by pattern");
        Ok(keys)
    }

    /// Delete all keys matching a pattern
    pub async fn delete_pattern(&self, pattern: &str) -> Result<u64> {
        let keys = self.keys(pattern).await?;
        if keys.is_empty() {
            return Ok(0);
        }

        let mut conn = self.get_connection().await?;
        let deleted: u64 = conn.del(&keys).await?;

        info!(pattern = %pattern, deleted = deleted, "Keys deleted by pattern");
        Ok(deleted)
    }

    /// Cache a computed recommendation under its version token
    pub async fn cache_recommendation(&self, event_uid: Uuid, version: usize, recommendation: &Recommendation) -> Result<()> {
        self.set(&recommendation_key(event_uid, version), recommendation, None).await
    }

    /// Get a cached recommendation for an exact version token
    pub async fn get_recommendation(&self, event_uid: Uuid, version: usize) -> Result<Option<Recommendation>> {
        self.get(&recommendation_key(event_uid, version)).await
    }

    /// Drop every cached version for an event
    pub async fn invalidate_recommendations(&self, event_uid: Uuid) -> Result<u64> {
        self.delete_pattern(&format!("recommendation:{}:*", event_uid)).await
    }

    /// Health check for Redis connection
    pub async fn health_check(&self) -> Result<bool> {
        match self.get_connection().await {
            Ok(mut conn) => {
                let result: RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
                match result {
                    Ok(response) => {
                        debug!(response = %response, "Redis health check successful");
                        Ok(response == "PONG")
                    }
                    Err(e) => {
                        warn!(error = %e, "Redis health check failed");
                        Ok(false)
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "Redis connection failed");
                Ok(false)
            }
        }
    }
}

/// Keyed by the event uid; numeric ids restart in every process and would collide
pub(crate) fn recommendation_key(event_uid: Uuid, version: usize) -> String {
    format!("recommendation:{}:{}", event_uid, version)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redis_service_creation_is_lazy() {
        let config = crate::config::Settings::default().redis;
        assert!(RedisService::new(config).is_ok());
    }

    #[test]
    fn test_invalid_url_rejected() {
        let mut config = crate::config::Settings::default().redis;
        config.url = "not a url".to_string();
        assert!(RedisService::new(config).is_err());
    }

    #[test]
    fn test_recommendation_key_layout() {
        let uid = Uuid::parse_str("6f1c2a0e-8d4b-4c1e-9a57-3b2f0d9e7c11").unwrap();
        assert_eq!(recommendation_key(uid, 3), "recommendation:6f1c2a0e-8d4b-4c1e-9a57-3b2f0d9e7c11:3");
    }

    #[test]
    fn test_recommendation_key_differs_per_event_uid() {
        assert_ne!(recommendation_key(Uuid::new_v4(), 1), recommendation_key(Uuid::new_v4(), 1));
    }

    #[test]
    fn test_cache_entry_serialization() {
        let entry = CacheEntry {
            data: "test_data".to_string(),
            created_at: chrono::Utc::now(),
            ttl_seconds: 3600,
        };

        let serialized = serde_json::to_string(&entry).unwrap();
        let deserialized: CacheEntry<String> = serde_json::from_str(&serialized).unwrap();

        assert_eq!(entry.data, deserialized.data);
        assert_eq!(entry.ttl_seconds, deserialized.ttl_seconds);
    }
}
