//! Services module
//!
//! This module contains business logic services

pub mod cache;
pub mod redis;
pub mod scheduling;

// Re-export commonly used services
pub use cache::{CacheKey, CacheStats, RecommendationCache};
pub use redis::{CacheEntry, RedisService};
pub use scheduling::{ParticipationSummary, SchedulingService, SubmissionListing};

use tracing::info;

use crate::config::{CacheBackend, Settings};
use crate::storage::StorageService;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Debug, Clone)]
pub struct ServiceFactory {
    pub storage: StorageService,
    pub cache: RecommendationCache,
    pub scheduling_service: SchedulingService,
    pub redis_service: Option<RedisService>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: Settings) -> Result<Self> {
        let redis_service = if settings.cache.enabled && settings.cache.backend == CacheBackend::Redis {
            Some(RedisService::new(settings.redis.clone())?)
        } else {
            None
        };

        let storage = StorageService::new();
        let cache = RecommendationCache::new(&settings.cache, redis_service.clone());
        let scheduling_service = SchedulingService::new(storage.clone(), cache.clone(), settings.engine.clone());

        info!(
            cache_enabled = settings.cache.enabled,
            backend = ?settings.cache.backend,
            max_candidates = settings.engine.max_candidates,
            "Services initialized"
        );

        Ok(Self {
            storage,
            cache,
            scheduling_service,
            redis_service,
        })
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let redis_healthy = match &self.redis_service {
            Some(redis) => Some(redis.health_check().await.unwrap_or(false)),
            None => None,
        };

        ServiceHealthStatus {
            redis_healthy,
            cache_enabled: self.cache.is_enabled(),
            storage_ready: true,
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    /// `None` when no Redis tier is configured
    pub redis_healthy: Option<bool>,
    pub cache_enabled: bool,
    pub storage_ready: bool,
}

impl ServiceHealthStatus {
    /// Redis is optional; a failing shared tier degrades to local computation
    pub fn is_healthy(&self) -> bool {
        self.storage_ready
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.redis_healthy == Some(false) {
            issues.push("Redis connection failed".to_string());
        }
        if !self.storage_ready {
            issues.push("Storage not ready".to_string());
        }

        issues
    }
}
