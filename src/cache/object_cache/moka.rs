use async_trait::async_trait;
use moka::{Expiry, future::Cache};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaCacheWrapper);

/// 缓存值连同其写入时的有效期
#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// 按条目自身的 ttl 过期，覆盖写入时重新计时
struct EntryExpiry;

impl Expiry<String, Entry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// 进程内缓存，`ttl` 为 0 的条目使用默认有效期
pub struct MokaCacheWrapper {
    inner: Cache<String, Entry>,
    default_ttl: Duration,
}

impl MokaCacheWrapper {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        Ok(Self::with_settings(
            config.cache.memory.max_capacity,
            config.cache.default_ttl,
        ))
    }

    pub fn with_settings(max_capacity: u64, ttl_secs: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(EntryExpiry)
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}, default TTL: {}s",
            max_capacity, ttl_secs
        );
        Self {
            inner,
            default_ttl: Duration::from_secs(ttl_secs.max(1)),
        }
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        if let Some(entry) = self.inner.get(key).await {
            debug!("Cache hit: {}", key);
            CacheResult::Found(entry.value)
        } else {
            debug!("Cache miss: {}", key);
            CacheResult::NotFound
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let ttl = if ttl == 0 {
            self.default_ttl
        } else {
            Duration::from_secs(ttl)
        };
        self.inner.insert(key, Entry { value, ttl }).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    async fn purge_prefix(&self, prefix: &str) {
        let keys: Vec<String> = self
            .inner
            .iter()
            .filter(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.as_ref().clone())
            .collect();

        for key in &keys {
            self.inner.invalidate(key).await;
        }
        debug!("Purged {} cache entries with prefix '{}'", keys.len(), prefix);
    }

    async fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn test_insert_get_remove() {
        let cache = MokaCacheWrapper::with_settings(100, 60);
        cache.insert_raw("a".into(), "1".into(), 0).await;
        assert_eq!(cache.get_raw("a").await, CacheResult::Found("1".into()));

        cache.remove("a").await;
        assert_eq!(cache.get_raw("a").await, CacheResult::NotFound);
    }

    #[actix_web::test]
    async fn test_entry_ttl_overrides_default() {
        let cache = MokaCacheWrapper::with_settings(100, 300);
        cache.insert_raw("short".into(), "1".into(), 1).await;
        cache.insert_raw("default".into(), "2".into(), 0).await;
        assert_eq!(cache.get_raw("short").await, CacheResult::Found("1".into()));

        actix_web::rt::time::sleep(Duration::from_millis(2100)).await;

        assert_eq!(cache.get_raw("short").await, CacheResult::NotFound);
        assert_eq!(cache.get_raw("default").await, CacheResult::Found("2".into()));
    }

    #[actix_web::test]
    async fn test_overwrite_restarts_expiry_with_new_ttl() {
        let cache = MokaCacheWrapper::with_settings(100, 1);
        cache.insert_raw("k".into(), "old".into(), 0).await;
        cache.insert_raw("k".into(), "new".into(), 300).await;

        actix_web::rt::time::sleep(Duration::from_millis(2100)).await;

        assert_eq!(cache.get_raw("k").await, CacheResult::Found("new".into()));
    }

    #[actix_web::test]
    async fn test_purge_prefix_keeps_other_keys() {
        let cache = MokaCacheWrapper::with_settings(100, 60);
        cache
            .insert_raw("response:u1:/api/groups".into(), "[]".into(), 0)
            .await;
        cache
            .insert_raw("response:u2:/api/assignments".into(), "[]".into(), 0)
            .await;
        cache.insert_raw("user:token".into(), "{}".into(), 0).await;

        cache.purge_prefix("response:").await;

        assert_eq!(
            cache.get_raw("response:u1:/api/groups").await,
            CacheResult::NotFound
        );
        assert_eq!(
            cache.get_raw("response:u2:/api/assignments").await,
            CacheResult::NotFound
        );
        assert_eq!(
            cache.get_raw("user:token").await,
            CacheResult::Found("{}".into())
        );
    }
}
