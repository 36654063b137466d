use crate::models::Catalog;
use crate::services::catalog::CatalogError;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

/// Default time a loaded catalog stays fresh
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone)]
struct Cached {
    value: Arc<Catalog>,
    expiry: Instant,
}

/// Time-based cache for the loaded catalog
///
/// Starts empty. A request after expiry reloads synchronously before
/// answering. The loader runs outside the lock, so concurrent callers may
/// reload redundantly. A failed reload leaves the previous value in place.
#[derive(Debug)]
pub struct CatalogCache {
    ttl: Duration,
    slot: RwLock<Option<Cached>>,
}

impl CatalogCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Return the cached catalog, reloading it if missing or expired
    pub fn get_or_load<F>(&self, load: F) -> Result<Arc<Catalog>, CatalogError>
    where
        F: FnOnce() -> Result<Catalog, CatalogError>,
    {
        self.get_or_load_at(Instant::now(), load)
    }

    /// Same as [`get_or_load`](Self::get_or_load) with an explicit clock
    pub fn get_or_load_at<F>(&self, now: Instant, load: F) -> Result<Arc<Catalog>, CatalogError>
    where
        F: FnOnce() -> Result<Catalog, CatalogError>,
    {
        if let Some(value) = self.fresh_at(now) {
            tracing::trace!("Catalog cache hit");
            return Ok(value);
        }

        tracing::debug!("Catalog cache miss, reloading");
        let value = Arc::new(load()?);

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Cached {
            value: Arc::clone(&value),
            expiry: now + self.ttl,
        });

        Ok(value)
    }

    /// Cached catalog if it has not expired at `now`
    pub fn fresh_at(&self, now: Instant) -> Option<Arc<Catalog>> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref()
            .filter(|cached| now < cached.expiry)
            .map(|cached| Arc::clone(&cached.value))
    }

    /// Last loaded catalog, regardless of expiry
    pub fn peek(&self) -> Option<Arc<Catalog>> {
        let slot = self.slot.read().unwrap_or_else(PoisonError::into_inner);
        slot.as_ref().map(|cached| Arc::clone(&cached.value))
    }

    /// Drop the cached catalog
    pub fn clear(&self) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
