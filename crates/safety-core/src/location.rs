//! Location samples and the fresh-then-cached acquisition policy.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::LocationError;

/// How long the SOS path waits for a fresh fix before falling back.
pub const DEFAULT_LOCATION_TIMEOUT: Duration = Duration::from_millis(3000);

/// A single GPS reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Horizontal accuracy radius in meters, if the provider reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy_meters: Option<f64>,
    /// When the reading was taken.
    pub captured_at: DateTime<Utc>,
}

impl LocationSample {
    /// Create a sample captured now with unknown accuracy.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_meters: None,
            captured_at: Utc::now(),
        }
    }

    /// Set the accuracy radius.
    pub fn with_accuracy(mut self, meters: f64) -> Self {
        self.accuracy_meters = Some(meters);
        self
    }

    /// Set the capture time.
    pub fn captured_at(mut self, at: DateTime<Utc>) -> Self {
        self.captured_at = at;
        self
    }
}

/// Source of device location.
///
/// Implementations wrap whatever the host offers (gpsd, a fixed
/// coordinate, a test double). `current_location` may take arbitrarily
/// long; callers bound it with [`LocationAcquirer`].
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Request a fresh fix.
    async fn current_location(&self) -> Result<LocationSample, LocationError>;

    /// The provider's own last-known fix, if it keeps one.
    async fn last_known_location(&self) -> Option<LocationSample> {
        None
    }

    /// Human-readable name for logs.
    fn name(&self) -> &str;
}

/// Last sample seen by foreground tracking.
///
/// Cloning shares the same slot, so a tracking task and the SOS path can
/// hold separate handles.
#[derive(Debug, Clone, Default)]
pub struct LastKnownCache {
    slot: Arc<RwLock<Option<LocationSample>>>,
}

impl LastKnownCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a sample, replacing the previous one.
    pub async fn record(&self, sample: LocationSample) {
        *self.slot.write().await = Some(sample);
    }

    /// The most recently recorded sample.
    pub async fn get(&self) -> Option<LocationSample> {
        self.slot.read().await.clone()
    }

    /// Forget the cached sample.
    pub async fn clear(&self) {
        *self.slot.write().await = None;
    }
}

/// Outcome of a location acquisition, tagged with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationFix {
    /// Fresh fix obtained within the timeout.
    Fresh(LocationSample),
    /// Fresh fix failed; this is an older cached sample.
    Cached(LocationSample),
    /// Neither a fresh nor a cached sample was available.
    Unavailable,
}

impl LocationFix {
    /// Borrow the sample, if any.
    pub fn sample(&self) -> Option<&LocationSample> {
        match self {
            LocationFix::Fresh(sample) | LocationFix::Cached(sample) => Some(sample),
            LocationFix::Unavailable => None,
        }
    }

    /// Take the sample, if any.
    pub fn into_sample(self) -> Option<LocationSample> {
        match self {
            LocationFix::Fresh(sample) | LocationFix::Cached(sample) => Some(sample),
            LocationFix::Unavailable => None,
        }
    }

    /// Short label for logs and reports.
    pub fn label(&self) -> &'static str {
        match self {
            LocationFix::Fresh(_) => "fresh",
            LocationFix::Cached(_) => "cached",
            LocationFix::Unavailable => "unavailable",
        }
    }
}

/// Acquires a location for an alert: fresh if possible, cached otherwise.
///
/// The fresh request is raced against `timeout`; whichever finishes first
/// wins and the other is dropped. On timeout or error the acquirer falls
/// back to the foreground-tracked [`LastKnownCache`], then to the
/// provider's own last-known fix, and finally reports
/// [`LocationFix::Unavailable`]. It never returns an error.
pub struct LocationAcquirer<P: LocationProvider> {
    provider: P,
    cache: LastKnownCache,
    timeout: Duration,
}

impl<P: LocationProvider> LocationAcquirer<P> {
    /// Create an acquirer with the default 3 second timeout.
    pub fn new(provider: P, cache: LastKnownCache) -> Self {
        Self::with_timeout(provider, cache, DEFAULT_LOCATION_TIMEOUT)
    }

    /// Create an acquirer with a custom timeout.
    pub fn with_timeout(provider: P, cache: LastKnownCache, timeout: Duration) -> Self {
        Self {
            provider,
            cache,
            timeout,
        }
    }

    /// The shared cache handle.
    pub fn cache(&self) -> &LastKnownCache {
        &self.cache
    }

    /// The underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The fresh-fix timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Acquire a location following the fresh → cached → none policy.
    pub async fn acquire(&self) -> LocationFix {
        match timeout(self.timeout, self.provider.current_location()).await {
            Ok(Ok(sample)) => {
                debug!(
                    provider = self.provider.name(),
                    "Fresh location acquired: {:.6},{:.6}", sample.latitude, sample.longitude
                );
                self.cache.record(sample.clone()).await;
                return LocationFix::Fresh(sample);
            }
            Ok(Err(e)) => {
                warn!(provider = self.provider.name(), "Fresh location failed: {}", e);
            }
            Err(_) => {
                warn!(
                    provider = self.provider.name(),
                    "Fresh location timed out after {:?}", self.timeout
                );
            }
        }

        if let Some(sample) = self.cache.get().await {
            debug!("Using tracked location from {}", sample.captured_at);
            return LocationFix::Cached(sample);
        }

        if let Some(sample) = self.provider.last_known_location().await {
            debug!("Using provider last-known location from {}", sample.captured_at);
            return LocationFix::Cached(sample);
        }

        warn!("No location available for alert");
        LocationFix::Unavailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowProvider {
        delay: Duration,
        last_known: Option<LocationSample>,
    }

    #[async_trait]
    impl LocationProvider for SlowProvider {
        async fn current_location(&self) -> Result<LocationSample, LocationError> {
            tokio::time::sleep(self.delay).await;
            Ok(LocationSample::new(1.0, 2.0))
        }

        async fn last_known_location(&self) -> Option<LocationSample> {
            self.last_known.clone()
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl LocationProvider for FailingProvider {
        async fn current_location(&self) -> Result<LocationSample, LocationError> {
            Err(LocationError::PermissionDenied)
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[tokio::test]
    async fn test_fresh_fix_within_timeout() {
        let provider = SlowProvider {
            delay: Duration::from_millis(0),
            last_known: None,
        };
        let cache = LastKnownCache::new();
        let acquirer =
            LocationAcquirer::with_timeout(provider, cache.clone(), Duration::from_millis(500));

        let fix = acquirer.acquire().await;
        assert_eq!(fix.label(), "fresh");
        assert_eq!(fix.sample().unwrap().latitude, 1.0);
        // Fresh fixes refresh the cache
        assert!(cache.get().await.is_some());
    }

    #[tokio::test]
    async fn test_timeout_falls_back_to_cache() {
        let provider = SlowProvider {
            delay: Duration::from_secs(10),
            last_known: None,
        };
        let cache = LastKnownCache::new();
        cache.record(LocationSample::new(12.5, 77.5)).await;
        let acquirer = LocationAcquirer::with_timeout(provider, cache, Duration::from_millis(50));

        let start = std::time::Instant::now();
        let fix = acquirer.acquire().await;
        assert!(start.elapsed() < Duration::from_secs(5));

        match fix {
            LocationFix::Cached(sample) => assert_eq!(sample.latitude, 12.5),
            other => panic!("Expected cached fix, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_timeout_without_cache_is_none() {
        let provider = SlowProvider {
            delay: Duration::from_secs(10),
            last_known: None,
        };
        let acquirer =
            LocationAcquirer::with_timeout(provider, LastKnownCache::new(), Duration::from_millis(50));

        let fix = acquirer.acquire().await;
        assert_eq!(fix, LocationFix::Unavailable);
        assert!(fix.into_sample().is_none());
    }

    #[tokio::test]
    async fn test_error_falls_back_to_provider_last_known() {
        let acquirer = LocationAcquirer::new(FailingProvider, LastKnownCache::new());
        assert_eq!(acquirer.acquire().await, LocationFix::Unavailable);

        let provider = SlowProvider {
            delay: Duration::from_secs(10),
            last_known: Some(LocationSample::new(3.0, 4.0)),
        };
        let acquirer =
            LocationAcquirer::with_timeout(provider, LastKnownCache::new(), Duration::from_millis(20));
        let fix = acquirer.acquire().await;
        assert_eq!(fix.label(), "cached");
        assert_eq!(fix.sample().unwrap().longitude, 4.0);
    }

    #[tokio::test]
    async fn test_tracked_cache_preferred_over_provider_last_known() {
        let provider = SlowProvider {
            delay: Duration::from_secs(10),
            last_known: Some(LocationSample::new(3.0, 4.0)),
        };
        let cache = LastKnownCache::new();
        cache.record(LocationSample::new(5.0, 6.0)).await;
        let acquirer = LocationAcquirer::with_timeout(provider, cache, Duration::from_millis(20));

        let sample = acquirer.acquire().await.into_sample().unwrap();
        assert_eq!(sample.latitude, 5.0);
    }
}
