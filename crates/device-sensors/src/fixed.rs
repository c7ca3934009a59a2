//! A location the user supplies by hand.

use async_trait::async_trait;
use chrono::Utc;
use safety_core::{LocationError, LocationProvider, LocationSample};

/// Always reports the same coordinates, stamped with the time of the request.
#[derive(Debug, Clone)]
pub struct FixedLocationProvider {
    latitude: f64,
    longitude: f64,
    accuracy_meters: Option<f64>,
}

impl FixedLocationProvider {
    /// Create a provider for `latitude`, `longitude` in degrees.
    ///
    /// Out-of-range coordinates are rejected.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::Invalid(format!(
                "coordinates out of range: {}, {}",
                latitude, longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
            accuracy_meters: None,
        })
    }

    /// Report an accuracy radius with each sample.
    pub fn with_accuracy(mut self, meters: f64) -> Self {
        self.accuracy_meters = Some(meters);
        self
    }

    fn sample(&self) -> LocationSample {
        let sample = LocationSample::new(self.latitude, self.longitude).captured_at(Utc::now());
        match self.accuracy_meters {
            Some(meters) => sample.with_accuracy(meters),
            None => sample,
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_location(&self) -> Result<LocationSample, LocationError> {
        Ok(self.sample())
    }

    async fn last_known_location(&self) -> Option<LocationSample> {
        Some(self.sample())
    }

    fn name(&self) -> &str {
        "fixed"
    }
}
