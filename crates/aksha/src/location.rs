//! The location source chosen on the command line.

use async_trait::async_trait;
use device_sensors::{FixedLocationProvider, GpsdProvider};
use safety_core::{LocationError, LocationProvider, LocationSample};

/// gpsd, or coordinates given with `--lat/--lng`.
#[derive(Debug, Clone)]
pub enum HostLocation {
    Gpsd(GpsdProvider),
    Fixed(FixedLocationProvider),
}

impl HostLocation {
    /// Fixed coordinates when both are given, gpsd otherwise.
    pub fn select(
        lat: Option<f64>,
        lng: Option<f64>,
        gpsd_addr: &str,
    ) -> Result<Self, LocationError> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Ok(HostLocation::Fixed(FixedLocationProvider::new(lat, lng)?)),
            _ => Ok(HostLocation::Gpsd(GpsdProvider::new(gpsd_addr))),
        }
    }
}

#[async_trait]
impl LocationProvider for HostLocation {
    async fn current_location(&self) -> Result<LocationSample, LocationError> {
        match self {
            HostLocation::Gpsd(p) => p.current_location().await,
            HostLocation::Fixed(p) => p.current_location().await,
        }
    }

    async fn last_known_location(&self) -> Option<LocationSample> {
        match self {
            HostLocation::Gpsd(p) => p.last_known_location().await,
            HostLocation::Fixed(p) => p.last_known_location().await,
        }
    }

    fn name(&self) -> &str {
        match self {
            HostLocation::Gpsd(p) => p.name(),
            HostLocation::Fixed(p) => p.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_select() {
        let fixed = HostLocation::select(Some(10.0), Some(20.0), "127.0.0.1:1").unwrap();
        assert_eq!(fixed.name(), "fixed");
        assert_eq!(fixed.current_location().await.unwrap().longitude, 20.0);

        let gpsd = HostLocation::select(None, None, "127.0.0.1:2947").unwrap();
        assert_eq!(gpsd.name(), "gpsd");

        assert!(HostLocation::select(Some(100.0), Some(0.0), "").is_err());
    }
}
