//! Location from a gpsd daemon.

use std::env;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use safety_core::{LocationError, LocationProvider, LocationSample};
use serde::Deserialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::SensorError;

/// Default gpsd address.
pub const DEFAULT_GPSD_ADDR: &str = "127.0.0.1:2947";

/// Command that switches gpsd into JSON watch mode.
const WATCH_COMMAND: &[u8] = b"?WATCH={\"enable\":true,\"json\":true};\n";

/// A gpsd report. Only time-position-velocity reports carry a fix.
#[derive(Debug, Deserialize)]
#[serde(tag = "class")]
enum Report {
    #[serde(rename = "TPV")]
    Tpv(Tpv),
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct Tpv {
    /// 0/1 = no fix, 2 = 2D, 3 = 3D.
    #[serde(default)]
    mode: u8,
    lat: Option<f64>,
    lon: Option<f64>,
    time: Option<String>,
    /// Estimated horizontal position error, metres.
    eph: Option<f64>,
    epx: Option<f64>,
    epy: Option<f64>,
}

/// Parse one line of gpsd output.
///
/// Returns `Ok(None)` for reports without a usable fix (other classes,
/// mode below 2, missing coordinates).
pub fn parse_report(line: &str) -> Result<Option<LocationSample>, SensorError> {
    let tpv = match serde_json::from_str::<Report>(line)? {
        Report::Tpv(tpv) => tpv,
        Report::Other => return Ok(None),
    };

    if tpv.mode < 2 {
        return Ok(None);
    }
    let (Some(lat), Some(lon)) = (tpv.lat, tpv.lon) else {
        return Ok(None);
    };

    let mut sample = LocationSample::new(lat, lon);

    let accuracy = tpv.eph.or(match (tpv.epx, tpv.epy) {
        (Some(x), Some(y)) => Some(x.max(y)),
        (x, y) => x.or(y),
    });
    if let Some(meters) = accuracy {
        sample = sample.with_accuracy(meters);
    }

    if let Some(time) = tpv.time.as_deref() {
        match DateTime::parse_from_rfc3339(time) {
            Ok(at) => sample = sample.captured_at(at.with_timezone(&Utc)),
            Err(e) => debug!("Ignoring unparseable gpsd time {:?}: {}", time, e),
        }
    }

    Ok(Some(sample))
}

/// Reads fixes from gpsd over its JSON socket protocol.
///
/// Each `current_location` call opens a connection, enables watch mode
/// and waits for the first TPV report with a 2D or 3D fix. The wait is
/// unbounded; wrap the provider in a
/// [`LocationAcquirer`](safety_core::LocationAcquirer) to bound it.
#[derive(Debug, Clone)]
pub struct GpsdProvider {
    addr: String,
    last: Arc<RwLock<Option<LocationSample>>>,
}

impl Default for GpsdProvider {
    fn default() -> Self {
        Self::new(DEFAULT_GPSD_ADDR)
    }
}

impl GpsdProvider {
    /// Create a provider for the gpsd at `addr` (`host:port`).
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            last: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a provider from `AKSHA_GPSD_ADDR`, defaulting to
    /// [`DEFAULT_GPSD_ADDR`].
    pub fn from_env() -> Self {
        let addr = env::var("AKSHA_GPSD_ADDR").unwrap_or_else(|_| DEFAULT_GPSD_ADDR.to_string());
        Self::new(addr)
    }

    /// The daemon address.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    async fn read_fix(&self) -> Result<LocationSample, SensorError> {
        let mut stream = TcpStream::connect(&self.addr)
            .await
            .map_err(|e| SensorError::Connection(format!("{}: {}", self.addr, e)))?;
        stream.write_all(WATCH_COMMAND).await?;

        let mut lines = BufReader::new(stream).lines();
        while let Some(line) = lines.next_line().await? {
            match parse_report(&line) {
                Ok(Some(sample)) => return Ok(sample),
                Ok(None) => continue,
                Err(e) => warn!("Skipping malformed gpsd report: {}", e),
            }
        }

        Err(SensorError::Protocol(
            "gpsd closed the connection without a fix".to_string(),
        ))
    }
}

#[async_trait]
impl LocationProvider for GpsdProvider {
    async fn current_location(&self) -> Result<LocationSample, LocationError> {
        let sample = self
            .read_fix()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        info!(
            lat = sample.latitude,
            lng = sample.longitude,
            "gpsd fix received"
        );
        *self.last.write().await = Some(sample.clone());
        Ok(sample)
    }

    async fn last_known_location(&self) -> Option<LocationSample> {
        self.last.read().await.clone()
    }

    fn name(&self) -> &str {
        "gpsd"
    }
}
