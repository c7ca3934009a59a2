//! Battery state from the Linux power-supply class.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use safety_core::{BatteryProvider, BatteryReading};
use tracing::debug;

use crate::error::SensorError;

/// Default sysfs power-supply directory.
pub const DEFAULT_POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";

/// Reads `capacity` and `status` of the first `BAT*` supply.
///
/// Hosts without a battery report `None`, which alerts render as
/// "Battery: unknown".
#[derive(Debug, Clone)]
pub struct SysfsBattery {
    root: PathBuf,
}

impl Default for SysfsBattery {
    fn default() -> Self {
        Self::new(DEFAULT_POWER_SUPPLY_DIR)
    }
}

impl SysfsBattery {
    /// Read supplies under `root` instead of the system directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    async fn find_battery(&self) -> Result<Option<PathBuf>, SensorError> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut batteries = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_name().to_string_lossy().starts_with("BAT") {
                batteries.push(entry.path());
            }
        }
        batteries.sort();
        Ok(batteries.into_iter().next())
    }

    async fn read(&self) -> Result<Option<BatteryReading>, SensorError> {
        let Some(dir) = self.find_battery().await? else {
            return Ok(None);
        };
        read_supply(&dir).await.map(Some)
    }
}

async fn read_supply(dir: &Path) -> Result<BatteryReading, SensorError> {
    let capacity = tokio::fs::read_to_string(dir.join("capacity")).await?;
    let percent: u8 = capacity
        .trim()
        .parse()
        .map_err(|_| SensorError::Protocol(format!("bad capacity {:?}", capacity.trim())))?;

    // A missing status file is treated as not charging.
    let status = tokio::fs::read_to_string(dir.join("status"))
        .await
        .unwrap_or_default();
    let is_charging = status.trim().eq_ignore_ascii_case("charging");

    Ok(BatteryReading::new(percent, is_charging))
}

#[async_trait]
impl BatteryProvider for SysfsBattery {
    async fn battery(&self) -> Option<BatteryReading> {
        match self.read().await {
            Ok(reading) => reading,
            Err(e) => {
                debug!("Battery unavailable: {}", e);
                None
            }
        }
    }
}
