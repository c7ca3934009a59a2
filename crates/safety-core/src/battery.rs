//! Battery telemetry embedded in alerts.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Battery state sampled at alert time. Advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryReading {
    /// Charge level, 0-100.
    pub percent: u8,
    /// Whether the device is plugged in.
    pub is_charging: bool,
}

impl BatteryReading {
    /// Create a reading; `percent` is clamped to 100.
    pub fn new(percent: u8, is_charging: bool) -> Self {
        Self {
            percent: percent.min(100),
            is_charging,
        }
    }

    /// Create a reading from a 0.0-1.0 level as reported by mobile SDKs.
    pub fn from_level(level: f32, is_charging: bool) -> Self {
        let percent = (level.clamp(0.0, 1.0) * 100.0).round() as u8;
        Self::new(percent, is_charging)
    }
}

/// Source of battery telemetry.
#[async_trait]
pub trait BatteryProvider: Send + Sync {
    /// Sample the battery. `None` when the host exposes no battery.
    async fn battery(&self) -> Option<BatteryReading>;
}

/// Provider for hosts without battery telemetry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBattery;

#[async_trait]
impl BatteryProvider for NoBattery {
    async fn battery(&self) -> Option<BatteryReading> {
        None
    }
}
