//! Host-side sources for the Aksha SOS path.
//!
//! On a phone these come from platform SDKs. On a Linux host:
//!
//! - [`GpsdProvider`] - Location from a gpsd daemon
//! - [`FixedLocationProvider`] - Coordinates supplied by the user
//! - [`SysfsBattery`] - Battery state from `/sys/class/power_supply`
//! - [`JsonContactStore`] - Address book exported as JSON

mod battery;
mod contacts;
mod error;
mod fixed;
mod gpsd;

pub use battery::{SysfsBattery, DEFAULT_POWER_SUPPLY_DIR};
pub use contacts::JsonContactStore;
pub use error::SensorError;
pub use fixed::FixedLocationProvider;
pub use gpsd::{parse_report, GpsdProvider, DEFAULT_GPSD_ADDR};
