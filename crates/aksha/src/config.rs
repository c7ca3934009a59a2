//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use device_sensors::{DEFAULT_GPSD_ADDR, DEFAULT_POWER_SUPPLY_DIR};
use safety_core::DEFAULT_LOCATION_TIMEOUT;
use sms_dispatch::SmsPlatform;

/// Host-side configuration for the `aksha` binary.
///
/// Backend and assistant settings live in `ApiConfig` and
/// `CompletionsConfig`, which read their own variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where the auth token and cached profile are kept.
    pub state_dir: PathBuf,
    /// Address book export.
    pub contacts_file: PathBuf,
    /// Decides how `sms:` URIs join recipients.
    pub sms_platform: SmsPlatform,
    /// Program used to open `sms:` URIs instead of the system default.
    pub sms_opener: Option<String>,
    /// Bound on the fresh location fetch.
    pub location_timeout: Duration,
    /// gpsd address.
    pub gpsd_addr: String,
    /// sysfs power-supply directory.
    pub power_supply_dir: PathBuf,
    /// Foreground tracking interval in `session`.
    pub tracking_interval: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `AKSHA_STATE_DIR` | Token and profile storage | `$HOME/.aksha` |
    /// | `AKSHA_CONTACTS_FILE` | Contacts JSON | `<state dir>/contacts.json` |
    /// | `AKSHA_SMS_PLATFORM` | `android` or `ios` | `android` |
    /// | `AKSHA_SMS_OPENER` | URI opener program | system default |
    /// | `AKSHA_LOCATION_TIMEOUT_MS` | Fresh fix bound | `3000` |
    /// | `AKSHA_GPSD_ADDR` | gpsd address | `127.0.0.1:2947` |
    /// | `AKSHA_POWER_SUPPLY_DIR` | Battery sysfs dir | `/sys/class/power_supply` |
    /// | `AKSHA_TRACKING_INTERVAL_SECS` | Session tracking interval | `5` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let state_dir = match env::var("AKSHA_STATE_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => env::var("HOME")
                .map(|home| PathBuf::from(home).join(".aksha"))
                .unwrap_or_else(|_| PathBuf::from(".aksha")),
        };

        let contacts_file = env::var("AKSHA_CONTACTS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| state_dir.join("contacts.json"));

        let sms_platform = match env::var("AKSHA_SMS_PLATFORM") {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::invalid("AKSHA_SMS_PLATFORM", &value))?,
            Err(_) => SmsPlatform::default(),
        };

        let sms_opener = env::var("AKSHA_SMS_OPENER")
            .ok()
            .filter(|p| !p.trim().is_empty());

        let location_timeout = match env::var("AKSHA_LOCATION_TIMEOUT_MS") {
            Ok(value) => value
                .parse()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::invalid("AKSHA_LOCATION_TIMEOUT_MS", &value))?,
            Err(_) => DEFAULT_LOCATION_TIMEOUT,
        };

        let gpsd_addr =
            env::var("AKSHA_GPSD_ADDR").unwrap_or_else(|_| DEFAULT_GPSD_ADDR.to_string());

        let power_supply_dir = env::var("AKSHA_POWER_SUPPLY_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_POWER_SUPPLY_DIR));

        let tracking_interval = match env::var("AKSHA_TRACKING_INTERVAL_SECS") {
            Ok(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::invalid("AKSHA_TRACKING_INTERVAL_SECS", &value)),
            },
            Err(_) => Duration::from_secs(5),
        };

        Ok(Self {
            state_dir,
            contacts_file,
            sms_platform,
            sms_opener,
            location_timeout,
            gpsd_addr,
            power_supply_dir,
            tracking_interval,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

impl ConfigError {
    fn invalid(var: &'static str, value: &str) -> Self {
        ConfigError::Invalid {
            var,
            value: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global; keep every scenario in one test.
    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        const VARS: [&str; 8] = [
            "AKSHA_STATE_DIR",
            "AKSHA_CONTACTS_FILE",
            "AKSHA_SMS_PLATFORM",
            "AKSHA_SMS_OPENER",
            "AKSHA_LOCATION_TIMEOUT_MS",
            "AKSHA_GPSD_ADDR",
            "AKSHA_POWER_SUPPLY_DIR",
            "AKSHA_TRACKING_INTERVAL_SECS",
        ];
        for var in VARS {
            env::remove_var(var);
        }

        env::set_var("AKSHA_STATE_DIR", "/tmp/aksha-test");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.contacts_file, PathBuf::from("/tmp/aksha-test/contacts.json"));
        assert_eq!(config.sms_platform, SmsPlatform::Android);
        assert_eq!(config.location_timeout, Duration::from_millis(3000));
        assert_eq!(config.gpsd_addr, "127.0.0.1:2947");
        assert_eq!(config.tracking_interval, Duration::from_secs(5));
        assert!(config.sms_opener.is_none());

        env::set_var("AKSHA_SMS_PLATFORM", "iOS");
        env::set_var("AKSHA_LOCATION_TIMEOUT_MS", "1500");
        env::set_var("AKSHA_SMS_OPENER", "echo");
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.sms_platform, SmsPlatform::Ios);
        assert_eq!(config.location_timeout, Duration::from_millis(1500));
        assert_eq!(config.sms_opener.as_deref(), Some("echo"));

        env::set_var("AKSHA_SMS_PLATFORM", "blackberry");
        assert!(matches!(
            AppConfig::from_env(),
            Err(ConfigError::Invalid { var: "AKSHA_SMS_PLATFORM", .. })
        ));
        env::remove_var("AKSHA_SMS_PLATFORM");

        env::set_var("AKSHA_TRACKING_INTERVAL_SECS", "0");
        assert!(AppConfig::from_env().is_err());

        for var in VARS {
            env::remove_var(var);
        }
    }
}
