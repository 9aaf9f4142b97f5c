use std::time::Duration;

use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};

pub const DEFAULT_IO_TIMEOUT_MS:u32 = 10000;
pub const DEFAULT_LOCK_TIMEOUT_MS:u32 = 10000;
pub const DEFAULT_DEVICE_NAME:&str = "inst0";

/// Connection settings passed to `DS2000::connect`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Log every command and reply at debug level.
	pub log_traffic: bool,
	/// Pause before each command is sent; some firmware drops commands that arrive back to back.
	pub tx_throttle_ms: u64,
	pub io_timeout_ms: u32,
	pub lock_timeout_ms: u32,
	/// VXI-11 logical device name used when creating the link.
	pub device_name: String,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			log_traffic: false,
			tx_throttle_ms: 0,
			io_timeout_ms: DEFAULT_IO_TIMEOUT_MS,
			lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
			device_name: DEFAULT_DEVICE_NAME.to_owned(),
		}
	}
}

impl Config {
	pub fn from_json_str(s:&str) -> Result<Self> {
		let config:Config = serde_json::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
		if !config.device_name.is_ascii() {
			return Err(Error::Config("device name must be ASCII".to_owned()));
		}
		Ok(config)
	}

	pub fn tx_throttle(&self) -> Duration { Duration::from_millis(self.tx_throttle_ms) }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_fields_take_defaults() {
		let c = Config::from_json_str(r#"{ "log_traffic": true, "tx_throttle_ms": 100 }"#).unwrap();
		assert!(c.log_traffic);
		assert_eq!(c.tx_throttle(), Duration::from_millis(100));
		assert_eq!(c.device_name, "inst0");
		assert_eq!(c.io_timeout_ms, DEFAULT_IO_TIMEOUT_MS);
	}

	#[test]
	fn rejects_non_ascii_device_name() {
		assert!(Config::from_json_str(r#"{ "device_name": "inst√" }"#).is_err());
	}

	#[test]
	fn rejects_malformed_json() {
		assert!(Config::from_json_str("{ log_traffic").is_err());
	}
}
