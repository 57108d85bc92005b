//! Line controller configuration.
//!
//! [`GpioConfig`] names the control node behind every output and the timing
//! knobs of the executors. Every field has a default, so a partial JSON
//! document only needs the values that differ from [`constants`](crate::constants).
//!
//! # Examples
//!
//! ```
//! use portcullis_core::GpioConfig;
//!
//! let config = GpioConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(config.poll_interval_ms, 50);
//! ```

use crate::constants::{
    DEFAULT_BOOT_LIGHT_MS, DEFAULT_FEEDBACK_PACE_MS, DEFAULT_POLL_INTERVAL_MS,
    MAX_POLL_INTERVAL_MS, NODE_ALARM, NODE_DOOR, NODE_LIGHT_GREEN, NODE_LIGHT_RED,
    NODE_LIGHT_WHITE,
};
use crate::{Error, LineId, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpioConfig {
    /// Door lock control node.
    pub door_node: String,

    /// Alarm siren control node.
    pub alarm_node: String,

    /// White status light control node.
    pub light_white_node: String,

    /// Green status light control node.
    pub light_green_node: String,

    /// Red status light control node.
    pub light_red_node: String,

    /// Slice length for timed waits, 1-100ms.
    pub poll_interval_ms: u64,

    /// White light duration after boot.
    pub boot_light_ms: u64,

    /// Spacing between recognition feedback flashes.
    pub feedback_pace_ms: u64,
}

impl Default for GpioConfig {
    fn default() -> Self {
        Self {
            door_node: NODE_DOOR.to_string(),
            alarm_node: NODE_ALARM.to_string(),
            light_white_node: NODE_LIGHT_WHITE.to_string(),
            light_green_node: NODE_LIGHT_GREEN.to_string(),
            light_red_node: NODE_LIGHT_RED.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            boot_light_ms: DEFAULT_BOOT_LIGHT_MS,
            feedback_pace_ms: DEFAULT_FEEDBACK_PACE_MS,
        }
    }
}

impl GpioConfig {
    /// Check node paths and timing bounds.
    ///
    /// # Errors
    /// Returns `Error::Config` if a node path is blank or the poll interval
    /// is outside 1-100ms.
    pub fn validate(&self) -> Result<()> {
        let nodes = [
            ("door_node", &self.door_node),
            ("alarm_node", &self.alarm_node),
            ("light_white_node", &self.light_white_node),
            ("light_green_node", &self.light_green_node),
            ("light_red_node", &self.light_red_node),
        ];
        if let Some((name, _)) = nodes.iter().find(|(_, node)| node.trim().is_empty()) {
            return Err(Error::Config(format!("{name} must not be empty")));
        }

        if !(1..=MAX_POLL_INTERVAL_MS).contains(&self.poll_interval_ms) {
            return Err(Error::Config(format!(
                "poll_interval_ms must be 1-{MAX_POLL_INTERVAL_MS}, got {}",
                self.poll_interval_ms
            )));
        }

        Ok(())
    }

    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    #[must_use]
    pub fn boot_light(&self) -> Duration {
        Duration::from_millis(self.boot_light_ms)
    }

    #[must_use]
    pub fn feedback_pace(&self) -> Duration {
        Duration::from_millis(self.feedback_pace_ms)
    }

    #[must_use]
    pub fn door(&self) -> LineId {
        LineId::new(self.door_node.as_str())
    }

    #[must_use]
    pub fn alarm(&self) -> LineId {
        LineId::new(self.alarm_node.as_str())
    }

    #[must_use]
    pub fn light_white(&self) -> LineId {
        LineId::new(self.light_white_node.as_str())
    }

    #[must_use]
    pub fn light_green(&self) -> LineId {
        LineId::new(self.light_green_node.as_str())
    }

    #[must_use]
    pub fn light_red(&self) -> LineId {
        LineId::new(self.light_red_node.as_str())
    }
}
