//! Sysfs GPIO driver.
//!
//! Writes `"1"` or `"0"` to the node path, the way the kernel's sysfs GPIO
//! interface expects (`/sys/class/gpio/gpioN/value`). Exporting the pin and
//! setting its direction is done by the platform before this process starts.

use crate::error::{LineWriteError, Result};
use crate::traits::LineDriver;
use portcullis_core::{Level, LineId};
use tracing::trace;

#[derive(Debug, Clone, Default)]
pub struct SysfsDriver {
    _private: (),
}

impl SysfsDriver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LineDriver for SysfsDriver {
    fn write(&self, line: &LineId, level: Level) -> Result<()> {
        trace!("sysfs write {} -> {}", line, level);
        std::fs::write(line.as_str(), level.as_str())
            .map_err(|e| LineWriteError::io(line.as_str(), e))
    }

    fn name(&self) -> &str {
        "sysfs"
    }
}
