//! Enum wrapper for line driver dispatch.
//!
//! Executors are spawned with a concrete driver value rather than a trait
//! object. The enum keeps dispatch static and lets new backends be added
//! behind feature flags without touching executor code.
//!
//! # Examples
//!
//! ```
//! use portcullis_hardware::{AnyLineDriver, LineDriver};
//! use portcullis_hardware::mock::MockDriver;
//!
//! let (mock, _handle) = MockDriver::new();
//! let driver = AnyLineDriver::Mock(mock);
//! assert_eq!(driver.name(), "mock");
//! ```

use crate::mock::MockDriver;
use crate::sysfs::SysfsDriver;
use crate::traits::LineDriver;
use crate::Result;
use portcullis_core::{Level, LineId};

#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum AnyLineDriver {
    /// Kernel sysfs GPIO nodes.
    Sysfs(SysfsDriver),

    /// In-memory recorder for development and testing.
    Mock(MockDriver),
}

impl LineDriver for AnyLineDriver {
    fn write(&self, line: &LineId, level: Level) -> Result<()> {
        match self {
            Self::Sysfs(driver) => driver.write(line, level),
            Self::Mock(driver) => driver.write(line, level),
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Sysfs(driver) => driver.name(),
            Self::Mock(driver) => driver.name(),
        }
    }
}

impl From<SysfsDriver> for AnyLineDriver {
    fn from(driver: SysfsDriver) -> Self {
        Self::Sysfs(driver)
    }
}

impl From<MockDriver> for AnyLineDriver {
    fn from(driver: MockDriver) -> Self {
        Self::Mock(driver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_to_mock() {
        let (mock, handle) = MockDriver::new();
        let driver: AnyLineDriver = mock.into();
        let line = LineId::new("/mock/light");

        driver.write(&line, Level::Assert).unwrap();

        assert_eq!(handle.levels(&line), vec![Level::Assert]);
    }

    #[test]
    fn test_driver_names() {
        assert_eq!(AnyLineDriver::from(SysfsDriver::new()).name(), "sysfs");
        assert_eq!(AnyLineDriver::from(MockDriver::default()).name(), "mock");
    }
}
