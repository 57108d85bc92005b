//! Line driver trait definition.

use crate::error::Result;
use portcullis_core::{Level, LineId};

/// Something that can drive a logic level onto an output line.
///
/// Implementations must be cheap to clone and safe to share between the
/// executor tasks of different lines. A write either lands or fails; there is
/// no partial state.
///
/// # Examples
///
/// ```
/// use portcullis_core::{Level, LineId};
/// use portcullis_hardware::{LineDriver, Result};
///
/// fn pulse<D: LineDriver>(driver: &D, line: &LineId) -> Result<()> {
///     driver.write(line, Level::Assert)?;
///     driver.write(line, Level::Deassert)
/// }
/// ```
pub trait LineDriver: Send + Sync {
    /// Write `level` to `line`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node is missing, not writable, or the write
    /// itself fails.
    fn write(&self, line: &LineId, level: Level) -> Result<()>;

    /// Short human-readable driver name for logs.
    fn name(&self) -> &str;
}
