//! Output line write primitive for the Portcullis controller.
//!
//! This crate provides the one operation the scheduling engine needs from the
//! hardware: drive a logic level onto a control node. Everything is built
//! around the [`LineDriver`] trait so real sysfs nodes and in-memory mocks can
//! be swapped freely.
//!
//! # Design Philosophy
//!
//! - **Synchronous**: a sysfs `value` write completes in microseconds, so the
//!   primitive is a plain blocking call with no async machinery.
//! - **Fire-and-forget**: callers log a failed write and move on; nothing in
//!   this crate retries.
//! - **Shareable**: drivers are `Clone + Send + Sync` so one driver can back
//!   several executors.
//!
//! # Example
//!
//! ```
//! use portcullis_core::{Level, LineId};
//! use portcullis_hardware::{AnyLineDriver, LineDriver, mock::MockDriver};
//!
//! let (mock, handle) = MockDriver::new();
//! let driver = AnyLineDriver::Mock(mock);
//!
//! let door = LineId::new("/sys/class/gpio/gpio1/value");
//! driver.write(&door, Level::Assert).unwrap();
//!
//! assert_eq!(handle.levels(&door), vec![Level::Assert]);
//! ```
//!
//! # Error Handling
//!
//! All writes return [`Result<()>`][error::Result] carrying a
//! [`LineWriteError`] that names the node which failed.

pub mod devices;
pub mod error;
pub mod mock;
pub mod sysfs;
pub mod traits;

pub use devices::AnyLineDriver;
pub use error::{LineWriteError, Result};
pub use sysfs::SysfsDriver;
pub use traits::LineDriver;
