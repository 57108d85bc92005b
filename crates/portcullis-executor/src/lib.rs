//! Per-line scheduling engine for the Portcullis output controller.
//!
//! Each physical output subsystem (door lock, alarm siren, status lights) is
//! owned by a [`LineExecutor`] that serializes its tasks, reverts timed
//! actions, merges repeat triggers into a running hold and yields to
//! emergency overrides. The [`Coordinator`] wires the three executors
//! together and exposes the named operations callers use.
//!
//! # Features
//!
//! - **Serialized lines**: one worker task per line, FIFO per line
//! - **Timed auto-off**: `Timed` tasks write the level, then `Deassert`
//! - **Extension**: a timed trigger during a running hold adds to its deadline
//! - **Emergency lockout**: fire-alarm mode preempts and drops normal commands
//!
//! Write failures are logged and counted in [`LineStats`]; they never stop a
//! worker.

pub mod coordinator;
pub mod executor;

pub use coordinator::{Coordinator, Subsystem};
pub use executor::{DropReason, LineExecutor, LineStats, Submission};
