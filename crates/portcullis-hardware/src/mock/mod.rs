//! Mock driver implementation for testing and development.
//!
//! This module provides an in-memory line driver that records every write
//! and can be told to fail, so the scheduling engine can be exercised
//! without physical hardware.

pub mod line;

// Re-export commonly used types
pub use line::{LineWrite, MockDriver, MockDriverHandle};
