//! Core types for the Portcullis output-line controller.
//!
//! This crate holds the pieces every other crate in the workspace agrees on:
//! the [`Task`] model describing one desired output action, the
//! [`GpioConfig`] naming the control nodes, shared timing constants, and the
//! core [`Error`] type.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use config::GpioConfig;
pub use error::{Error, Result};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
