//! Gantry Telemetry - logging setup for Gantry tools.
//!
//! This crate provides configurable logging with multiple formats, built
//! on the tracing ecosystem. Output goes to stderr so interactive menus
//! and copied values keep stdout to themselves.
//!
//! # Example
//!
//! ```rust,no_run
//! use gantry_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), gantry_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("gantry_actions=trace");
//!
//! setup_logging(&config)?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, setup_default_logging, setup_logging};
