//! CLI command implementations.

pub(crate) mod actions;
pub(crate) mod config;
pub(crate) mod run;
