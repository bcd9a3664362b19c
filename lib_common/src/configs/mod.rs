//! # Configuration Modules
//!
//! Aggregates the configuration providers used by the monitor binaries.

/// Environment-sourced monitor configuration, built once at process start.
pub mod config_env;
