//! # Data Retrieval Module
//!
//! A centralized location for generic HTTP data retrieval. Specific API
//! adapters (the 4YouSee player source) build on the client here and keep
//! their own parsing and business logic out of the networking layer.
//!
//! Every request carries a hard timeout and is attempted exactly once: the
//! external scheduler re-triggers the pipeline anyway, so retrying inside a
//! run only delays the next one.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms, unused_qualifications)]

/// Generic HTTP API client with base-URL joining and header auth.
pub mod http;

pub use http::{ApiClient, ApiResponse};
