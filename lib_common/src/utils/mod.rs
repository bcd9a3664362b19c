//! # Utilities Module
//!
//! Small general-purpose helpers shared across the crate.

/// Timezone-aware timestamp formatting for notification headers.
pub mod timefmt;

pub use timefmt::scan_timestamp;
