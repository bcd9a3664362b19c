/// Implements the shared fern/log dispatcher used by the workspace binaries.
pub mod logsetup;

pub use logsetup::setup_logging;
