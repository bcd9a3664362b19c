// Declare the modules, gated by their matching cargo features
#[cfg(feature = "configs")]
pub mod configs;
#[cfg(feature = "loggers")]
pub mod loggers;
#[cfg(feature = "utils")]
pub mod utils;
#[cfg(feature = "retrieve")]
pub mod retrieve;
#[cfg(feature = "players")]
pub mod players;
#[cfg(feature = "monitor")]
pub mod monitor;

// Re-export the commonly used types
#[cfg(feature = "configs")]
pub use configs::config_env::{MonitorConfig, MonitorConfigError};
#[cfg(feature = "loggers")]
pub use loggers::logsetup::setup_logging;
#[cfg(feature = "players")]
pub use players::differ::{diff_players, ChangeEvent};
#[cfg(feature = "players")]
pub use players::record::PlayerRecord;
#[cfg(feature = "players")]
pub use players::store::StatusStore;
#[cfg(feature = "monitor")]
pub use monitor::coordinator::{Monitor, MonitorError, RunMode, RunReport};
#[cfg(feature = "monitor")]
pub use monitor::source::{FourYouSeeSource, PlayerSource};
