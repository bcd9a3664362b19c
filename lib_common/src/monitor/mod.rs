//! # Fleet Monitor
//!
//! The run coordinator plus its collaborators: the 4YouSee player source and
//! the Telegram/Discord notification channels. The coordinator owns the
//! fetch -> diff -> persist -> dispatch pipeline; everything here is strictly
//! sequential per run and relies on per-call timeouts rather than retries.

pub mod coordinator;
pub mod discord;
pub mod source;
pub mod telegram;

pub use coordinator::{Monitor, MonitorError, RunMode, RunReport};
pub use discord::DiscordNotifier;
pub use source::{FourYouSeeSource, PlayerSource};
pub use telegram::TelegramNotifier;

/// Display emoji for a status label.
///
/// Classification is a case-insensitive substring match on "online" and
/// "offline"; it only affects presentation, never the diffing logic.
pub fn status_emoji(status: &str) -> &'static str {
    let lower = status.to_lowercase();
    if lower.contains("offline") {
        "❌"
    } else if lower.contains("online") {
        "✅"
    } else {
        "⚠️"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emoji_classification() {
        assert_eq!(status_emoji("Online"), "✅");
        assert_eq!(status_emoji("ONLINE"), "✅");
        assert_eq!(status_emoji("Offline"), "❌");
        assert_eq!(status_emoji("Partially offline"), "❌");
        assert_eq!(status_emoji("Updating"), "⚠️");
    }
}
