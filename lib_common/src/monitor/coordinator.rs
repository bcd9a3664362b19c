//! # Run Coordinator
//!
//! Orchestrates one monitoring run: fetch the current fleet, then either diff
//! against the persisted snapshot and alert on changes (delta mode) or send
//! the full roster (summary mode).
//!
//! Error policy: only an upstream fetch failure aborts the run. Snapshot
//! write failures and notification channel failures are logged and absorbed,
//! and each channel is attempted independently of the other.

use crate::configs::config_env::MonitorConfig;
use crate::monitor::discord::DiscordNotifier;
use crate::monitor::source::PlayerSource;
use crate::monitor::telegram::TelegramNotifier;
use crate::players::differ::diff_players;
use crate::players::record::PlayerRecord;
use crate::players::store::StatusStore;
use crate::utils::timefmt::scan_timestamp;
use log::{error, info};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The two recognized run modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Diff against the previous snapshot, persist, alert only on changes.
    #[default]
    Delta,
    /// Send the full roster; never touches the persisted snapshot.
    Summary,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Delta => write!(f, "delta"),
            RunMode::Summary => write!(f, "summary"),
        }
    }
}

/// Raised for a mode selector outside the recognized set.
#[derive(Debug, Error)]
#[error("unrecognized mode '{0}' (expected 'delta' or 'summary')")]
pub struct UnknownMode(String);

impl FromStr for RunMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delta" => Ok(RunMode::Delta),
            "summary" => Ok(RunMode::Summary),
            other => Err(UnknownMode(other.to_string())),
        }
    }
}

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// The player source produced no usable data. Nothing was mutated and no
    /// notification was sent.
    #[error("player source fetch failed: {0}")]
    Fetch(anyhow::Error),
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Copy)]
pub struct RunReport {
    /// The mode that was executed.
    pub mode: RunMode,
    /// Number of players in the fetch.
    pub players: usize,
    /// Number of detected changes (always zero in summary mode).
    pub changes: usize,
}

impl RunReport {
    /// Human-readable one-line result for the trigger caller.
    pub fn message(&self) -> String {
        match self.mode {
            RunMode::Delta => format!(
                "delta run completed: {} change(s) across {} player(s)",
                self.changes, self.players
            ),
            RunMode::Summary => format!(
                "summary run completed: {} player(s) reported",
                self.players
            ),
        }
    }
}

/// The fetch -> diff -> persist -> dispatch pipeline.
///
/// Constructed once from the configuration and shared across triggers; every
/// run executes sequentially to completion.
pub struct Monitor<S> {
    source: S,
    store: StatusStore,
    telegram: Option<TelegramNotifier>,
    discord: Option<DiscordNotifier>,
    timezone: String,
}

impl<S: PlayerSource> Monitor<S> {
    /// Wires the coordinator from the process configuration.
    ///
    /// Channels with missing credentials are left unconfigured and skipped at
    /// dispatch time.
    pub fn from_config(config: &MonitorConfig, source: S) -> Self {
        let telegram = match (&config.telegram_token, &config.telegram_chat_id) {
            (Some(token), Some(chat_id)) => {
                Some(TelegramNotifier::new(token.as_str(), chat_id.as_str()))
            }
            _ => None,
        };
        let discord = config
            .discord_webhook_url
            .as_deref()
            .map(DiscordNotifier::new);

        Self {
            source,
            store: StatusStore::new(&config.status_file),
            telegram,
            discord,
            timezone: config.timezone.clone(),
        }
    }

    /// Wires the coordinator from its parts. Used by tests and custom setups.
    pub fn new(
        source: S,
        store: StatusStore,
        telegram: Option<TelegramNotifier>,
        discord: Option<DiscordNotifier>,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            source,
            store,
            telegram,
            discord,
            timezone: timezone.into(),
        }
    }

    /// Executes one run in the given mode.
    ///
    /// A fetch failure aborts before either mode's logic: no state mutation,
    /// no notification.
    pub async fn run(&self, mode: RunMode) -> Result<RunReport, MonitorError> {
        let players = self
            .source
            .fetch_players()
            .await
            .map_err(MonitorError::Fetch)?;
        let scanned_at = scan_timestamp(&self.timezone);
        info!("{} run: {} player(s) fetched", mode, players.len());

        let report = match mode {
            RunMode::Delta => self.run_delta(&players, &scanned_at).await,
            RunMode::Summary => self.run_summary(&players, &scanned_at).await,
        };
        Ok(report)
    }

    /// Delta mode: diff, persist unconditionally, alert only on changes.
    async fn run_delta(&self, players: &[PlayerRecord], scanned_at: &str) -> RunReport {
        let previous = self.store.load();
        let changes = diff_players(players, &previous);

        // This is the point at which state persists, changes or not. A write
        // failure must not block the alert below.
        if let Err(e) = self.store.save(players) {
            error!("Failed to persist status snapshot: {}", e);
        }

        if changes.is_empty() {
            info!("No status changes detected; staying silent");
        } else {
            info!("{} status change(s) detected; dispatching alert", changes.len());
            if let Some(discord) = &self.discord {
                if let Err(e) = discord.send_alert(&changes, scanned_at).await {
                    error!("Discord alert failed: {}", e);
                }
            }
            if let Some(telegram) = &self.telegram {
                if let Err(e) = telegram.send_alert(&changes, scanned_at).await {
                    error!("Telegram alert failed: {}", e);
                }
            }
        }

        RunReport {
            mode: RunMode::Delta,
            players: players.len(),
            changes: changes.len(),
        }
    }

    /// Summary mode: full roster to every configured channel, no state I/O.
    async fn run_summary(&self, players: &[PlayerRecord], scanned_at: &str) -> RunReport {
        if let Some(discord) = &self.discord {
            if let Err(e) = discord.send_summary(players, scanned_at).await {
                error!("Discord summary failed: {}", e);
            }
        }
        if let Some(telegram) = &self.telegram {
            if let Err(e) = telegram.send_summary(players, scanned_at).await {
                error!("Telegram summary failed: {}", e);
            }
        }

        RunReport {
            mode: RunMode::Summary,
            players: players.len(),
            changes: 0,
        }
    }
}
