//! # Telegram Notification Channel
//!
//! Sends alert and summary messages through the Telegram bot API as plain
//! blocking-per-run HTTP calls with a timeout. Rendering is split into pure
//! functions so the message bodies are testable without a network.

use crate::monitor::status_emoji;
use crate::players::differ::ChangeEvent;
use crate::players::record::PlayerRecord;
use anyhow::{bail, Context, Result};
use serde_json::json;
use std::time::Duration;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Telegram bot channel bound to one destination chat.
pub struct TelegramNotifier {
    token: String,
    chat_id: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    /// Creates the channel. The client carries the per-call timeout.
    pub fn new(token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            chat_id: chat_id.into(),
            client: reqwest::Client::builder()
                .timeout(SEND_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Sends the delta alert for the given changes.
    pub async fn send_alert(&self, changes: &[ChangeEvent], scanned_at: &str) -> Result<()> {
        self.send_text(&render_alert(changes, scanned_at)).await
    }

    /// Sends the full-roster summary.
    pub async fn send_summary(&self, players: &[PlayerRecord], scanned_at: &str) -> Result<()> {
        self.send_text(&render_summary(players, scanned_at)).await
    }

    async fn send_text(&self, text: &str) -> Result<()> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.token);
        let response = self
            .client
            .post(&url)
            .json(&json!({
                "chat_id": self.chat_id,
                "text": text,
                "parse_mode": "Markdown",
            }))
            .send()
            .await
            .context("telegram sendMessage request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("telegram API returned HTTP {}: {}", status, body);
        }
        Ok(())
    }
}

/// Renders the Markdown alert body for a set of status changes.
pub fn render_alert(changes: &[ChangeEvent], scanned_at: &str) -> String {
    let mut text = String::from("🚨 *Status Change Alert*\n");
    text.push_str(&format!("⏰ {}\n\n", scanned_at));

    for change in changes {
        text.push_str(&format!(
            "{} *[{}] {}* \n",
            status_emoji(&change.current),
            change.id,
            change.name
        ));
        text.push_str(&format!(
            "   Status: {} → {}\n",
            change.previous, change.current
        ));
        text.push_str(&format!("   🕐 Last Contact: {}\n\n", change.last_contact));
    }

    text
}

/// Renders the Markdown full-roster summary body.
pub fn render_summary(players: &[PlayerRecord], scanned_at: &str) -> String {
    let mut text = String::from("📊 *Fleet Status Report*\n");
    text.push_str(&format!("⏰ {}\n\n", scanned_at));

    for player in players {
        text.push_str(&format!(
            "\n{} *[{}] {}* - Status: {}\n",
            status_emoji(&player.status),
            player.id,
            player.name,
            player.status
        ));
        text.push_str(&format!(
            "  Last Contact: {}\n",
            player.last_contact_descriptor
        ));
    }

    text.push_str(&format!("\n📊 Total Players: {}", players.len()));
    text
}
