//! # Discord Notification Channel
//!
//! Posts alert and summary embeds to a Discord webhook. Discord hard-caps an
//! embed at 25 fields, so overflowing rosters are summarized in a final
//! field instead of being dropped silently.

use crate::monitor::status_emoji;
use crate::players::differ::ChangeEvent;
use crate::players::record::PlayerRecord;
use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use std::time::Duration;

const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Embed color for delta alerts (red).
const ALERT_COLOR: u32 = 16711680;
/// Embed color for roster summaries (green).
const SUMMARY_COLOR: u32 = 3066993;
/// Discord's hard cap on fields per embed.
const EMBED_FIELD_CAP: usize = 25;

/// Discord webhook channel.
pub struct DiscordNotifier {
    webhook_url: String,
    client: reqwest::Client,
}

impl DiscordNotifier {
    /// Creates the channel against the given webhook URL.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            client: reqwest::Client::builder()
                .timeout(SEND_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Posts the delta alert embed.
    pub async fn send_alert(&self, changes: &[ChangeEvent], scanned_at: &str) -> Result<()> {
        self.send_embed(alert_embed(changes, scanned_at)).await
    }

    /// Posts the full-roster summary embed.
    pub async fn send_summary(&self, players: &[PlayerRecord], scanned_at: &str) -> Result<()> {
        self.send_embed(summary_embed(players, scanned_at)).await
    }

    async fn send_embed(&self, embed: Value) -> Result<()> {
        let payload = json!({ "embeds": [embed] });
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await
            .context("discord webhook request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("discord webhook returned HTTP {}: {}", status, body);
        }
        Ok(())
    }
}

/// Builds the alert embed for a set of status changes.
pub fn alert_embed(changes: &[ChangeEvent], scanned_at: &str) -> Value {
    let fields: Vec<Value> = changes
        .iter()
        .map(|change| {
            json!({
                "name": format!(
                    "{} ID:[{}] - {}",
                    status_emoji(&change.current),
                    change.id,
                    change.name
                ),
                "value": format!(
                    "**From:** {}\n**To:** **{}**\n**Last Contact:** {}",
                    change.previous, change.current, change.last_contact
                ),
                "inline": false,
            })
        })
        .collect();

    json!({
        "title": "🚨 Status Change Alert",
        "description": format!(
            "⏰ **Scan:** {}\nTotal changes: {}",
            scanned_at,
            changes.len()
        ),
        "color": ALERT_COLOR,
        "fields": cap_fields(fields, changes.len(), "change(s)"),
    })
}

/// Builds the full-roster summary embed.
pub fn summary_embed(players: &[PlayerRecord], scanned_at: &str) -> Value {
    let fields: Vec<Value> = players
        .iter()
        .map(|player| {
            json!({
                "name": format!(
                    "{} ID:[{}] - {}",
                    status_emoji(&player.status),
                    player.id,
                    player.name
                ),
                "value": format!(
                    "Status: **{}**\nLast Contact: {}",
                    player.status, player.last_contact_descriptor
                ),
                "inline": true,
            })
        })
        .collect();

    json!({
        "title": "📊 Fleet Status Report",
        "description": format!(
            "⏰ **Scan:** {}\nTotal Players: **{}**",
            scanned_at,
            players.len()
        ),
        "color": SUMMARY_COLOR,
        "fields": cap_fields(fields, players.len(), "player(s)"),
    })
}

/// Enforces the embed field cap, summarizing the overflow in a final field.
fn cap_fields(mut fields: Vec<Value>, total: usize, noun: &str) -> Vec<Value> {
    if fields.len() > EMBED_FIELD_CAP {
        fields.truncate(EMBED_FIELD_CAP - 1);
        fields.push(json!({
            "name": "...",
            "value": format!("And {} more {}.", total - (EMBED_FIELD_CAP - 1), noun),
            "inline": false,
        }));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(count: usize) -> Vec<PlayerRecord> {
        (0..count)
            .map(|i| PlayerRecord::new(i.to_string(), format!("Player {}", i), "Online", Some(0)))
            .collect()
    }

    #[test]
    fn alert_embed_is_red_with_one_field_per_change() {
        let changes = vec![ChangeEvent {
            id: "1".to_string(),
            name: "Lobby".to_string(),
            previous: "Online".to_string(),
            current: "Offline".to_string(),
            last_contact: "5 minute(s) ago".to_string(),
        }];
        let embed = alert_embed(&changes, "01/02/2024 10:00:00");
        assert_eq!(embed["color"], 16711680);
        assert_eq!(embed["fields"].as_array().unwrap().len(), 1);
        assert!(embed["fields"][0]["name"]
            .as_str()
            .unwrap()
            .starts_with("❌"));
    }

    #[test]
    fn summary_embed_within_cap_keeps_all_fields() {
        let embed = summary_embed(&roster(25), "01/02/2024 10:00:00");
        assert_eq!(embed["fields"].as_array().unwrap().len(), 25);
    }

    #[test]
    fn summary_embed_overflow_is_summarized() {
        let embed = summary_embed(&roster(30), "01/02/2024 10:00:00");
        let fields = embed["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 25);
        let overflow = &fields[24];
        assert_eq!(overflow["name"], "...");
        assert_eq!(overflow["value"], "And 6 more player(s).");
    }
}
