//! # Player Source
//!
//! The upstream collaborator that produces the current fleet state. The
//! concrete implementation talks to the 4YouSee signage API; the trait seam
//! exists so the coordinator can be exercised against canned data in tests.

use crate::players::record::{describe_last_contact, PlayerRecord};
use crate::retrieve::http::ApiClient;
use anyhow::{bail, Context, Result};
use reqwest::Method;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

/// Per-request timeout for the players endpoint.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Produces the current list of player records.
pub trait PlayerSource {
    /// Fetches all players. Any error aborts the run before diff or dispatch.
    fn fetch_players(&self) -> impl Future<Output = Result<Vec<PlayerRecord>>> + Send;
}

/// Response envelope of `GET /v1/players`.
#[derive(Debug, Deserialize)]
struct PlayersEnvelope {
    #[serde(default)]
    results: Vec<RawPlayer>,
}

/// One raw player object as the API returns it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlayer {
    id: Option<serde_json::Value>,
    name: Option<String>,
    player_status: Option<RawPlayerStatus>,
    last_contact_in_minutes: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawPlayerStatus {
    name: Option<String>,
}

/// Player source backed by the 4YouSee REST API.
///
/// Authenticates with the `Secret-Token` header and performs a single
/// best-effort attempt per run with a hard timeout.
pub struct FourYouSeeSource {
    client: ApiClient,
}

impl FourYouSeeSource {
    /// Creates the source against the given base URL and secret token.
    pub fn new(base_url: &str, api_token: &str) -> Result<Self> {
        let client = ApiClient::new(base_url, Some(("Secret-Token", api_token)), FETCH_TIMEOUT)?;
        Ok(Self { client })
    }
}

impl PlayerSource for FourYouSeeSource {
    async fn fetch_players(&self) -> Result<Vec<PlayerRecord>> {
        let response = self
            .client
            .request::<PlayersEnvelope, ()>(Method::GET, "v1/players", None, None)
            .await
            .context("players request failed")?;

        if !response.success {
            bail!(
                "players endpoint returned HTTP {}: {}",
                response.status,
                response.error_body.unwrap_or_default()
            );
        }

        let envelope = response
            .data
            .context("players endpoint returned an empty body")?;

        Ok(envelope.results.into_iter().map(normalize_player).collect())
    }
}

/// Normalizes a raw API player into the standardized record.
///
/// Missing fields degrade to placeholders rather than failing the fetch; a
/// half-described player is still worth monitoring.
fn normalize_player(raw: RawPlayer) -> PlayerRecord {
    let id = match raw.id {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };
    let name = raw.name.unwrap_or_else(|| "Unknown".to_string());
    let status = raw
        .player_status
        .and_then(|s| s.name)
        .unwrap_or_else(|| "Unknown".to_string());

    PlayerRecord {
        id,
        name,
        status,
        last_contact_descriptor: describe_last_contact(raw.last_contact_in_minutes),
        last_contact_minutes: raw.last_contact_in_minutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_a_complete_player() {
        let raw: RawPlayer = serde_json::from_str(
            r#"{
                "id": 17,
                "name": "Mall Entrance",
                "playerStatus": { "id": 1, "name": "Online" },
                "lastContactInMinutes": 0
            }"#,
        )
        .unwrap();
        let record = normalize_player(raw);
        assert_eq!(record.id, "17");
        assert_eq!(record.name, "Mall Entrance");
        assert_eq!(record.status, "Online");
        assert_eq!(record.last_contact_descriptor, "now");
    }

    #[test]
    fn missing_fields_degrade_to_placeholders() {
        let raw: RawPlayer = serde_json::from_str(r#"{"lastContactInMinutes": null}"#).unwrap();
        let record = normalize_player(raw);
        assert_eq!(record.id, "");
        assert_eq!(record.name, "Unknown");
        assert_eq!(record.status, "Unknown");
        assert_eq!(record.last_contact_descriptor, "never contacted");
    }

    #[test]
    fn envelope_tolerates_missing_results() {
        let envelope: PlayersEnvelope = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert!(envelope.results.is_empty());
    }
}
