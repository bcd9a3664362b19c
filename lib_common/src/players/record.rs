//! # Player Record
//!
//! The normalized observation of a single display device, as fetched from the
//! signage API and as persisted in the status snapshot. The snapshot format is
//! forward-compatible: unknown JSON fields are ignored and the derived fields
//! carry defaults, so older snapshots still load.

use serde::{Deserialize, Serialize};

/// One fetched/stored observation of a display device.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    /// Opaque stable identifier. Upstream integer ids are stringified.
    pub id: String,
    /// Human-readable label, unique within a fetch. Used as the comparison key.
    pub name: String,
    /// Free-text status label (e.g. "Online", "Offline"). Any string is valid.
    pub status: String,
    /// Human-readable elapsed-time string derived from `last_contact_minutes`.
    #[serde(default)]
    pub last_contact_descriptor: String,
    /// Raw minutes since last contact. `None` means the device never reported.
    #[serde(default)]
    pub last_contact_minutes: Option<i64>,
}

impl PlayerRecord {
    /// Builds a record, deriving the last-contact descriptor from the raw minutes.
    pub fn new(id: impl Into<String>, name: impl Into<String>, status: impl Into<String>, last_contact_minutes: Option<i64>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: status.into(),
            last_contact_descriptor: describe_last_contact(last_contact_minutes),
            last_contact_minutes,
        }
    }
}

/// Renders a raw minute count as a human elapsed-time string.
///
/// Boundaries: `None` -> "never contacted", `0` -> "now", below an hour the
/// minutes are shown as-is, below a day truncating hours, otherwise truncating
/// days. Negative counts never come from the API and are clamped to "now".
pub fn describe_last_contact(minutes: Option<i64>) -> String {
    match minutes {
        None => "never contacted".to_string(),
        Some(m) if m <= 0 => "now".to_string(),
        Some(m) if m < 60 => format!("{} minute(s) ago", m),
        Some(m) if m < 1440 => format!("{} hour(s) ago", m / 60),
        Some(m) => format!("{} day(s) ago", m / 1440),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_boundaries() {
        assert_eq!(describe_last_contact(None), "never contacted");
        assert_eq!(describe_last_contact(Some(0)), "now");
        assert_eq!(describe_last_contact(Some(1)), "1 minute(s) ago");
        assert_eq!(describe_last_contact(Some(59)), "59 minute(s) ago");
        assert_eq!(describe_last_contact(Some(60)), "1 hour(s) ago");
        assert_eq!(describe_last_contact(Some(1439)), "23 hour(s) ago");
        assert_eq!(describe_last_contact(Some(1440)), "1 day(s) ago");
        assert_eq!(describe_last_contact(Some(2880)), "2 day(s) ago");
    }

    #[test]
    fn new_derives_descriptor() {
        let record = PlayerRecord::new("42", "Lobby Screen", "Online", Some(90));
        assert_eq!(record.last_contact_descriptor, "1 hour(s) ago");
        assert_eq!(record.last_contact_minutes, Some(90));
    }

    #[test]
    fn snapshot_json_uses_camel_case_and_ignores_unknown_fields() {
        let json = r#"{
            "id": "7",
            "name": "Window Display",
            "status": "Offline",
            "lastContactDescriptor": "3 hour(s) ago",
            "lastContactMinutes": 180,
            "firmwareVersion": "2.1.0"
        }"#;
        let record: PlayerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Window Display");
        assert_eq!(record.last_contact_minutes, Some(180));
    }

    #[test]
    fn loads_records_missing_derived_fields() {
        // Older snapshots may predate the derived fields.
        let json = r#"{"id": "1", "name": "A", "status": "Online"}"#;
        let record: PlayerRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.last_contact_descriptor, "");
        assert_eq!(record.last_contact_minutes, None);
    }
}
