//! # Status Differ
//!
//! Compares the freshly fetched player list against the previous snapshot and
//! produces one change event per transition. Players never seen before are
//! reported with the `NEW` sentinel as their previous status. Players that
//! disappeared from the fetch produce no event: the differ only reports
//! transitions for players that are currently visible.

use crate::players::record::PlayerRecord;
use log::info;
use std::collections::HashMap;

/// Sentinel used as the previous status for players absent from the snapshot.
pub const NEW_STATUS: &str = "NEW";

/// A single status transition, derived per run and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    /// The player's stable identifier.
    pub id: String,
    /// The player's name (the comparison key).
    pub name: String,
    /// Status at the previous poll, or [`NEW_STATUS`] if unseen.
    pub previous: String,
    /// Status at the current poll.
    pub current: String,
    /// Human-readable last-contact descriptor of the current record.
    pub last_contact: String,
}

/// Diffs the current fetch against the previous name -> status mapping.
///
/// Output order follows the iteration order of `current` (the fetch result's
/// insertion order, not sorted). Status comparison is exact, case-sensitive
/// string inequality. The returned list is empty if and only if no record's
/// status differs from the last observation and no record is new.
pub fn diff_players(
    current: &[PlayerRecord],
    previous: &HashMap<String, String>,
) -> Vec<ChangeEvent> {
    let mut changes = Vec::new();

    for record in current {
        let prior = previous.get(&record.name).map(String::as_str);
        match prior {
            Some(status) if status == record.status => continue,
            _ => {
                let previous_status = prior.unwrap_or(NEW_STATUS).to_string();
                info!(
                    "Status change: [{}] {}: {} -> {}",
                    record.id, record.name, previous_status, record.status
                );
                changes.push(ChangeEvent {
                    id: record.id.clone(),
                    name: record.name.clone(),
                    previous: previous_status,
                    current: record.status.clone(),
                    last_contact: record.last_contact_descriptor.clone(),
                });
            }
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(name, status)| (name.to_string(), status.to_string()))
            .collect()
    }

    #[test]
    fn equal_statuses_produce_no_events() {
        let current = vec![PlayerRecord::new("1", "A", "Online", Some(0))];
        let changes = diff_players(&current, &snapshot(&[("A", "Online")]));
        assert!(changes.is_empty());
    }

    #[test]
    fn unseen_players_are_reported_as_new() {
        let current = vec![
            PlayerRecord::new("1", "A", "Online", Some(0)),
            PlayerRecord::new("2", "B", "Offline", None),
        ];
        let changes = diff_players(&current, &HashMap::new());
        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(|c| c.previous == NEW_STATUS));
    }

    #[test]
    fn transition_carries_both_statuses() {
        let current = vec![PlayerRecord::new("1", "A", "Offline", Some(15))];
        let changes = diff_players(&current, &snapshot(&[("A", "Online")]));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].previous, "Online");
        assert_eq!(changes[0].current, "Offline");
        assert_eq!(changes[0].last_contact, "15 minute(s) ago");
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let current = vec![PlayerRecord::new("1", "A", "ONLINE", Some(0))];
        let changes = diff_players(&current, &snapshot(&[("A", "Online")]));
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn removed_players_produce_no_events() {
        let current = vec![PlayerRecord::new("1", "A", "Online", Some(0))];
        let previous = snapshot(&[("A", "Online"), ("Gone", "Offline")]);
        assert!(diff_players(&current, &previous).is_empty());
    }

    #[test]
    fn output_preserves_fetch_order() {
        let current = vec![
            PlayerRecord::new("9", "Zed", "Online", Some(0)),
            PlayerRecord::new("1", "Alpha", "Online", Some(0)),
        ];
        let changes = diff_players(&current, &HashMap::new());
        assert_eq!(changes[0].name, "Zed");
        assert_eq!(changes[1].name, "Alpha");
    }
}
