//! Grouped listing of an event's registrations.

use crate::types::{FestEvent, Registration};
use serde_json::{json, Map, Value};

/// Groups ledger entries into the admin listing shape:
///
/// ```json
/// {
///   "individuals": [ ... ],
///   "<teamName>": { "teamName": ..., "members": [ ... ], "totalFee": ... }
/// }
/// ```
///
/// `totalFee` is summed per member row (`event.fee × members.len()`); the
/// leader's row lives in the same `members` array, so the leader's share
/// is included.
#[must_use]
pub fn group_registrations(event: &FestEvent, entries: Vec<Registration>) -> Value {
    let mut individuals: Vec<Value> = Vec::new();
    // Insertion-ordered map of team name -> member rows.
    let mut teams: Vec<(String, Vec<Value>)> = Vec::new();

    for entry in entries {
        let team_name = entry.team_name.clone();
        let row = serde_json::to_value(&entry).unwrap_or(Value::Null);
        match team_name {
            None => individuals.push(row),
            Some(name) => {
                if let Some((_, members)) = teams.iter_mut().find(|(n, _)| *n == name) {
                    members.push(row);
                } else {
                    teams.push((name, vec![row]));
                }
            }
        }
    }

    let mut out = Map::new();
    out.insert("individuals".to_string(), Value::Array(individuals));
    for (name, members) in teams {
        #[allow(clippy::cast_possible_wrap)]
        let total_fee = event.fee * members.len() as i64;
        out.insert(
            name.clone(),
            json!({
                "teamName": name,
                "members": members,
                "totalFee": total_fee,
            }),
        );
    }

    Value::Object(out)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{EventId, EventKind, Participant};
    use chrono::Utc;

    fn event(fee: i64) -> FestEvent {
        FestEvent {
            id: EventId::new(),
            title: "CTF".to_string(),
            description: "Capture the flag".to_string(),
            venue: "Lab 2".to_string(),
            starts_at: Utc::now(),
            ends_at: Utc::now(),
            fee,
            kind: EventKind::Group,
            max_team_size: 4,
            registrations: Vec::new(),
            created_at: Utc::now(),
        }
    }

    fn entry(event_id: EventId, team: Option<&str>, is_leader: bool) -> Registration {
        Registration::new(
            event_id,
            Participant {
                name: "P".to_string(),
                email: "p@example.com".to_string(),
                registration_no: "21BCE1001".to_string(),
                mobile_no: "9876543210".to_string(),
                semester: "5".to_string(),
            },
            team.map(String::from),
            is_leader,
        )
    }

    #[test]
    fn splits_teams_from_individuals() {
        let event = event(49);
        let entries = vec![
            entry(event.id, Some("A"), true),
            entry(event.id, Some("A"), false),
            entry(event.id, None, false),
        ];

        let grouped = group_registrations(&event, entries);
        assert_eq!(grouped["individuals"].as_array().unwrap().len(), 1);
        assert_eq!(grouped["A"]["members"].as_array().unwrap().len(), 2);
        assert_eq!(grouped["A"]["teamName"], "A");
    }

    #[test]
    fn total_fee_is_fee_times_member_rows() {
        let event = event(49);
        let entries = vec![
            entry(event.id, Some("A"), true),
            entry(event.id, Some("A"), false),
            entry(event.id, Some("A"), false),
        ];

        let grouped = group_registrations(&event, entries);
        // Leader's row is in the members array, so the fee covers all 3.
        assert_eq!(grouped["A"]["totalFee"], 147);
    }

    #[test]
    fn empty_event_still_has_individuals_key() {
        let event = event(0);
        let grouped = group_registrations(&event, Vec::new());
        assert!(grouped["individuals"].as_array().unwrap().is_empty());
        assert_eq!(grouped.as_object().unwrap().len(), 1);
    }
}
