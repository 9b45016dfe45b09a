//! Immutable audit records for custody-affecting events
//!
//! Every create, forward, and receive appends one [`TrackingEntry`] to the
//! document's history. Entries are append-only: never edited, never removed.

use crate::office::Office;
use crate::user::ActorRef;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What happened, as a tagged variant carrying its required fields.
///
/// `Received` has no destination by construction, so the "nullable
/// `toOffice`" of the wire format cannot leak into domain logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingAction {
    /// Document allocated and routed to its first custody holder.
    Created { to: Office },
    /// Custody moved to another office.
    Forwarded { to: Office },
    /// The holding office acknowledged custody.
    Received,
}

impl TrackingAction {
    /// Wire name of the action.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TrackingAction::Created { .. } => "Created",
            TrackingAction::Forwarded { .. } => "Forwarded",
            TrackingAction::Received => "Received",
        }
    }

    /// Destination office, if the action has one.
    #[inline]
    #[must_use]
    pub const fn to_office(self) -> Option<Office> {
        match self {
            TrackingAction::Created { to } | TrackingAction::Forwarded { to } => Some(to),
            TrackingAction::Received => None,
        }
    }

    /// Whether this action places the document in custody of a new office
    /// (and therefore resets the receipt flag).
    #[inline]
    #[must_use]
    pub const fn moves_custody(self) -> bool {
        self.to_office().is_some()
    }
}

/// One audit record of a custody-affecting event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TrackingEntryWire", try_from = "TrackingEntryWire")]
pub struct TrackingEntry {
    /// Originating office. For `Received` this is the office acknowledging
    /// custody; for `Forwarded` it is the acting user's home office.
    pub from: Office,
    pub action: TrackingAction,
    pub timestamp: DateTime<Utc>,
    pub actor: ActorRef,
}

impl TrackingEntry {
    /// Render the entry for history displays. Exhaustive over the action.
    #[must_use]
    pub fn describe(&self) -> String {
        match self.action {
            TrackingAction::Created { to } => {
                format!("Created by {} at {} and sent to {}", self.actor.name, self.from, to)
            }
            TrackingAction::Forwarded { to } => {
                format!("Forwarded by {} from {} to {}", self.actor.name, self.from, to)
            }
            TrackingAction::Received => {
                format!("Received by {} at {}", self.actor.name, self.from)
            }
        }
    }
}

/// Flat persisted shape: a shared record with a nullable destination,
/// kept for compatibility with previously stored histories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TrackingEntryWire {
    from_office: Office,
    to_office: Option<Office>,
    action: WireAction,
    timestamp: DateTime<Utc>,
    user: ActorRef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum WireAction {
    Created,
    Forwarded,
    Received,
}

impl From<TrackingEntry> for TrackingEntryWire {
    fn from(entry: TrackingEntry) -> Self {
        let action = match entry.action {
            TrackingAction::Created { .. } => WireAction::Created,
            TrackingAction::Forwarded { .. } => WireAction::Forwarded,
            TrackingAction::Received => WireAction::Received,
        };
        Self {
            from_office: entry.from,
            to_office: entry.action.to_office(),
            action,
            timestamp: entry.timestamp,
            user: entry.actor,
        }
    }
}

impl TryFrom<TrackingEntryWire> for TrackingEntry {
    type Error = String;

    fn try_from(wire: TrackingEntryWire) -> Result<Self, Self::Error> {
        let action = match (wire.action, wire.to_office) {
            (WireAction::Created, Some(to)) => TrackingAction::Created { to },
            (WireAction::Forwarded, Some(to)) => TrackingAction::Forwarded { to },
            (WireAction::Received, None) => TrackingAction::Received,
            (WireAction::Received, Some(_)) => {
                return Err("received entry must not carry a destination office".to_string());
            }
            (action, None) => {
                return Err(format!("{action:?} entry is missing its destination office"));
            }
        };
        Ok(Self {
            from: wire.from_office,
            action,
            timestamp: wire.timestamp,
            actor: wire.user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::{User, UserId};
    use pretty_assertions::assert_eq;

    fn entry(action: TrackingAction) -> TrackingEntry {
        let user = User::new("Cora", Office::Fou, "pw");
        TrackingEntry {
            from: Office::Fou,
            action,
            timestamp: Utc::now(),
            actor: ActorRef::from(&user),
        }
    }

    #[test]
    fn wire_format_uses_nullable_destination() {
        let created = entry(TrackingAction::Created { to: Office::Odm });
        let json = serde_json::to_value(&created).unwrap();
        assert_eq!(json["action"], "Created");
        assert_eq!(json["fromOffice"], "FOU");
        assert_eq!(json["toOffice"], "ODM");

        let received = entry(TrackingAction::Received);
        let json = serde_json::to_value(&received).unwrap();
        assert_eq!(json["toOffice"], serde_json::Value::Null);
    }

    #[test]
    fn wire_round_trip() {
        for action in [
            TrackingAction::Created { to: Office::Odm },
            TrackingAction::Forwarded { to: Office::PropertyUnit },
            TrackingAction::Received,
        ] {
            let original = entry(action);
            let json = serde_json::to_string(&original).unwrap();
            let back: TrackingEntry = serde_json::from_str(&json).unwrap();
            assert_eq!(back, original);
        }
    }

    #[test]
    fn malformed_wire_entries_are_rejected() {
        let missing_destination = serde_json::json!({
            "fromOffice": "FOU",
            "toOffice": null,
            "action": "Forwarded",
            "timestamp": Utc::now(),
            "user": { "id": UserId::new(), "name": "Cora" },
        });
        assert!(serde_json::from_value::<TrackingEntry>(missing_destination).is_err());

        let received_with_destination = serde_json::json!({
            "fromOffice": "FOU",
            "toOffice": "ODM",
            "action": "Received",
            "timestamp": Utc::now(),
            "user": { "id": UserId::new(), "name": "Cora" },
        });
        assert!(serde_json::from_value::<TrackingEntry>(received_with_destination).is_err());
    }

    #[test]
    fn describe_is_exhaustive_over_actions() {
        assert!(entry(TrackingAction::Created { to: Office::Odm })
            .describe()
            .contains("sent to ODM"));
        assert!(entry(TrackingAction::Forwarded { to: Office::Coa })
            .describe()
            .contains("Forwarded"));
        assert!(entry(TrackingAction::Received).describe().contains("Received"));
    }
}
