// Change notifications and the packet shape live sessions receive.
//
// Purpose
// - Describe what changed (an event, a location, a member, a vote, a user's online status)
//   in the subject/text/type/data form clients already understand.
//
// Boundaries
// - No input or output. Recipient selection and dispatch live in the application layer.

use crate::core::meetup::event::{EventId, LocationId, UserId};
use crate::core::meetup::vote_aggregate::VoteId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json, json};

/// Sender id used when the system, not a user, originates a notification.
pub const SYSTEM_SENDER: UserId = 0;

pub const NOTIFY_CHANNEL: &str = "Notify";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Add,
    Remove,
    Modify,
}

impl ChangeType {
    pub fn value(self) -> &'static str {
        match self {
            ChangeType::Add => "add",
            ChangeType::Remove => "remove",
            ChangeType::Modify => "modify",
        }
    }

    pub fn past_form(self) -> &'static str {
        match self {
            ChangeType::Add => "added",
            ChangeType::Remove => "removed",
            ChangeType::Modify => "modified",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub subject: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Map<String, Json>,
}

impl NotificationContent {
    fn new(subject: &str, text: String, kind: String, data: Json) -> Self {
        let data = match data {
            Json::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            subject: subject.to_string(),
            text,
            kind,
            data,
        }
    }

    pub fn event_changed(change: ChangeType, event_id: EventId) -> Self {
        Self::new(
            "Event",
            format!("Event was {}.", change.past_form()),
            format!("{}event", change.value()),
            json!({ "eventId": event_id.to_string() }),
        )
    }

    pub fn location_changed(
        change: ChangeType,
        event_id: EventId,
        location_id: LocationId,
    ) -> Self {
        Self::new(
            "Event Location",
            format!("Location was {}.", change.past_form()),
            format!("{}location", change.value()),
            json!({
                "eventId": event_id.to_string(),
                "locationId": location_id.to_string(),
            }),
        )
    }

    pub fn location_vote(
        change: ChangeType,
        event_id: EventId,
        location_id: LocationId,
        vote: bool,
        vote_id: VoteId,
        vote_count: usize,
    ) -> Self {
        Self::new(
            "Location Vote",
            format!("Location vote was {}.", change.past_form()),
            format!("{}vote", change.value()),
            json!({
                "eventId": event_id.to_string(),
                "locationId": location_id.to_string(),
                "vote": vote,
                "voteId": vote_id.to_string(),
                "voteCount": vote_count,
            }),
        )
    }

    pub fn member_changed(change: ChangeType, event_id: EventId, member_id: UserId) -> Self {
        Self::new(
            "Event Member",
            format!("Member was {}.", change.past_form()),
            format!("{}member", change.value()),
            json!({
                "eventId": event_id.to_string(),
                "memberId": member_id.to_string(),
            }),
        )
    }

    pub fn online_status(online: bool) -> Self {
        let status = if online { "online" } else { "offline" };
        Self::new(
            "Event Member",
            format!("User went {status}."),
            "onlinestatus".to_string(),
            json!({ "onlineStatus": status }),
        )
    }

    /// Nothing worth telling anyone.
    pub fn is_blank(&self) -> bool {
        self.subject.is_empty() && self.text.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Sorted and free of duplicates.
    pub recipient_ids: Vec<UserId>,
    pub sender_id: UserId,
    #[serde(flatten)]
    pub content: NotificationContent,
}

/// What a live session receives on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Packet {
    pub channel: String,
    pub source_id: String,
    pub data: Json,
}

impl Packet {
    pub fn notify(notification: &Notification) -> Self {
        let source_id = match notification.sender_id {
            SYSTEM_SENDER => String::new(),
            sender => sender.to_string(),
        };
        Self {
            channel: NOTIFY_CHANNEL.to_string(),
            source_id,
            data: json!({
                "type": notification.content.kind,
                "subject": notification.content.subject,
                "text": notification.content.text,
                "data": notification.content.data,
            }),
        }
    }
}
