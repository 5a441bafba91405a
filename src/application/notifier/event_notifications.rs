// Fan-out of change notifications to the people an event concerns.
//
// Responsibilities
// - Address notifications about an event to its owner and active members.
// - Skip notifications with neither subject nor text.
// - Never fail the caller. Transport errors are logged and swallowed.

use crate::core::meetup::event::{Event, LocationId, UserId};
use crate::core::meetup::notification::{
    ChangeType, Notification, NotificationContent, SYSTEM_SENDER,
};
use crate::core::meetup::vote_aggregate::VoteAggregate;
use crate::core::ports::NotificationTransport;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct EventNotifications {
    transport: Arc<dyn NotificationTransport>,
}

impl EventNotifications {
    pub fn new(transport: Arc<dyn NotificationTransport>) -> Self {
        Self { transport }
    }

    pub fn notify_members(&self, sender_id: UserId, event: &Event, content: NotificationContent) {
        let recipient_ids = event.recipient_ids().into_iter().collect();
        self.send(recipient_ids, sender_id, content);
    }

    pub fn notify_location_vote(
        &self,
        sender_id: UserId,
        event: &Event,
        aggregate: &VoteAggregate,
        vote: bool,
    ) {
        let content = NotificationContent::location_vote(
            ChangeType::Modify,
            aggregate.event_id,
            aggregate.location_id,
            vote,
            aggregate.id,
            aggregate.vote_count(),
        );
        self.notify_members(sender_id, event, content);
    }

    pub fn notify_event_changed(&self, sender_id: UserId, event: &Event, change: ChangeType) {
        let content = NotificationContent::event_changed(change, event.id);
        self.notify_members(sender_id, event, content);
    }

    pub fn notify_location_changed(
        &self,
        sender_id: UserId,
        event: &Event,
        location_id: LocationId,
        change: ChangeType,
    ) {
        let content = NotificationContent::location_changed(change, event.id, location_id);
        self.notify_members(sender_id, event, content);
    }

    pub fn notify_member_changed(
        &self,
        sender_id: UserId,
        event: &Event,
        member_id: UserId,
        change: ChangeType,
    ) {
        let content = NotificationContent::member_changed(change, event.id, member_id);
        self.notify_members(sender_id, event, content);
    }

    /// Tells `relatives` that `user_id` came online or went offline.
    pub fn notify_online_status(&self, user_id: UserId, online: bool, relatives: Vec<UserId>) {
        self.send(relatives, user_id, NotificationContent::online_status(online));
    }

    fn send(&self, recipient_ids: Vec<UserId>, sender_id: UserId, content: NotificationContent) {
        if content.is_blank() || recipient_ids.is_empty() {
            debug!(kind = %content.kind, "nothing to notify");
            return;
        }
        let kind = content.kind.clone();
        let notification = Notification {
            recipient_ids,
            sender_id,
            content,
        };
        if let Err(err) = self.transport.send(notification) {
            warn!(error = %err, kind = %kind, "notification dropped");
        }
    }
}
