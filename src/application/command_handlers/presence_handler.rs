// Presence command handler tracks sessions opening and closing.
//
// Responsibilities
// - Register and unregister sessions in the presence registry.
// - When a user's first session opens or last session closes, tell their relatives
//   (everyone sharing an active event with them).
// - Announcing is best effort. A failed relatives lookup is logged and never refuses a session.

use crate::application::notifier::event_notifications::EventNotifications;
use crate::application::presence_registry::{Connection, ConnectionId, PresenceRegistry};
use crate::core::meetup::event::UserId;
use crate::core::ports::EventDirectory;
use std::sync::Arc;
use tracing::{info, warn};

pub struct PresenceHandler<TDirectory>
where
    TDirectory: EventDirectory + 'static,
{
    directory: Arc<TDirectory>,
    registry: Arc<PresenceRegistry>,
    notifications: EventNotifications,
}

impl<TDirectory> PresenceHandler<TDirectory>
where
    TDirectory: EventDirectory + 'static,
{
    pub fn new(
        directory: Arc<TDirectory>,
        registry: Arc<PresenceRegistry>,
        notifications: EventNotifications,
    ) -> Self {
        Self {
            directory,
            registry,
            notifications,
        }
    }

    pub async fn connection_opened(&self, user_id: UserId) -> Connection {
        let connection = self.registry.connect(user_id).await;
        if connection.first_session {
            info!(user_id, "user came online");
            self.announce(user_id, true).await;
        }
        connection
    }

    pub async fn connection_closed(&self, user_id: UserId, connection_id: ConnectionId) {
        if self.registry.disconnect(user_id, connection_id).await {
            info!(user_id, "user went offline");
            self.announce(user_id, false).await;
        }
    }

    async fn announce(&self, user_id: UserId, online: bool) {
        match self.directory.relatives_of(user_id).await {
            Ok(relatives) => self
                .notifications
                .notify_online_status(user_id, online, relatives),
            Err(err) => warn!(user_id, error = %err, "online status not announced"),
        }
    }
}

#[cfg(test)]
mod presence_handler_tests {
    use super::*;
    use crate::adapters::in_memory::in_memory_directory::InMemoryDirectory;
    use crate::adapters::in_memory::in_memory_transport::InMemoryTransport;
    use crate::core::ports::PresenceLookup;
    use crate::test_support::fixtures::events::EventBuilder;
    use rstest::{fixture, rstest};

    type BeforeEachReturn = (InMemoryDirectory, Arc<PresenceRegistry>, Arc<InMemoryTransport>);

    #[fixture]
    async fn before_each() -> BeforeEachReturn {
        let directory = InMemoryDirectory::new();
        directory
            .upsert_event(EventBuilder::new().owner(1).members(&[2, 3]).build())
            .await;
        (
            directory,
            Arc::new(PresenceRegistry::new(4)),
            Arc::new(InMemoryTransport::new()),
        )
    }

    fn handler(
        directory: InMemoryDirectory,
        registry: Arc<PresenceRegistry>,
        transport: Arc<InMemoryTransport>,
    ) -> PresenceHandler<InMemoryDirectory> {
        PresenceHandler::new(
            Arc::new(directory),
            registry,
            EventNotifications::new(transport),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_announce_only_the_first_and_last_session(
        #[future] before_each: BeforeEachReturn,
    ) {
        let (directory, registry, transport) = before_each.await;
        let handler = handler(directory, registry.clone(), transport.clone());

        let phone = handler.connection_opened(1).await;
        let laptop = handler.connection_opened(1).await;
        assert!(registry.is_online(1).await);
        handler.connection_closed(1, phone.id).await;
        assert!(registry.is_online(1).await);
        handler.connection_closed(1, laptop.id).await;
        assert!(!registry.is_online(1).await);

        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].recipient_ids, vec![2, 3]);
        assert_eq!(sent[0].sender_id, 1);
        assert_eq!(sent[0].content.data["onlineStatus"], "online");
        assert_eq!(sent[1].content.data["onlineStatus"], "offline");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_accept_sessions_while_the_directory_is_offline(
        #[future] before_each: BeforeEachReturn,
    ) {
        let (mut directory, registry, transport) = before_each.await;
        directory.toggle_offline();
        let handler = handler(directory, registry.clone(), transport.clone());

        let connection = handler.connection_opened(1).await;
        assert!(connection.first_session);
        assert!(registry.is_online(1).await);
        assert!(transport.sent().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_ignore_closing_an_unknown_session(#[future] before_each: BeforeEachReturn) {
        let (directory, registry, transport) = before_each.await;
        let handler = handler(directory, registry, transport.clone());
        handler.connection_closed(1, 42).await;
        assert!(transport.sent().is_empty());
    }
}
