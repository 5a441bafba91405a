// End to end tests for notification fan-out and delivery.
//
// - Vote notifications go to the owner and active members only.
// - Queued notifications reach every live session of a recipient as Notify packets.
// - Online status changes reach relatives on first and last session only.

mod fixtures;

use fixtures::{ALICE, BOB, OWNER, T_NOW, one_off_event, vote, world};
use meetup_votes::adapters::in_memory::in_memory_directory::InMemoryDirectory;
use meetup_votes::application::command_handlers::presence_handler::PresenceHandler;
use meetup_votes::application::notifier::dispatcher::{NotificationDispatcher, QueuedTransport};
use meetup_votes::application::notifier::event_notifications::EventNotifications;
use meetup_votes::application::presence_registry::{Connection, PresenceRegistry};
use meetup_votes::core::meetup::notification::{ChangeType, NOTIFY_CHANNEL, Packet};
use meetup_votes::core::ports::{EventDirectory, PresenceLookup};
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

/// Skips packets of other types, such as online status raced in by earlier sessions.
async fn next_of_type(connection: &mut Connection, kind: &str) -> Arc<Packet> {
    loop {
        let packet = timeout(Duration::from_secs(1), connection.mailbox.recv())
            .await
            .unwrap()
            .unwrap();
        if packet.data["type"] == kind {
            return packet;
        }
    }
}

#[rstest]
#[tokio::test]
async fn it_should_leave_inactive_members_out_of_the_vote_notification() {
    let world = world(one_off_event(T_NOW + 60, 3_600), T_NOW).await;
    world.directory.set_user_active(BOB, false).await;

    world.handler.handle(vote(ALICE, 10, true)).await.unwrap();

    let sent = world.transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient_ids, vec![OWNER, ALICE]);
    assert_eq!(sent[0].content.subject, "Location Vote");
    assert_eq!(sent[0].content.data["voteCount"], 1);
}

#[rstest]
#[tokio::test]
async fn it_should_name_the_voter_as_the_sender_of_the_vote_notification() {
    let world = world(one_off_event(T_NOW + 60, 3_600), T_NOW).await;
    world.handler.handle(vote(ALICE, 10, true)).await.unwrap();

    let sent = world.transport.sent();
    assert_eq!(sent[0].sender_id, ALICE);
    assert_eq!(Packet::notify(&sent[0]).source_id, "2");
}

#[rstest]
#[tokio::test]
async fn it_should_notify_on_every_vote_change() {
    let world = world(one_off_event(T_NOW + 60, 3_600), T_NOW).await;
    world.handler.handle(vote(ALICE, 10, true)).await.unwrap();
    world.handler.handle(vote(ALICE, 10, false)).await.unwrap();
    let sent = world.transport.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1].content.data["vote"], false);
    assert_eq!(sent[1].content.data["voteCount"], 0);
}

#[rstest]
#[tokio::test]
async fn it_should_deliver_packets_to_all_sessions_of_online_recipients() {
    let directory = Arc::new(InMemoryDirectory::new());
    directory.upsert_event(one_off_event(T_NOW + 60, 3_600)).await;
    let registry = Arc::new(PresenceRegistry::new(8));
    let (transport, rx) = QueuedTransport::new(16);
    let dispatcher = NotificationDispatcher::new(rx, registry.clone()).spawn();
    let notifications = EventNotifications::new(Arc::new(transport));
    let presence =
        PresenceHandler::new(directory.clone(), registry.clone(), notifications.clone());

    let mut alice = presence.connection_opened(ALICE).await;
    let mut owner_phone = presence.connection_opened(OWNER).await;
    let mut owner_laptop = presence.connection_opened(OWNER).await;

    let packet = next_of_type(&mut alice, "onlinestatus").await;
    assert_eq!(packet.channel, NOTIFY_CHANNEL);
    assert_eq!(packet.source_id, OWNER.to_string());
    assert_eq!(packet.data["data"]["onlineStatus"], "online");

    let event = directory.find_event(1).await.unwrap().unwrap();
    notifications.notify_event_changed(OWNER, &event, ChangeType::Modify);
    for session in [&mut owner_phone, &mut owner_laptop, &mut alice] {
        let packet = next_of_type(session, "modifyevent").await;
        assert_eq!(packet.data["text"], "Event was modified.");
    }

    // Closing one of two sessions is not going offline.
    presence.connection_closed(OWNER, owner_phone.id).await;
    assert!(registry.is_online(OWNER).await);
    presence.connection_closed(OWNER, owner_laptop.id).await;
    let packet = next_of_type(&mut alice, "onlinestatus").await;
    assert_eq!(packet.data["data"]["onlineStatus"], "offline");
    assert!(alice.mailbox.try_recv().is_err());

    drop(presence);
    drop(notifications);
    dispatcher.await.unwrap();
}
