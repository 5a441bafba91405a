// Asynchronous notification dispatch.
//
// Purpose
// - Decouple whoever raises a notification from the sessions that receive it.
//
// Responsibilities
// - QueuedTransport accepts notifications into a bounded queue without waiting.
// - NotificationDispatcher drains the queue, turns each notification into a Notify packet and
//   delivers it through the presence registry.
// - The dispatcher stops once every QueuedTransport handle is dropped.

use crate::application::presence_registry::PresenceRegistry;
use crate::core::meetup::notification::{Notification, Packet};
use crate::core::ports::{DispatchError, NotificationTransport};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{debug, info};

#[derive(Clone)]
pub struct QueuedTransport {
    tx: mpsc::Sender<Notification>,
}

impl QueuedTransport {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Notification>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

impl NotificationTransport for QueuedTransport {
    fn send(&self, notification: Notification) -> Result<(), DispatchError> {
        self.tx.try_send(notification).map_err(|err| match err {
            TrySendError::Full(_) => DispatchError::QueueFull,
            TrySendError::Closed(_) => DispatchError::Closed,
        })
    }
}

pub struct NotificationDispatcher {
    rx: mpsc::Receiver<Notification>,
    registry: Arc<PresenceRegistry>,
}

impl NotificationDispatcher {
    pub fn new(rx: mpsc::Receiver<Notification>, registry: Arc<PresenceRegistry>) -> Self {
        Self { rx, registry }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    pub async fn run(mut self) {
        while let Some(notification) = self.rx.recv().await {
            let packet = Arc::new(Packet::notify(&notification));
            let delivered = self
                .registry
                .deliver(&notification.recipient_ids, packet)
                .await;
            debug!(
                kind = %notification.content.kind,
                recipients = notification.recipient_ids.len(),
                delivered,
                "notification dispatched"
            );
        }
        info!("notification dispatcher stopped");
    }
}

#[cfg(test)]
mod dispatcher_tests {
    use super::*;
    use crate::core::meetup::notification::{
        ChangeType, NOTIFY_CHANNEL, NotificationContent, SYSTEM_SENDER,
    };
    use rstest::{fixture, rstest};

    #[fixture]
    fn notification() -> Notification {
        Notification {
            recipient_ids: vec![1, 2],
            sender_id: SYSTEM_SENDER,
            content: NotificationContent::event_changed(ChangeType::Modify, 9),
        }
    }

    #[rstest]
    fn it_should_refuse_notifications_beyond_capacity(notification: Notification) {
        let (transport, _rx) = QueuedTransport::new(1);
        assert_eq!(transport.send(notification.clone()), Ok(()));
        assert_eq!(transport.send(notification), Err(DispatchError::QueueFull));
    }

    #[rstest]
    fn it_should_report_a_closed_queue(notification: Notification) {
        let (transport, rx) = QueuedTransport::new(1);
        drop(rx);
        assert_eq!(transport.send(notification), Err(DispatchError::Closed));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_deliver_packets_to_online_recipients(notification: Notification) {
        let registry = Arc::new(PresenceRegistry::new(8));
        let mut online = registry.connect(1).await;
        let (transport, rx) = QueuedTransport::new(8);
        let handle = NotificationDispatcher::new(rx, registry.clone()).spawn();

        transport.send(notification).unwrap();
        let packet = online.mailbox.recv().await.unwrap();
        assert_eq!(packet.channel, NOTIFY_CHANNEL);
        assert_eq!(packet.data["type"], "modifyevent");

        drop(transport);
        handle.await.unwrap();
    }
}
