// In memory implementation of the NotificationTransport port.
//
// Purpose
// - Let handler tests assert which notifications were sent, to whom and with what content.
//
// Responsibilities
// - Record every accepted notification in send order.

use crate::core::meetup::notification::Notification;
use crate::core::ports::{DispatchError, NotificationTransport};
use std::sync::{Mutex, PoisonError};

#[derive(Default)]
pub struct InMemoryTransport {
    sent: Mutex<Vec<Notification>>,
    is_offline: bool,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NotificationTransport for InMemoryTransport {
    fn send(&self, notification: Notification) -> Result<(), DispatchError> {
        if self.is_offline {
            return Err(DispatchError::Closed);
        }
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
        Ok(())
    }
}
