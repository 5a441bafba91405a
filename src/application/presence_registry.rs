// Registry of live sessions per user.
//
// Purpose
// - Know who is online, and hand packets to each of a user's sessions.
//
// Responsibilities
// - Give each session a bounded mailbox. Delivery never waits: a full mailbox drops the packet,
//   a closed mailbox is pruned.
// - Report the first opened and the last closed session of a user so callers can announce
//   online status changes.
//
// Boundaries
// - No knowledge of sockets. Whatever serves a session drains its mailbox.

use crate::core::meetup::event::UserId;
use crate::core::meetup::notification::Packet;
use crate::core::ports::PresenceLookup;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

pub type ConnectionId = u64;

type Mailboxes = HashMap<ConnectionId, mpsc::Sender<Arc<Packet>>>;

#[derive(Debug)]
pub struct Connection {
    pub id: ConnectionId,
    pub mailbox: mpsc::Receiver<Arc<Packet>>,
    /// The user had no other open session.
    pub first_session: bool,
}

pub struct PresenceRegistry {
    sessions: RwLock<HashMap<UserId, Mailboxes>>,
    next_id: AtomicU64,
    mailbox_capacity: usize,
}

impl PresenceRegistry {
    pub fn new(mailbox_capacity: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            mailbox_capacity: mailbox_capacity.max(1),
        }
    }

    pub async fn connect(&self, user_id: UserId) -> Connection {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (sender, mailbox) = mpsc::channel(self.mailbox_capacity);
        let mut sessions = self.sessions.write().await;
        let mailboxes = sessions.entry(user_id).or_default();
        let first_session = mailboxes.is_empty();
        mailboxes.insert(id, sender);
        debug!(user_id, connection_id = id, first_session, "session opened");
        Connection {
            id,
            mailbox,
            first_session,
        }
    }

    /// Returns whether this was the user's last open session.
    pub async fn disconnect(&self, user_id: UserId, connection_id: ConnectionId) -> bool {
        let mut sessions = self.sessions.write().await;
        let Some(mailboxes) = sessions.get_mut(&user_id) else {
            return false;
        };
        if mailboxes.remove(&connection_id).is_none() {
            return false;
        }
        let last_session = mailboxes.is_empty();
        if last_session {
            sessions.remove(&user_id);
        }
        debug!(user_id, connection_id, last_session, "session closed");
        last_session
    }

    pub async fn session_count(&self, user_id: UserId) -> usize {
        self.sessions
            .read()
            .await
            .get(&user_id)
            .map_or(0, HashMap::len)
    }

    /// Hands the packet to every session of every recipient. Returns how many sessions took it.
    pub async fn deliver(&self, recipient_ids: &[UserId], packet: Arc<Packet>) -> usize {
        let mut delivered = 0;
        let mut closed = Vec::new();
        {
            let sessions = self.sessions.read().await;
            for user_id in recipient_ids {
                let Some(mailboxes) = sessions.get(user_id) else {
                    continue;
                };
                for (connection_id, sender) in mailboxes {
                    match sender.try_send(packet.clone()) {
                        Ok(()) => delivered += 1,
                        Err(TrySendError::Full(_)) => {
                            warn!(
                                user_id,
                                connection_id, "session mailbox full, dropping packet"
                            );
                        }
                        Err(TrySendError::Closed(_)) => closed.push((*user_id, *connection_id)),
                    }
                }
            }
        }
        if !closed.is_empty() {
            self.prune(&closed).await;
        }
        delivered
    }

    async fn prune(&self, closed: &[(UserId, ConnectionId)]) {
        let mut sessions = self.sessions.write().await;
        for (user_id, connection_id) in closed {
            if let Some(mailboxes) = sessions.get_mut(user_id) {
                mailboxes.remove(connection_id);
                if mailboxes.is_empty() {
                    sessions.remove(user_id);
                }
            }
            debug!(user_id, connection_id, "pruned closed session");
        }
    }
}

#[async_trait::async_trait]
impl PresenceLookup for PresenceRegistry {
    async fn is_online(&self, user_id: UserId) -> bool {
        self.session_count(user_id).await > 0
    }
}
