// In memory implementation of the EventDirectory port.
//
// Purpose
// - Stand in for the event and membership store in tests and local development.
//
// Responsibilities
// - Hold events and locations as written, and the set of deactivated users.
// - Hide deactivated users from the members of every event it hands out.

use crate::core::meetup::event::{Event, EventId, Location, LocationId, UserId};
use crate::core::ports::{EventDirectory, RepositoryError};
use std::collections::{BTreeSet, HashMap, HashSet};
use tokio::sync::RwLock;

const NAME: &str = "Event directory";

#[derive(Default)]
pub struct InMemoryDirectory {
    events: RwLock<HashMap<EventId, Event>>,
    locations: RwLock<HashMap<LocationId, Location>>,
    inactive_users: RwLock<HashSet<UserId>>,
    is_offline: bool,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    pub async fn upsert_event(&self, event: Event) {
        self.events.write().await.insert(event.id, event);
    }

    pub async fn upsert_location(&self, location: Location) {
        self.locations.write().await.insert(location.id, location);
    }

    pub async fn set_user_active(&self, user_id: UserId, is_active: bool) {
        let mut inactive = self.inactive_users.write().await;
        if is_active {
            inactive.remove(&user_id);
        } else {
            inactive.insert(user_id);
        }
    }

    fn ensure_online(&self) -> Result<(), RepositoryError> {
        if self.is_offline {
            return Err(RepositoryError::Offline(NAME));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl EventDirectory for InMemoryDirectory {
    async fn find_event(&self, event_id: EventId) -> Result<Option<Event>, RepositoryError> {
        self.ensure_online()?;
        let Some(mut event) = self.events.read().await.get(&event_id).cloned() else {
            return Ok(None);
        };
        let inactive = self.inactive_users.read().await;
        event.member_ids.retain(|member| !inactive.contains(member));
        Ok(Some(event))
    }

    async fn find_location(
        &self,
        location_id: LocationId,
    ) -> Result<Option<Location>, RepositoryError> {
        self.ensure_online()?;
        Ok(self.locations.read().await.get(&location_id).cloned())
    }

    async fn relatives_of(&self, user_id: UserId) -> Result<Vec<UserId>, RepositoryError> {
        self.ensure_online()?;
        let events = self.events.read().await;
        let inactive = self.inactive_users.read().await;
        let relatives: BTreeSet<UserId> = events
            .values()
            .filter(|event| event.is_active && event.is_owner_or_member(user_id))
            .flat_map(Event::recipient_ids)
            .filter(|other| *other != user_id && !inactive.contains(other))
            .collect();
        Ok(relatives.into_iter().collect())
    }
}
