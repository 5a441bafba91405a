// Member list of an event, annotated with who is online right now.

use crate::application::errors::ApplicationError;
use crate::core::meetup::event::{EventId, UserId};
use crate::core::ports::{EventDirectory, PresenceLookup};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberStatusView {
    pub user_id: UserId,
    pub is_owner: bool,
    pub online: bool,
}

pub struct MemberQueries<TDirectory, TPresence>
where
    TDirectory: EventDirectory + 'static,
    TPresence: PresenceLookup + 'static,
{
    directory: Arc<TDirectory>,
    presence: Arc<TPresence>,
}

impl<TDirectory, TPresence> MemberQueries<TDirectory, TPresence>
where
    TDirectory: EventDirectory + 'static,
    TPresence: PresenceLookup + 'static,
{
    pub fn new(directory: Arc<TDirectory>, presence: Arc<TPresence>) -> Self {
        Self {
            directory,
            presence,
        }
    }

    /// Owner first, then members by id.
    pub async fn members_with_status(
        &self,
        event_id: EventId,
    ) -> Result<Vec<MemberStatusView>, ApplicationError> {
        let event = self
            .directory
            .find_event(event_id)
            .await?
            .ok_or(ApplicationError::EventNotFound(event_id))?;

        let mut user_ids = vec![event.owner_id];
        user_ids.extend(event.member_ids.iter().filter(|id| **id != event.owner_id));

        let mut views = Vec::with_capacity(user_ids.len());
        for user_id in user_ids {
            views.push(MemberStatusView {
                user_id,
                is_owner: user_id == event.owner_id,
                online: self.presence.is_online(user_id).await,
            });
        }
        Ok(views)
    }
}
