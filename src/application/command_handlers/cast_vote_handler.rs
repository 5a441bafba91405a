// Cast vote command handler orchestrates the vote flow.
//
// Responsibilities
// - Load the event and location from the directory.
// - Call the decider with the command and the current time.
// - Find or create the aggregate for the current window atomically, then apply the ballot.
// - Announce the new tally to the event's owner and members. Notification never fails the vote.

use crate::application::errors::ApplicationError;
use crate::application::notifier::event_notifications::EventNotifications;
use crate::core::meetup::decider::cast_vote::command::CastVote;
use crate::core::meetup::decider::cast_vote::decide::{Decision, decide_cast_vote};
use crate::core::meetup::vote_aggregate::VoteAggregateView;
use crate::core::ports::{Clock, EventDirectory, VoteRepository};
use chrono::FixedOffset;
use std::sync::Arc;
use tracing::{debug, error, warn};

pub struct CastVoteHandler<TDirectory, TRepository, TClock>
where
    TDirectory: EventDirectory + 'static,
    TRepository: VoteRepository + 'static,
    TClock: Clock + 'static,
{
    directory: Arc<TDirectory>,
    repository: Arc<TRepository>,
    clock: Arc<TClock>,
    notifications: EventNotifications,
    weekday_offset: FixedOffset,
}

impl<TDirectory, TRepository, TClock> CastVoteHandler<TDirectory, TRepository, TClock>
where
    TDirectory: EventDirectory + 'static,
    TRepository: VoteRepository + 'static,
    TClock: Clock + 'static,
{
    pub fn new(
        directory: Arc<TDirectory>,
        repository: Arc<TRepository>,
        clock: Arc<TClock>,
        notifications: EventNotifications,
        weekday_offset: FixedOffset,
    ) -> Self {
        Self {
            directory,
            repository,
            clock,
            notifications,
            weekday_offset,
        }
    }

    pub async fn handle(&self, command: CastVote) -> Result<VoteAggregateView, ApplicationError> {
        let (voter_id, event_id, location_id) =
            (command.voter_id, command.event_id, command.location_id);
        let result = self.cast(command).await;
        match &result {
            Err(err) if err.is_caller_error() => {
                warn!(voter_id, event_id, location_id, %err, "vote rejected");
            }
            Err(err) => error!(voter_id, event_id, location_id, %err, "vote failed"),
            Ok(_) => {}
        }
        result
    }

    async fn cast(&self, command: CastVote) -> Result<VoteAggregateView, ApplicationError> {
        let now = self.clock.now();
        let event = self.directory.find_event(command.event_id).await?;
        let location = self.directory.find_location(command.location_id).await?;
        let (voter_id, event_id, location_id) =
            (command.voter_id, command.event_id, command.location_id);

        let decision = decide_cast_vote(
            event.as_ref(),
            location.as_ref(),
            command,
            now,
            self.weekday_offset,
        );
        let (seed, ballot) = match decision {
            Decision::Accepted { seed, ballot } => (seed, ballot),
            Decision::Rejected { reason } => return Err(reason.into()),
        };

        let found = self.repository.find_or_create(seed).await?;
        if found.was_created() {
            debug!(event_id, location_id, "opened vote aggregate for this occurrence");
        }
        let aggregate = self
            .repository
            .apply_ballot(found.into_inner().id, &ballot)
            .await?;
        debug!(
            voter_id,
            vote_id = %aggregate.id,
            want_vote = ballot.want_vote,
            vote_count = aggregate.vote_count(),
            "vote applied"
        );

        if let Some(event) = event.as_ref() {
            self.notifications
                .notify_location_vote(voter_id, event, &aggregate, ballot.want_vote);
        }
        Ok(VoteAggregateView::from(aggregate))
    }
}
