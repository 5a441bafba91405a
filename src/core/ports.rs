// Ports define what the core needs from the outside world, without implementing it.
//
// Purpose
// - Describe abstract input and output capabilities as traits (EventDirectory, VoteRepository,
//   NotificationTransport, PresenceLookup, Clock).
//
// Responsibilities
// - Keep the core independent of any database, socket server or broker by coding against traits.
// - VoteRepository::find_or_create must be a single atomic insert-if-absent. Concurrent first
//   voters on the same location and window end up on the same aggregate.
// - NotificationTransport::send must not block. Delivery is best effort.
//
// Boundaries
// - No concrete input or output here. Adapters implement these traits in the adapters layer.
//
// Testing guidance
// - Provide in memory implementations for tests and local development.

use crate::core::meetup::event::{Event, EventId, Location, LocationId, UserId};
use crate::core::meetup::notification::Notification;
use crate::core::meetup::vote_aggregate::{
    Ballot, FindOrCreate, NewVoteAggregate, VoteAggregate, VoteId,
};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0} offline")]
    Offline(&'static str),

    #[error("vote aggregate {0} not found")]
    NotFound(VoteId),

    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("notification queue is full")]
    QueueFull,

    #[error("notification transport is closed")]
    Closed,
}

/// Read-only access to events, locations and who relates to whom.
#[async_trait]
pub trait EventDirectory: Send + Sync {
    /// Members of the returned event are already restricted to active users.
    async fn find_event(&self, event_id: EventId) -> Result<Option<Event>, RepositoryError>;
    async fn find_location(
        &self,
        location_id: LocationId,
    ) -> Result<Option<Location>, RepositoryError>;
    /// Users sharing at least one active event with `user_id`, excluding the user.
    async fn relatives_of(&self, user_id: UserId) -> Result<Vec<UserId>, RepositoryError>;
}

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Atomic insert-if-absent keyed by `(location_id, window.start)`. An aggregate of the same
    /// location created inside the window also counts as found.
    async fn find_or_create(&self, seed: NewVoteAggregate)
    -> Result<FindOrCreate, RepositoryError>;

    /// Atomically applies the ballot and returns the updated aggregate.
    async fn apply_ballot(
        &self,
        id: VoteId,
        ballot: &Ballot,
    ) -> Result<VoteAggregate, RepositoryError>;

    /// Aggregates of the location with `created_at` in `[time_begin, time_end]`.
    async fn find_by_location_and_time_range(
        &self,
        location_id: LocationId,
        time_begin: i64,
        time_end: i64,
    ) -> Result<Vec<VoteAggregate>, RepositoryError>;

    /// Aggregates of the event with `created_at` in `[time_begin, time_end]`, ordered by
    /// `(created_at, id)`, at most `limit` of them.
    async fn find_by_event_and_time_range(
        &self,
        event_id: EventId,
        time_begin: i64,
        time_end: i64,
        limit: usize,
    ) -> Result<Vec<VoteAggregate>, RepositoryError>;

    async fn find_by_id(&self, id: VoteId) -> Result<Option<VoteAggregate>, RepositoryError>;
}

pub trait NotificationTransport: Send + Sync {
    fn send(&self, notification: Notification) -> Result<(), DispatchError>;
}

#[async_trait]
pub trait PresenceLookup: Send + Sync {
    async fn is_online(&self, user_id: UserId) -> bool;
}

pub trait Clock: Send + Sync {
    /// Epoch seconds.
    fn now(&self) -> i64;
}
