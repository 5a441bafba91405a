// Vote aggregate: the tally of users favouring one location for one occurrence of an event.
//
// Responsibilities
// - Keep voter ids and display names in lockstep. Both are views of a single map keyed by user id.
// - Apply ballots idempotently. Voting twice keeps a voter once.
//   Unvoting an absent voter is a no-op.
//
// Boundaries
// - No input or output. Repositories own persistence and atomicity.

use crate::core::meetup::event::{EventId, LocationId, UserId};
use crate::core::meetup::window::VotingWindow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

pub type VoteId = Uuid;

/// One user's vote or unvote for a location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballot {
    pub voter_id: UserId,
    pub voter_name: String,
    pub want_vote: bool,
}

/// Seed for an aggregate that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVoteAggregate {
    pub event_id: EventId,
    pub location_id: LocationId,
    pub location_name: String,
    pub window: VotingWindow,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteAggregate {
    pub id: VoteId,
    pub event_id: EventId,
    pub location_id: LocationId,
    /// Snapshot taken at creation, never re-read from the location.
    pub location_name: String,
    pub window_start: i64,
    pub window_end: i64,
    pub created_at: i64,
    voters: BTreeMap<UserId, String>,
}

impl VoteAggregate {
    pub fn create(id: VoteId, seed: NewVoteAggregate) -> Self {
        Self {
            id,
            event_id: seed.event_id,
            location_id: seed.location_id,
            location_name: seed.location_name,
            window_start: seed.window.start,
            window_end: seed.window.end,
            created_at: seed.created_at,
            voters: BTreeMap::new(),
        }
    }

    pub fn window(&self) -> VotingWindow {
        VotingWindow {
            start: self.window_start,
            end: self.window_end,
        }
    }

    /// Returns whether the tally changed.
    pub fn apply_ballot(&mut self, ballot: &Ballot) -> bool {
        if ballot.want_vote {
            let previous = self
                .voters
                .insert(ballot.voter_id, ballot.voter_name.clone());
            previous.as_deref() != Some(ballot.voter_name.as_str())
        } else {
            self.voters.remove(&ballot.voter_id).is_some()
        }
    }

    pub fn vote_count(&self) -> usize {
        self.voters.len()
    }

    pub fn voter_ids(&self) -> impl Iterator<Item = UserId> + '_ {
        self.voters.keys().copied()
    }

    pub fn voter_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.voters.values().map(String::as_str)
    }
}

/// Outcome of an atomic insert-if-absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FindOrCreate {
    Found(VoteAggregate),
    Created(VoteAggregate),
}

impl FindOrCreate {
    pub fn was_created(&self) -> bool {
        matches!(self, FindOrCreate::Created(_))
    }

    pub fn into_inner(self) -> VoteAggregate {
        match self {
            FindOrCreate::Found(aggregate) | FindOrCreate::Created(aggregate) => aggregate,
        }
    }
}

/// Read view handed to callers. `voter_ids[i]` and `voter_names[i]` belong to the same user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteAggregateView {
    pub id: VoteId,
    pub event_id: EventId,
    pub location_id: LocationId,
    pub location_name: String,
    pub window_start: i64,
    pub window_end: i64,
    pub created_at: i64,
    pub voter_ids: Vec<UserId>,
    pub voter_names: Vec<String>,
}

impl From<&VoteAggregate> for VoteAggregateView {
    fn from(aggregate: &VoteAggregate) -> Self {
        Self {
            id: aggregate.id,
            event_id: aggregate.event_id,
            location_id: aggregate.location_id,
            location_name: aggregate.location_name.clone(),
            window_start: aggregate.window_start,
            window_end: aggregate.window_end,
            created_at: aggregate.created_at,
            voter_ids: aggregate.voter_ids().collect(),
            voter_names: aggregate.voter_names().map(str::to_owned).collect(),
        }
    }
}

impl From<VoteAggregate> for VoteAggregateView {
    fn from(aggregate: VoteAggregate) -> Self {
        Self::from(&aggregate)
    }
}
