// Pure decision function for casting a vote.
//
// Responsibilities
// - Reject votes for missing or inactive events and locations, or locations of another event.
// - Reject votes outside the voting window of the current occurrence.
// - On success, describe the aggregate to find or create and the ballot to apply.
// - Never perform input or output.

use crate::core::meetup::decider::cast_vote::command::CastVote;
use crate::core::meetup::event::{Event, Location};
use crate::core::meetup::vote_aggregate::{Ballot, NewVoteAggregate};
use crate::core::meetup::window::{WindowResult, window_for};
use chrono::FixedOffset;

#[derive(Debug, Clone, Copy, thiserror::Error, PartialEq, Eq)]
pub enum VoteRejected {
    #[error("invalid event or location")]
    InvalidEventOrLocation,

    #[error("outside of the voting time window")]
    OutsideVotingWindow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accepted {
        seed: NewVoteAggregate,
        ballot: Ballot,
    },
    Rejected {
        reason: VoteRejected,
    },
}

pub fn decide_cast_vote(
    event: Option<&Event>,
    location: Option<&Location>,
    command: CastVote,
    now: i64,
    weekday_offset: FixedOffset,
) -> Decision {
    let (event, location) = match (event, location) {
        (Some(event), Some(location))
            if event.is_active && location.is_active && location.event_id == event.id =>
        {
            (event, location)
        }
        _ => {
            return Decision::Rejected {
                reason: VoteRejected::InvalidEventOrLocation,
            };
        }
    };

    let window = match window_for(event, now, weekday_offset) {
        WindowResult::Window(window) if window.contains(now) => window,
        _ => {
            return Decision::Rejected {
                reason: VoteRejected::OutsideVotingWindow,
            };
        }
    };

    Decision::Accepted {
        seed: NewVoteAggregate {
            event_id: event.id,
            location_id: location.id,
            location_name: location.name.clone(),
            window,
            created_at: now,
        },
        ballot: Ballot {
            voter_id: command.voter_id,
            voter_name: command.voter_name,
            want_vote: command.want_vote,
        },
    }
}
