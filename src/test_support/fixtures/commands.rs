// Shared test fixture for the CastVote command.
// Included in the crate only during tests through `test_support` in `src/lib.rs`.

use crate::core::meetup::decider::cast_vote::command::CastVote;
use crate::core::meetup::event::{EventId, LocationId, UserId};
use serde::Deserialize;
use std::fs;

// JSON -> DTO (transport shape)
#[derive(Debug, Clone, Deserialize)]
pub struct CastVoteDto {
    pub voter_id: UserId,
    pub voter_name: String,
    pub event_id: EventId,
    pub location_id: LocationId,
    pub want_vote: bool,
}

pub struct CastVoteBuilder {
    inner: CastVote,
}

impl Default for CastVoteBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl CastVoteBuilder {
    pub fn new() -> Self {
        let json_str =
            fs::read_to_string("./src/test_support/fixtures/json/cast_vote.json").unwrap();
        let dto: CastVoteDto = serde_json::from_str(&json_str).unwrap();

        Self {
            inner: CastVote {
                voter_id: dto.voter_id,
                voter_name: dto.voter_name,
                event_id: dto.event_id,
                location_id: dto.location_id,
                want_vote: dto.want_vote,
            },
        }
    }

    pub fn voter(mut self, id: UserId, name: impl Into<String>) -> Self {
        self.inner.voter_id = id;
        self.inner.voter_name = name.into();
        self
    }

    pub fn event_id(mut self, v: EventId) -> Self {
        self.inner.event_id = v;
        self
    }

    pub fn location_id(mut self, v: LocationId) -> Self {
        self.inner.location_id = v;
        self
    }

    pub fn unvote(mut self) -> Self {
        self.inner.want_vote = false;
        self
    }

    pub fn build(self) -> CastVote {
        self.inner
    }
}
