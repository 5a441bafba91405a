// Command data type for casting or withdrawing a location vote.
//
// Responsibilities
// - Carry input data for the decider to validate against the event schedule.
// - Be independent of transport layer details. The caller has already checked that the
//   voter is the owner or a member of the event.

use crate::core::meetup::event::{EventId, LocationId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastVote {
    pub voter_id: UserId,
    pub voter_name: String,
    pub event_id: EventId,
    pub location_id: LocationId,
    /// `true` to vote for the location, `false` to withdraw the vote.
    pub want_vote: bool,
}

#[cfg(test)]
mod cast_vote_command_tests {
    use super::*;
    use crate::test_support::fixtures::commands::CastVoteBuilder;
    use rstest::{fixture, rstest};

    #[fixture]
    fn cast_vote_command() -> CastVote {
        CastVoteBuilder::new().build()
    }

    #[rstest]
    fn it_should_create_the_command(cast_vote_command: CastVote) {
        assert_eq!(cast_vote_command.voter_id, 101);
        assert_eq!(cast_vote_command.voter_name, "Ada");
        assert!(cast_vote_command.want_vote);
    }
}
