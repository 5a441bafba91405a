// Shared builders for unit tests.
//
// - events: events, locations and the fixed instants the window tests reason about
// - commands: the CastVote command

pub mod commands;
pub mod events;
