// This module groups the meetup voting domain components.
//
// Structure
// - event.rs: events, schedules, locations and the id aliases they share
// - window.rs: pure voting window calculation
// - vote_aggregate.rs: per location, per occurrence tally and its read view
// - decider/: pure decision logic per command intent
// - notification.rs: change notifications and the packet sessions receive

pub mod event;
pub mod notification;
pub mod vote_aggregate;
pub mod window;
pub mod decider {
    pub mod cast_vote {
        pub mod command;
        pub mod decide;
    }
}
