// Shared setup for the integration flows.
// Each test file pulls this in with `mod fixtures;`.

#![allow(dead_code)]

use chrono::{FixedOffset, Weekday};
use meetup_votes::adapters::clock::ManualClock;
use meetup_votes::adapters::in_memory::in_memory_directory::InMemoryDirectory;
use meetup_votes::adapters::in_memory::in_memory_transport::InMemoryTransport;
use meetup_votes::adapters::in_memory::in_memory_vote_repository::InMemoryVoteRepository;
use meetup_votes::application::command_handlers::cast_vote_handler::CastVoteHandler;
use meetup_votes::application::notifier::event_notifications::EventNotifications;
use meetup_votes::core::meetup::decider::cast_vote::command::CastVote;
use meetup_votes::core::meetup::event::{Event, Location, Schedule, UserId, WeekdayMask};
use std::sync::Arc;

/// 2024-01-02T00:00:00Z
pub const TUESDAY_MIDNIGHT: i64 = 1_704_153_600;
/// 2024-01-03T00:00:00Z
pub const WEDNESDAY_MIDNIGHT: i64 = 1_704_240_000;

/// An arbitrary instant for flows that do not care about the weekday.
pub const T_NOW: i64 = 1_700_000_000;

pub const OWNER: UserId = 1;
pub const ALICE: UserId = 2;
pub const BOB: UserId = 3;

pub const fn hours(h: i64) -> i64 {
    h * 3_600
}

pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

pub fn one_off_event(start_time: i64, voting_lead_time: i64) -> Event {
    Event {
        id: 1,
        schedule: Schedule::Once { start_time },
        voting_lead_time,
        owner_id: OWNER,
        member_ids: [ALICE, BOB].into_iter().collect(),
        is_active: true,
    }
}

pub fn wednesday_evening_event() -> Event {
    Event {
        schedule: Schedule::Weekly {
            weekday_mask: WeekdayMask::of(&[Weekday::Wed]),
            day_time_utc: hours(18),
        },
        ..one_off_event(0, hours(2))
    }
}

pub fn location(id: u64, name: &str) -> Location {
    Location {
        id,
        event_id: 1,
        name: name.to_string(),
        is_active: true,
    }
}

pub fn vote(voter_id: UserId, location_id: u64, want_vote: bool) -> CastVote {
    CastVote {
        voter_id,
        voter_name: format!("User {voter_id}"),
        event_id: 1,
        location_id,
        want_vote,
    }
}

pub type Handler = CastVoteHandler<InMemoryDirectory, InMemoryVoteRepository, ManualClock>;

pub struct World {
    pub directory: Arc<InMemoryDirectory>,
    pub repository: Arc<InMemoryVoteRepository>,
    pub clock: Arc<ManualClock>,
    pub transport: Arc<InMemoryTransport>,
    pub handler: Handler,
}

pub async fn world(event: Event, now: i64) -> World {
    let directory = Arc::new(InMemoryDirectory::new());
    directory.upsert_event(event).await;
    directory.upsert_location(location(10, "Pizzeria")).await;
    directory.upsert_location(location(11, "Sushi Bar")).await;
    let repository = Arc::new(InMemoryVoteRepository::new());
    let clock = Arc::new(ManualClock::at(now));
    let transport = Arc::new(InMemoryTransport::new());
    let handler = CastVoteHandler::new(
        directory.clone(),
        repository.clone(),
        clock.clone(),
        EventNotifications::new(transport.clone()),
        utc(),
    );
    World {
        directory,
        repository,
        clock,
        transport,
        handler,
    }
}
