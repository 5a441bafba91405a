// Shared fixtures for events and locations.
// Included in the crate only during tests through `test_support` in `src/lib.rs`.

use crate::core::meetup::event::{
    Event, EventId, Location, LocationId, Schedule, UserId, WeekdayMask,
};
use chrono::Weekday;
use std::fs;

/// 2024-01-02T00:00:00Z
pub const TUESDAY_MIDNIGHT: i64 = 1_704_153_600;
/// 2024-01-03T00:00:00Z
pub const WEDNESDAY_MIDNIGHT: i64 = 1_704_240_000;

pub const fn hours(h: i64) -> i64 {
    h * 3_600
}

pub struct EventBuilder {
    inner: Event,
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl EventBuilder {
    /// One-off event on Wednesday 18:00 UTC, owner 100, members 101 and 102.
    pub fn new() -> Self {
        Self {
            inner: Event {
                id: 1,
                schedule: Schedule::Once {
                    start_time: WEDNESDAY_MIDNIGHT + hours(18),
                },
                voting_lead_time: hours(2),
                owner_id: 100,
                member_ids: [101, 102].into_iter().collect(),
                is_active: true,
            },
        }
    }

    /// Weekly on Wednesday at 18:00 UTC with a two hour lead time.
    pub fn weekly_wednesday_evening() -> Self {
        let json_str =
            fs::read_to_string("./src/test_support/fixtures/json/weekly_event.json").unwrap();
        Self {
            inner: serde_json::from_str(&json_str).unwrap(),
        }
    }

    pub fn id(mut self, v: EventId) -> Self {
        self.inner.id = v;
        self
    }

    pub fn once(mut self, start_time: i64) -> Self {
        self.inner.schedule = Schedule::Once { start_time };
        self
    }

    pub fn weekly(mut self, days: &[Weekday], day_time_utc: i64) -> Self {
        self.inner.schedule = Schedule::Weekly {
            weekday_mask: WeekdayMask::of(days),
            day_time_utc,
        };
        self
    }

    pub fn voting_lead_time(mut self, v: i64) -> Self {
        self.inner.voting_lead_time = v;
        self
    }

    pub fn owner(mut self, v: UserId) -> Self {
        self.inner.owner_id = v;
        self
    }

    pub fn members(mut self, v: &[UserId]) -> Self {
        self.inner.member_ids = v.iter().copied().collect();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.inner.is_active = false;
        self
    }

    pub fn build(self) -> Event {
        self.inner
    }
}

pub struct LocationBuilder {
    inner: Location,
}

impl Default for LocationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl LocationBuilder {
    pub fn new() -> Self {
        Self {
            inner: Location {
                id: 10,
                event_id: 1,
                name: "Pizzeria".to_string(),
                is_active: true,
            },
        }
    }

    pub fn id(mut self, v: LocationId) -> Self {
        self.inner.id = v;
        self
    }

    pub fn event_id(mut self, v: EventId) -> Self {
        self.inner.event_id = v;
        self
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.inner.name = v.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.inner.is_active = false;
        self
    }

    pub fn build(self) -> Location {
        self.inner
    }
}
