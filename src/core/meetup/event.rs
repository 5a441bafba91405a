// Meetup events and their locations as seen by the voting core.
//
// Purpose
// - Describe when an event happens (once, or weekly on selected days) and who takes part.
//
// Boundaries
// - Read-only inputs. Creating or editing events and locations happens outside this crate.
// - Entities reference each other by id only.
//
// Timestamps
// - All i64 values are epoch seconds, day times are seconds since UTC midnight.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub type UserId = u64;
pub type EventId = u64;
pub type LocationId = u64;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// Seven bit set of weekdays, Monday is bit 0 and Sunday is bit 6.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekdayMask(u8);

impl WeekdayMask {
    pub const ALL_BITS: u8 = 0b0111_1111;

    pub fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL_BITS)
    }

    pub fn of(days: &[Weekday]) -> Self {
        days.iter().fold(Self::default(), |mask, day| mask.with(*day))
    }

    pub fn with(self, day: Weekday) -> Self {
        Self(self.0 | Self::bit(day))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & Self::bit(day) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn bit(day: Weekday) -> u8 {
        1 << day.num_days_from_monday()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Schedule {
    Once {
        start_time: i64,
    },
    Weekly {
        weekday_mask: WeekdayMask,
        day_time_utc: i64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub schedule: Schedule,
    /// Seconds before the end of the window that voting opens.
    pub voting_lead_time: i64,
    pub owner_id: UserId,
    /// Active members only. The owner is not implied.
    pub member_ids: BTreeSet<UserId>,
    pub is_active: bool,
}

impl Event {
    /// Owner and members, each counted once.
    pub fn recipient_ids(&self) -> BTreeSet<UserId> {
        let mut recipients = self.member_ids.clone();
        recipients.insert(self.owner_id);
        recipients
    }

    pub fn is_owner_or_member(&self, user_id: UserId) -> bool {
        self.owner_id == user_id || self.member_ids.contains(&user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub event_id: EventId,
    pub name: String,
    pub is_active: bool,
}
