// Voting window calculation.
//
// Purpose
// - Compute the interval in which votes for the current occurrence of an event are accepted.
//
// Rules
// - One-off events: the window ends at the start time.
// - Weekly events: the window ends at the configured UTC day time of the current UTC day,
//   provided today is one of the selected weekdays.
// - The window opens `voting_lead_time` seconds before it ends. Both bounds are inclusive.
// - Bounds saturate at the ends of the i64 range.
//
// Boundaries
// - Pure and total. No input or output, no clock access.

use crate::core::meetup::event::{Event, SECONDS_PER_DAY, Schedule};
use chrono::{DateTime, Datelike, FixedOffset, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VotingWindow {
    pub start: i64,
    pub end: i64,
}

impl VotingWindow {
    fn ending_at(end: i64, lead_time: i64) -> Self {
        Self {
            start: end.saturating_sub(lead_time),
            end,
        }
    }

    pub fn contains(&self, t: i64) -> bool {
        self.start <= t && t <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowResult {
    Window(VotingWindow),
    NoOccurrenceToday,
}

/// The weekday of `now`, reckoned in `offset`. `None` when `now` is beyond chrono's range.
pub fn weekday_at(now: i64, offset: FixedOffset) -> Option<Weekday> {
    DateTime::from_timestamp(now, 0).map(|utc| utc.with_timezone(&offset).weekday())
}

pub fn window_for(event: &Event, now: i64, weekday_offset: FixedOffset) -> WindowResult {
    match event.schedule {
        Schedule::Once { start_time } => {
            WindowResult::Window(VotingWindow::ending_at(start_time, event.voting_lead_time))
        }
        Schedule::Weekly {
            weekday_mask,
            day_time_utc,
        } => {
            let Some(today) = weekday_at(now, weekday_offset) else {
                return WindowResult::NoOccurrenceToday;
            };
            if !weekday_mask.contains(today) {
                return WindowResult::NoOccurrenceToday;
            }
            let day_anchor = now.div_euclid(SECONDS_PER_DAY) * SECONDS_PER_DAY;
            WindowResult::Window(VotingWindow::ending_at(
                day_anchor.saturating_add(day_time_utc),
                event.voting_lead_time,
            ))
        }
    }
}
