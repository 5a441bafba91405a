// Clock adapters.
//
// - SystemClock reads the wall clock in UTC epoch seconds.
// - ManualClock holds a settable instant for tests and simulations.

use crate::core::ports::Clock;
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn at(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod clock_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn it_should_read_a_plausible_wall_clock() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.now() > 1_577_836_800);
    }

    #[rstest]
    fn it_should_move_the_manual_clock() {
        let clock = ManualClock::at(100);
        clock.advance(5);
        assert_eq!(clock.now(), 105);
        clock.set(7);
        assert_eq!(clock.now(), 7);
    }
}
