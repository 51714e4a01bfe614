//! Auto-draw timer planning.
//!
//! The timer is derived from widget state: whenever the auto-draw flag or the
//! deck handle changes, the current timer (if any) is released and a new one
//! is armed only if the state still calls for it.

use std::fmt;

/// Ownership token for one armed repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    generation: u64,
}

impl TimerToken {
    #[allow(dead_code)]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.generation)
    }
}

/// What to do with the timer after a state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimerPlan {
    pub cancel: Option<TimerToken>,
    pub arm: Option<TimerToken>,
}

/// Whether the widget state calls for a running timer.
pub fn wants_timer(auto_draw: bool, deck_loaded: bool, exhausted: bool) -> bool {
    auto_draw && deck_loaded && !exhausted
}

/// Tear down `current` unconditionally, then arm a fresh timer if `wanted`.
pub fn plan_timer(current: Option<TimerToken>, wanted: bool, next_generation: u64) -> TimerPlan {
    TimerPlan {
        cancel: current,
        arm: wanted.then_some(TimerToken {
            generation: next_generation,
        }),
    }
}
