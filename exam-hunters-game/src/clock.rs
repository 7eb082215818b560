//! Day / period / action-point bookkeeping.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{DEFAULT_ACTIONS_PER_PERIOD, DEFAULT_TOTAL_DAYS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Morning,
    Day,
}

impl Period {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Day => "Day",
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Day => "day",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened when the clock rolled over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rollover {
    /// Morning ran out; the Day period of the same day began.
    PeriodAdvanced { day: u32 },
    /// A new day began and is still inside the schedule.
    DayStarted { day: u32 },
    /// The last scheduled day is over.
    ScheduleComplete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameClock {
    day: u32,
    period: Period,
    actions_remaining: u8,
    total_days: u32,
    actions_per_period: u8,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_DAYS, DEFAULT_ACTIONS_PER_PERIOD)
    }
}

impl GameClock {
    #[must_use]
    pub const fn new(total_days: u32, actions_per_period: u8) -> Self {
        Self {
            day: 1,
            period: Period::Morning,
            actions_remaining: actions_per_period,
            total_days,
            actions_per_period,
        }
    }

    #[must_use]
    pub const fn day(&self) -> u32 {
        self.day
    }

    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }

    #[must_use]
    pub const fn actions_remaining(&self) -> u8 {
        self.actions_remaining
    }

    #[must_use]
    pub const fn total_days(&self) -> u32 {
        self.total_days
    }

    /// Spend action points, saturating at zero.
    pub const fn spend(&mut self, cost: u8) {
        self.actions_remaining = self.actions_remaining.saturating_sub(cost);
    }

    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.actions_remaining == 0
    }

    /// `day > total_days`: the schedule has run out.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.day > self.total_days
    }

    /// Morning to Day on the same day with a fresh allowance.
    pub fn begin_day_period(&mut self) -> Rollover {
        self.period = Period::Day;
        self.actions_remaining = self.actions_per_period;
        log::debug!("day {} moves to the day period", self.day);
        Rollover::PeriodAdvanced { day: self.day }
    }

    /// Close the current day regardless of remaining points.
    pub fn end_day(&mut self) -> Rollover {
        self.day = self.day.saturating_add(1);
        self.period = Period::Morning;
        self.actions_remaining = self.actions_per_period;
        if self.is_complete() {
            log::debug!("schedule complete after day {}", self.total_days);
            Rollover::ScheduleComplete
        } else {
            log::debug!("day {} begins", self.day);
            Rollover::DayStarted { day: self.day }
        }
    }

    /// `Day 1, Morning (3 actions remaining)`
    #[must_use]
    pub fn time_label(&self) -> String {
        format!(
            "Day {}, {} ({} actions remaining)",
            self.day, self.period, self.actions_remaining
        )
    }
}
