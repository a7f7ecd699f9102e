//! Day-indexed difficulty tuning
//!
//! Every timing constant in the session scales with the current day. The
//! curve is data, not code: adding a fourth day is an edit to the table, the
//! state machine never changes. Later entries must shorten the spawn interval
//! and raise the fog darken rate and falling speeds.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Immutable per-day timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayConfig {
    /// Day number (1-based)
    pub day: u32,
    /// Quiet time between threats; the scheduler fires strictly after this
    pub spawn_interval_ms: u64,
    /// Base fog darken rate per tick
    pub fog_darken_base: f32,
    /// Uniform jitter added to the base rate, drawn once per fog event
    pub fog_darken_jitter: f32,
    /// Slowest falling descent, px per tick
    pub falling_speed_min: f32,
    /// Fastest falling descent, px per tick
    pub falling_speed_max: f32,
}

impl DayConfig {
    /// Range a fog event's darken rate is drawn from
    pub fn fog_darken_range(&self) -> Range<f32> {
        self.fog_darken_base..self.fog_darken_base + self.fog_darken_jitter
    }

    /// Range a falling threat's speed is drawn from
    pub fn falling_speed_range(&self) -> Range<f32> {
        self.falling_speed_min..self.falling_speed_max
    }
}

/// Built-in three-day curve
const DAY_TABLE: [DayConfig; 3] = [
    DayConfig {
        day: 1,
        spawn_interval_ms: 5000,
        fog_darken_base: 0.004,
        fog_darken_jitter: 0.002,
        falling_speed_min: 0.4,
        falling_speed_max: 1.0,
    },
    DayConfig {
        day: 2,
        spawn_interval_ms: 4000,
        fog_darken_base: 0.006,
        fog_darken_jitter: 0.002,
        falling_speed_min: 0.65,
        falling_speed_max: 1.35,
    },
    DayConfig {
        day: 3,
        spawn_interval_ms: 3200,
        fog_darken_base: 0.008,
        fog_darken_jitter: 0.002,
        falling_speed_min: 0.9,
        falling_speed_max: 1.7,
    },
];

/// Ordered day → config mapping, consulted once per day start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTable {
    days: Vec<DayConfig>,
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            days: DAY_TABLE.to_vec(),
        }
    }
}

impl DifficultyTable {
    /// Build a table from explicit entries. Entries must be in day order;
    /// an empty table falls back to the built-in curve.
    pub fn new(days: Vec<DayConfig>) -> Self {
        if days.is_empty() {
            return Self::default();
        }
        debug_assert!(days.windows(2).all(|w| w[0].day < w[1].day));
        Self { days }
    }

    /// Config for a day, clamped to the last entry for days past the table
    pub fn config_for(&self, day: u32) -> DayConfig {
        let idx = day.saturating_sub(1).min(self.days.len() as u32 - 1);
        self.days[idx as usize]
    }

    /// The day whose completion wins the game
    pub fn final_day(&self) -> u32 {
        self.days.len() as u32
    }
}
