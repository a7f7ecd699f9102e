//! Spawn plan and scheduler
//!
//! Each day runs the three threat kinds exactly once, in a permutation fixed
//! at day start. The scheduler fires a threat only while the session is
//! between events and strictly more than the day's spawn interval has
//! elapsed since the last spawn or resolution. Elapsed time carries over a
//! "just missed" tick; it never resets without an event boundary.

use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DayConfig;
use super::falling::FallingThreat;
use super::fog::FogThreat;
use super::state::{ActiveThreat, FieldLayout, ThreatKind};

/// Ordered permutation of the day's threats, consumed front to back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPlan {
    order: [ThreatKind; 3],
    next_index: usize,
}

impl SpawnPlan {
    /// The scripted order: fog, boat, tsunami
    pub fn fixed() -> Self {
        Self {
            order: [
                ThreatKind::Fog,
                ThreatKind::FallingBoat,
                ThreatKind::FallingTsunami,
            ],
            next_index: 0,
        }
    }

    /// Shuffle the three kinds once; the permutation is fixed thereafter
    pub fn shuffled(rng: &mut Pcg32) -> Self {
        let mut plan = Self::fixed();
        plan.order.shuffle(rng);
        plan
    }

    /// Next kind to spawn, if any remain
    pub fn peek(&self) -> Option<ThreatKind> {
        self.order.get(self.next_index).copied()
    }

    /// Consume and return the next kind
    pub fn advance(&mut self) -> Option<ThreatKind> {
        let kind = self.peek()?;
        self.next_index += 1;
        Some(kind)
    }

    pub fn exhausted(&self) -> bool {
        self.next_index >= self.order.len()
    }

    pub fn order(&self) -> &[ThreatKind; 3] {
        &self.order
    }
}

/// Decides when the next threat in the plan begins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnScheduler {
    plan: SpawnPlan,
    /// Set on the first tick, on each spawn, and when a threat clears
    last_spawn_ms: Option<u64>,
}

impl SpawnScheduler {
    pub fn new(plan: SpawnPlan) -> Self {
        Self {
            plan,
            last_spawn_ms: None,
        }
    }

    /// Start (or restart) the interval timer from `now`
    pub fn arm(&mut self, now_ms: u64) {
        self.last_spawn_ms = Some(now_ms);
    }

    pub fn plan(&self) -> &SpawnPlan {
        &self.plan
    }

    pub fn exhausted(&self) -> bool {
        self.plan.exhausted()
    }

    /// Fire the next threat if the plan has one left and strictly more than
    /// the spawn interval has elapsed. The caller guarantees no threat is
    /// currently live.
    pub fn try_spawn(
        &mut self,
        now_ms: u64,
        config: &DayConfig,
        field: &FieldLayout,
        rng: &mut Pcg32,
    ) -> Option<ActiveThreat> {
        self.plan.peek()?;
        let last = *self.last_spawn_ms.get_or_insert(now_ms);
        if now_ms.saturating_sub(last) <= config.spawn_interval_ms {
            return None;
        }

        let kind = self.plan.advance()?;
        self.last_spawn_ms = Some(now_ms);
        let threat = match kind {
            ThreatKind::Fog => ActiveThreat::Fog(FogThreat::spawn(config, field, rng)),
            falling => ActiveThreat::Falling(FallingThreat::spawn(falling, config, field, rng)),
        };
        Some(threat)
    }
}
