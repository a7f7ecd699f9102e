//! Fog event model
//!
//! Fog darkens the field a little each tick. If darkness reaches the ceiling
//! the session ends; the light control flips the fog into fade-out instead.
//! Success is credited the moment the fade begins - the visual fade then
//! completes in the background and only gates the spawn scheduler, never
//! progress.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DayConfig;
use super::state::FieldLayout;
use crate::consts::*;

/// One decorative fog blob. Cosmetic only - game logic never reads these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FogWisp {
    pub pos: Vec2,
    pub radius: f32,
    /// Per-wisp offset so the drift of each blob is out of phase
    pub phase: f32,
}

/// Outcome of advancing the fog by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FogStep {
    /// Still darkening
    Thickening,
    /// Fading out, not yet clear
    Fading,
    /// Fade complete; the threat is resolved and can be removed
    Cleared,
    /// Darkness hit the ceiling; the session has failed
    Overrun,
}

/// The ambient fog hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FogThreat {
    /// Current darkness in [0, MAX_DARKNESS]
    pub darkness: f32,
    /// Darkness added per tick while thickening; drawn once at spawn
    pub darken_rate: f32,
    /// True once the light control has been used
    pub fade_out: bool,
    /// Darkness removed per tick while fading
    pub fade_rate: f32,
    /// Decorative blob field
    pub wisps: Vec<FogWisp>,
}

impl FogThreat {
    /// Spawn fresh fog with a day-scaled darken rate and a random wisp field
    /// banded around the horizon.
    pub fn spawn(config: &DayConfig, field: &FieldLayout, rng: &mut Pcg32) -> Self {
        let min_y = (field.horizon_y - 150.0).max(0.0);
        let max_y = (field.horizon_y + field.height * 0.25).min(field.height);
        let wisps = (0..FOG_WISP_COUNT)
            .map(|_| FogWisp {
                pos: Vec2::new(
                    rng.random_range(0.0..field.width),
                    rng.random_range(min_y..max_y),
                ),
                radius: rng.random_range(60.0..260.0),
                phase: rng.random_range(0.0..1000.0),
            })
            .collect();
        Self {
            darkness: 0.0,
            darken_rate: rng.random_range(config.fog_darken_range()),
            fade_out: false,
            fade_rate: FOG_FADE_RATE,
            wisps,
        }
    }

    /// Advance one tick: darken or fade, and drift the wisps.
    pub fn advance(&mut self, now_ms: u64) -> FogStep {
        self.drift_wisps(now_ms);

        if self.fade_out {
            self.darkness = (self.darkness - self.fade_rate).max(0.0);
            if self.darkness <= FOG_CLEAR_EPSILON {
                FogStep::Cleared
            } else {
                FogStep::Fading
            }
        } else {
            self.darkness = (self.darkness + self.darken_rate).min(MAX_DARKNESS);
            if self.darkness >= MAX_DARKNESS - FOG_OVERRUN_EPSILON {
                FogStep::Overrun
            } else {
                FogStep::Thickening
            }
        }
    }

    /// Begin fading out. Returns `true` only the first time, and only while
    /// the fog has not yet overrun; the caller credits progress on `true`.
    pub fn begin_fade(&mut self) -> bool {
        if self.fade_out || self.darkness >= MAX_DARKNESS - FOG_OVERRUN_EPSILON {
            return false;
        }
        self.fade_out = true;
        true
    }

    fn drift_wisps(&mut self, now_ms: u64) {
        let t = now_ms as f32;
        for wisp in &mut self.wisps {
            wisp.pos.x += (t * 0.0006 + wisp.phase).sin() * 0.3;
            wisp.pos.y += (t * 0.00045 + wisp.phase).cos() * 0.12;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn fog(darken_rate: f32) -> FogThreat {
        FogThreat {
            darkness: 0.0,
            darken_rate,
            fade_out: false,
            fade_rate: FOG_FADE_RATE,
            wisps: Vec::new(),
        }
    }

    #[test]
    fn spawn_draws_rate_from_day_range() {
        let config = super::super::DifficultyTable::default().config_for(2);
        let field = FieldLayout::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let f = FogThreat::spawn(&config, &field, &mut rng);
        assert!(f.darken_rate >= config.fog_darken_base);
        assert!(f.darken_rate < config.fog_darken_base + config.fog_darken_jitter);
        assert_eq!(f.wisps.len(), FOG_WISP_COUNT);
        assert_eq!(f.darkness, 0.0);
        assert!(!f.fade_out);
    }

    #[test]
    fn unanswered_fog_overruns() {
        let mut f = fog(0.01);
        let mut now = 0;
        loop {
            now += 16;
            match f.advance(now) {
                FogStep::Thickening => assert!(f.darkness < MAX_DARKNESS),
                FogStep::Overrun => break,
                step => panic!("unexpected step {step:?}"),
            }
        }
        assert!(f.darkness >= MAX_DARKNESS - FOG_OVERRUN_EPSILON);
    }

    #[test]
    fn fade_runs_monotonically_to_clear() {
        let mut f = fog(0.01);
        let mut now = 0;
        for _ in 0..40 {
            now += 16;
            f.advance(now);
        }
        assert!(f.begin_fade());
        let mut last = f.darkness;
        loop {
            now += 16;
            match f.advance(now) {
                FogStep::Fading => {
                    assert!(f.darkness < last);
                    last = f.darkness;
                }
                FogStep::Cleared => break,
                step => panic!("unexpected step {step:?}"),
            }
        }
        assert!(f.darkness <= FOG_CLEAR_EPSILON);
    }

    #[test]
    fn begin_fade_fires_only_once() {
        let mut f = fog(0.01);
        f.advance(16);
        assert!(f.begin_fade());
        assert!(!f.begin_fade());
    }

    #[test]
    fn begin_fade_refused_after_overrun() {
        let mut f = fog(1.0);
        assert_eq!(f.advance(16), FogStep::Overrun);
        assert!(!f.begin_fade());
    }
}
