//! Falling threat model
//!
//! A falling object appears small at the horizon and descends toward a fixed
//! failure line near the bottom of the field, growing as it falls. Crossing
//! the line ends the session; the matching control removes the threat first.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DayConfig;
use super::state::{FieldLayout, ThreatKind};
use crate::consts::*;
use crate::lerp;

/// A single falling threat. Speed is drawn once at spawn and never changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FallingThreat {
    /// Which falling hazard this is (rendering hint; physics is shared)
    pub kind: ThreatKind,
    /// Center position
    pub pos: Vec2,
    /// Vertical start, centered on the horizon line
    pub start_y: f32,
    /// Failure line; `y > end_y` ends the session
    pub end_y: f32,
    /// Rendered size at `start_y` (px)
    pub start_size: f32,
    /// Rendered size at `end_y` (px)
    pub end_size: f32,
    /// Descent speed, px per tick
    pub speed: f32,
}

impl FallingThreat {
    /// Spawn at a random x within the middle 80% of the field, sitting on the
    /// horizon line, with a speed drawn from the day's range.
    pub fn spawn(kind: ThreatKind, config: &DayConfig, field: &FieldLayout, rng: &mut Pcg32) -> Self {
        debug_assert!(kind.is_falling());
        let x = rng.random_range(field.width * 0.1..field.width * 0.9);
        let start_y = field.horizon_y - FALLING_START_SIZE / 2.0;
        Self {
            kind,
            pos: Vec2::new(x, start_y),
            start_y,
            end_y: field.bottom_threshold(),
            start_size: FALLING_START_SIZE,
            end_size: FALLING_END_SIZE,
            speed: rng.random_range(config.falling_speed_range()),
        }
    }

    /// Advance one tick: descend by `speed` and drift a fraction of the
    /// remaining distance toward screen center (damped, never a snap).
    pub fn advance(&mut self, field: &FieldLayout) {
        self.pos.y += self.speed;
        self.pos.x += (field.center_x() - self.pos.x) * CENTER_DRIFT;
    }

    /// Vertical progress in [0, 1]. A degenerate `start_y == end_y` treats
    /// the denominator as 1 rather than dividing by zero.
    pub fn progress(&self) -> f32 {
        let mut denom = self.end_y - self.start_y;
        if denom.abs() < f32::EPSILON {
            denom = 1.0;
        }
        ((self.pos.y - self.start_y) / denom).clamp(0.0, 1.0)
    }

    /// Rendered size, interpolated by vertical progress
    #[inline]
    pub fn size(&self) -> f32 {
        lerp(self.start_size, self.end_size, self.progress())
    }

    /// True once the threat has crossed the failure line
    #[inline]
    pub fn breached(&self) -> bool {
        self.pos.y > self.end_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn threat(speed: f32) -> FallingThreat {
        FallingThreat {
            kind: ThreatKind::FallingBoat,
            pos: Vec2::new(300.0, 170.0),
            start_y: 170.0,
            end_y: 580.0,
            start_size: FALLING_START_SIZE,
            end_size: FALLING_END_SIZE,
            speed,
        }
    }

    #[test]
    fn spawn_sits_on_the_horizon() {
        let field = FieldLayout::default();
        let config = super::super::DifficultyTable::default().config_for(1);
        let mut rng = Pcg32::seed_from_u64(7);
        let t = FallingThreat::spawn(ThreatKind::FallingTsunami, &config, &field, &mut rng);
        assert_eq!(t.start_y, field.horizon_y - FALLING_START_SIZE / 2.0);
        assert_eq!(t.end_y, field.bottom_threshold());
        assert!(t.pos.x >= field.width * 0.1 && t.pos.x < field.width * 0.9);
        assert!(t.speed >= config.falling_speed_min && t.speed < config.falling_speed_max);
        assert_eq!(t.progress(), 0.0);
    }

    #[test]
    fn drift_moves_toward_center_without_overshoot() {
        let field = FieldLayout::default();
        let mut t = threat(0.5);
        t.pos.x = 100.0;
        let center = field.center_x();
        for _ in 0..2000 {
            let before = (t.pos.x - center).abs();
            t.advance(&field);
            let after = (t.pos.x - center).abs();
            assert!(after <= before);
        }
    }

    #[test]
    fn size_grows_from_start_to_end() {
        let field = FieldLayout::default();
        let mut t = threat(1.0);
        assert_eq!(t.size(), FALLING_START_SIZE);
        while !t.breached() {
            t.advance(&field);
        }
        assert_eq!(t.progress(), 1.0);
        assert_eq!(t.size(), FALLING_END_SIZE);
    }

    #[test]
    fn degenerate_geometry_does_not_divide_by_zero() {
        let mut t = threat(1.0);
        t.end_y = t.start_y;
        t.pos.y = t.start_y + 0.5;
        let p = t.progress();
        assert!(p.is_finite());
        assert!((0.0..=1.0).contains(&p));
    }

    proptest! {
        #[test]
        fn y_nondecreasing_and_progress_bounded(speed in 0.1f32..4.0, ticks in 1usize..3000) {
            let field = FieldLayout::default();
            let mut t = threat(speed);
            let mut last_y = t.pos.y;
            for _ in 0..ticks {
                t.advance(&field);
                prop_assert!(t.pos.y >= last_y);
                last_y = t.pos.y;
                let p = t.progress();
                prop_assert!((0.0..=1.0).contains(&p));
            }
        }
    }
}
