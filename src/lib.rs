//! Lighthouse Vigil - threat-event engine for a short survival mini-game
//!
//! Across one or more nights ("days"), the keeper must answer a small set of
//! scripted threats before a countdown or a rising danger metric resolves into
//! failure, then close out the day and continue or win.
//!
//! Core modules:
//! - `session`: deterministic game session (spawn scheduling, threat models,
//!   day progression, danger signal)
//!
//! Rendering, DOM controls, and page navigation are host concerns. The host
//! feeds the core a monotonic millisecond clock and discrete control inputs,
//! pulls a render frame each tick, and drains the notification outbox.

pub mod session;

pub use session::{
    ActiveThreat, BrightenKind, ControlId, DangerMonitor, DayConfig, DifficultyTable,
    FailureReason, FallingThreat, FieldLayout, FogThreat, GameSession, SessionEvent, SessionState,
    SpawnPlan, SpawnScheduler, ThreatFrame, ThreatKind,
};

/// Game tuning constants
pub mod consts {
    /// Correct resolutions needed before a day can end
    pub const REQUIRED_SUCCESS: u32 = 3;

    /// Fog darkness ceiling; reaching it ends the session
    pub const MAX_DARKNESS: f32 = 0.92;
    /// Darkness removed per tick once the fog is fading out
    pub const FOG_FADE_RATE: f32 = 0.02;
    /// Fading fog below this darkness counts as fully cleared
    pub const FOG_CLEAR_EPSILON: f32 = 0.002;
    /// Slack under `MAX_DARKNESS` at which the fog counts as overrun
    pub const FOG_OVERRUN_EPSILON: f32 = 0.001;
    /// Decorative wisps per fog event (cosmetic only)
    pub const FOG_WISP_COUNT: usize = 30;

    /// Falling threat size at the horizon (px)
    pub const FALLING_START_SIZE: f32 = 32.0;
    /// Falling threat size at the failure line (px)
    pub const FALLING_END_SIZE: f32 = 140.0;
    /// Failure line sits this many px above the bottom of the field
    pub const BOTTOM_MARGIN: f32 = 140.0;
    /// Fraction of the distance to screen center a falling threat drifts per tick
    pub const CENTER_DRIFT: f32 = 0.005;

    /// Threat progress / fog darkness fraction at which the danger alert raises
    pub const DANGER_THRESHOLD: f32 = 0.8;
}

/// Linear interpolation from `a` to `b` by `t` in [0, 1]
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
