//! Notifications the session emits for the host renderer/UI
//!
//! Events accumulate in the session's outbox during a tick and are drained
//! with [`GameSession::take_events`](super::GameSession::take_events). They
//! are one-way: the host reads them, it never mutates session state through
//! them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::ThreatKind;

/// How much the sky brightens after a success
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrightenKind {
    /// One step per resolved threat
    Incremental,
    /// The full day-complete brightening
    Full,
}

/// Why a session ended in a loss. Failures are game outcomes, not faults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// A falling threat crossed the bottom threshold
    ThreatBreach,
    /// Fog darkness reached the maximum before fade began
    FogOverrun,
}

/// Outbox notification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// A new threat became active; the host should set up its visuals
    ThreatSpawned(ThreatKind),
    /// The proximity alert toggled (edge-triggered, never repeated)
    DangerChanged(bool),
    /// Brighten the sky
    SkyBrighten(BrightenKind),
    /// A new day began after the keeper slept
    DayAdvanced(u32),
    /// Terminal. No further ticks or inputs are processed.
    SessionEnded {
        won: bool,
        reason: Option<FailureReason>,
    },
}

/// Per-tick render snapshot of the active threat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ThreatFrame {
    /// Draw a falling object centered at `pos` with the interpolated `size`
    Falling {
        kind: ThreatKind,
        pos: Vec2,
        size: f32,
    },
    /// Draw the fog overlay at `darkness` opacity
    Fog { darkness: f32, fading: bool },
}
