//! Proximity danger signal
//!
//! A derived flag raised when the active threat is close to causing failure:
//! fog at 80% of its ceiling and still thickening, or a falling threat at 80%
//! of its descent. The monitor keeps only the last emitted value so the host
//! UI gets one notification per edge, never a redundant repeat.

use serde::{Deserialize, Serialize};

use super::state::ActiveThreat;
use crate::consts::{DANGER_THRESHOLD, MAX_DARKNESS};

/// Edge-triggered on/off alert over the current threat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DangerMonitor {
    active: bool,
}

impl DangerMonitor {
    /// Stateless per-tick predicate
    pub fn assess(threat: Option<&ActiveThreat>) -> bool {
        match threat {
            Some(ActiveThreat::Fog(fog)) => {
                !fog.fade_out && fog.darkness >= DANGER_THRESHOLD * MAX_DARKNESS
            }
            Some(ActiveThreat::Falling(falling)) => falling.progress() >= DANGER_THRESHOLD,
            None => false,
        }
    }

    /// Recompute the signal; `Some(new_value)` only on a transition
    pub fn observe(&mut self, threat: Option<&ActiveThreat>) -> Option<bool> {
        let now = Self::assess(threat);
        if now != self.active {
            self.active = now;
            Some(now)
        } else {
            None
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
