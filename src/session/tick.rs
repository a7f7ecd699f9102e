//! Per-tick advancement and input application
//!
//! One logical tick owns all mutable session state. Control inputs arrive
//! asynchronously from the host but are queued and applied at a single point
//! at the start of the next tick, so a handler can never observe a
//! half-advanced session.

use super::events::{BrightenKind, FailureReason, SessionEvent};
use super::state::{ActiveThreat, ControlId, GameSession, SessionState};
use crate::consts::REQUIRED_SUCCESS;

/// What advancing the active threat produced this tick
enum ThreatStep {
    Breach,
    FogOverrun,
    FogCleared,
}

impl GameSession {
    /// Queue a control activation. It takes effect atomically at the start
    /// of the next tick. Queued inputs after the session has ended are
    /// dropped.
    pub fn queue_control(&mut self, control: ControlId) {
        if self.is_ended() {
            return;
        }
        self.pending_inputs.push(control);
    }

    /// Advance the session by one frame. `now_ms` must come from a monotonic
    /// clock; a timestamp at or before the last accepted one is a no-op, so
    /// a duplicated frame callback cannot double-advance state.
    pub fn tick(&mut self, now_ms: u64) {
        if self.is_ended() {
            return;
        }
        if let Some(last) = self.last_tick_ms {
            if now_ms <= last {
                return;
            }
        } else {
            // first tick: the quiet period before the first threat starts now
            self.scheduler.arm(now_ms);
        }
        self.last_tick_ms = Some(now_ms);

        for control in std::mem::take(&mut self.pending_inputs) {
            self.apply_control(control, now_ms);
        }

        if self.state == SessionState::Transitioning {
            self.advance_day(now_ms);
            if self.is_ended() {
                return;
            }
        }
        if self.state == SessionState::Idle {
            // a day starts spawning immediately
            self.state = SessionState::Spawning;
        }

        self.advance_threat(now_ms);
        if self.is_ended() {
            return;
        }

        if self.state == SessionState::Spawning && self.threat.is_none() {
            let field = self.field;
            if let Some(threat) = self.scheduler.try_spawn(now_ms, &self.config, &field, &mut self.rng)
            {
                log::info!("day {}: {:?} spawned", self.day, threat.kind());
                self.events.push(SessionEvent::ThreatSpawned(threat.kind()));
                self.threat = Some(threat);
                self.state = SessionState::EventActive;
            }
        }

        if let Some(on) = self.danger.observe(self.threat.as_ref()) {
            self.events.push(SessionEvent::DangerChanged(on));
        }
    }

    /// Advance the live threat, if any, and react to its outcome
    fn advance_threat(&mut self, now_ms: u64) {
        let field = self.field;
        let step = match self.threat.as_mut() {
            None => None,
            Some(ActiveThreat::Falling(falling)) => {
                falling.advance(&field);
                falling.breached().then_some(ThreatStep::Breach)
            }
            Some(ActiveThreat::Fog(fog)) => match fog.advance(now_ms) {
                super::fog::FogStep::Overrun => Some(ThreatStep::FogOverrun),
                super::fog::FogStep::Cleared => Some(ThreatStep::FogCleared),
                super::fog::FogStep::Thickening | super::fog::FogStep::Fading => None,
            },
        };

        match step {
            Some(ThreatStep::Breach) => self.fail(FailureReason::ThreatBreach),
            Some(ThreatStep::FogOverrun) => self.fail(FailureReason::FogOverrun),
            Some(ThreatStep::FogCleared) => {
                log::info!("day {}: fog cleared", self.day);
                self.threat = None;
                self.scheduler.arm(now_ms);
                // success was already credited when the fade began; if the
                // day is complete we are waiting to advance, not spawning
                if self.state == SessionState::EventActive {
                    self.state = SessionState::Spawning;
                }
            }
            None => {}
        }
    }

    fn apply_control(&mut self, control: ControlId, now_ms: u64) {
        match control {
            ControlId::Sleep => {
                if self.state == SessionState::WaitingToAdvance {
                    log::info!("day {} complete, sleeping", self.day);
                    self.state = SessionState::Transitioning;
                } else {
                    log::debug!("sleep ignored in {:?}", self.state);
                }
            }
            _ => self.resolve_threat(control, now_ms),
        }
    }

    /// Apply a non-sleep control to the live threat. A mismatched control,
    /// or any control while nothing is live, is a normal gameplay occurrence
    /// and is silently ignored.
    fn resolve_threat(&mut self, control: ControlId, now_ms: u64) {
        let Some(threat) = self.threat.as_mut() else {
            log::debug!("{control:?} ignored: no active threat");
            return;
        };

        let mut credited = false;
        let mut cleared = false;
        match threat {
            ActiveThreat::Fog(fog) => {
                if control == ControlId::Light {
                    credited = fog.begin_fade();
                }
            }
            ActiveThreat::Falling(falling) => {
                if control == falling.kind.matching_control() {
                    credited = true;
                    cleared = true;
                }
            }
        }

        if cleared {
            log::info!("day {}: {control:?} resolved the threat", self.day);
            self.threat = None;
            self.scheduler.arm(now_ms);
        }
        if credited {
            self.credit_success();
        } else if !cleared {
            log::debug!("{control:?} ignored: does not match the active threat");
        }
    }

    /// Record one correct resolution and move the state machine along
    fn credit_success(&mut self) {
        self.success_count += 1;
        debug_assert!(self.success_count <= REQUIRED_SUCCESS);
        self.events
            .push(SessionEvent::SkyBrighten(BrightenKind::Incremental));

        if self.success_count >= REQUIRED_SUCCESS {
            log::info!("day {}: all threats resolved", self.day);
            self.state = SessionState::WaitingToAdvance;
            self.events.push(SessionEvent::SkyBrighten(BrightenKind::Full));
        } else if self.threat.is_none() {
            self.state = SessionState::Spawning;
        }
        // a fading fog with the day unfinished stays EventActive until clear
    }

    /// A threat's failure condition fired. Fatal; there is no retry.
    fn fail(&mut self, reason: FailureReason) {
        log::info!("day {}: session failed: {reason:?}", self.day);
        self.threat = None;
        self.state = SessionState::Ended { won: false };
        if let Some(off) = self.danger.observe(None) {
            self.events.push(SessionEvent::DangerChanged(off));
        }
        self.events.push(SessionEvent::SessionEnded {
            won: false,
            reason: Some(reason),
        });
    }

    /// Leave `Transitioning`: start the next day, or win after the final one
    fn advance_day(&mut self, now_ms: u64) {
        if self.day >= self.final_day() {
            log::info!("day {} was the last: session won", self.day);
            self.threat = None;
            self.state = SessionState::Ended { won: true };
            self.events.push(SessionEvent::SessionEnded {
                won: true,
                reason: None,
            });
            return;
        }

        let next = self.day + 1;
        self.begin_day(next);
        self.scheduler.arm(now_ms);
        log::info!("advanced to day {next}");
        self.events.push(SessionEvent::DayAdvanced(next));
    }
}
