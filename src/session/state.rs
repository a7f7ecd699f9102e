//! Session state and core types
//!
//! One [`GameSession`] owns every mutable field of the core: the day config,
//! the spawn scheduler, the at-most-one active threat, progress, and the
//! notification outbox. Nothing outside this module mutates any of it.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::danger::DangerMonitor;
use super::difficulty::{DayConfig, DifficultyTable};
use super::events::{SessionEvent, ThreatFrame};
use super::falling::FallingThreat;
use super::fog::FogThreat;
use super::spawn::{SpawnPlan, SpawnScheduler};

/// The three scripted hazards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreatKind {
    /// Ambient darkness; answered with the lighthouse beam
    Fog,
    /// A drifting boat descending toward the shore
    FallingBoat,
    /// The tsunami/starfish content variant; answered with the siren
    FallingTsunami,
}

impl ThreatKind {
    /// Control that resolves this threat
    pub fn matching_control(&self) -> ControlId {
        match self {
            ThreatKind::Fog => ControlId::Light,
            ThreatKind::FallingBoat => ControlId::Boat,
            ThreatKind::FallingTsunami => ControlId::Siren,
        }
    }

    /// True for the two kinds that share the falling model
    pub fn is_falling(&self) -> bool {
        !matches!(self, ThreatKind::Fog)
    }
}

/// The four control affordances the host can activate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlId {
    Light,
    Boat,
    Siren,
    /// Ends the day; valid only while waiting to advance
    Sleep,
}

/// Top-level session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// A day is about to start
    Idle,
    /// Between threats, waiting on the spawn interval
    Spawning,
    /// Exactly one threat is live
    EventActive,
    /// All threats resolved; waiting for the sleep control
    WaitingToAdvance,
    /// Sleep received; the next tick starts the following day or wins
    Transitioning,
    /// Terminal. No further ticks or inputs are processed.
    Ended { won: bool },
}

/// The at-most-one live threat, polymorphic over the two shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ActiveThreat {
    Falling(FallingThreat),
    Fog(FogThreat),
}

impl ActiveThreat {
    pub fn kind(&self) -> ThreatKind {
        match self {
            ActiveThreat::Falling(f) => f.kind,
            ActiveThreat::Fog(_) => ThreatKind::Fog,
        }
    }

    /// Render snapshot for this tick
    pub fn frame(&self) -> ThreatFrame {
        match self {
            ActiveThreat::Falling(f) => ThreatFrame::Falling {
                kind: f.kind,
                pos: f.pos,
                size: f.size(),
            },
            ActiveThreat::Fog(f) => ThreatFrame::Fog {
                darkness: f.darkness,
                fading: f.fade_out,
            },
        }
    }
}

/// Host-supplied field geometry, immutable for the session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldLayout {
    pub width: f32,
    pub height: f32,
    /// Y of the ocean's top edge; falling threats start here
    pub horizon_y: f32,
}

impl FieldLayout {
    /// Build from the field size and the ocean band height measured up from
    /// the bottom, the form hosts usually have at hand.
    pub fn new(width: f32, height: f32, ocean_height: f32) -> Self {
        Self {
            width,
            height,
            horizon_y: height - ocean_height,
        }
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    /// Vertical failure line for falling threats
    #[inline]
    pub fn bottom_threshold(&self) -> f32 {
        self.height - crate::consts::BOTTOM_MARGIN
    }
}

impl Default for FieldLayout {
    fn default() -> Self {
        // 720p field with the ocean filling the lower 40%
        Self::new(1280.0, 720.0, 288.0)
    }
}

/// One playable session: a run of consecutive days until a win or a loss
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Run seed for reproducibility
    seed: u64,
    pub(super) rng: Pcg32,
    table: DifficultyTable,
    pub(super) field: FieldLayout,
    pub(super) day: u32,
    pub(super) config: DayConfig,
    pub(super) state: SessionState,
    pub(super) success_count: u32,
    pub(super) threat: Option<ActiveThreat>,
    pub(super) scheduler: SpawnScheduler,
    pub(super) danger: DangerMonitor,
    /// Timestamp of the last accepted tick; repeats are ignored
    pub(super) last_tick_ms: Option<u64>,
    /// Inputs queued between ticks, applied atomically at the next tick
    pub(super) pending_inputs: Vec<ControlId>,
    pub(super) events: Vec<SessionEvent>,
}

impl GameSession {
    /// Start a session on `day` with the built-in difficulty table. The host
    /// supplies day identity and the seed once; the core never re-derives
    /// them mid-session.
    pub fn new(day: u32, seed: u64, field: FieldLayout) -> Self {
        Self::with_table(day, seed, field, DifficultyTable::default())
    }

    /// Start a session with a custom difficulty table
    pub fn with_table(day: u32, seed: u64, field: FieldLayout, table: DifficultyTable) -> Self {
        let day = day.max(1);
        let config = table.config_for(day);
        let mut rng = Pcg32::seed_from_u64(seed);
        let scheduler = SpawnScheduler::new(SpawnPlan::shuffled(&mut rng));
        log::info!("session start: day {day}, seed {seed}");
        Self {
            seed,
            rng,
            table,
            field,
            day,
            config,
            state: SessionState::Idle,
            success_count: 0,
            threat: None,
            scheduler,
            danger: DangerMonitor::default(),
            last_tick_ms: None,
            pending_inputs: Vec::new(),
            events: Vec::new(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn success_count(&self) -> u32 {
        self.success_count
    }

    pub fn field(&self) -> &FieldLayout {
        &self.field
    }

    pub fn day_config(&self) -> &DayConfig {
        &self.config
    }

    pub fn active_threat(&self) -> Option<&ActiveThreat> {
        self.threat.as_ref()
    }

    /// Render snapshot of the active threat, if any
    pub fn frame(&self) -> Option<ThreatFrame> {
        self.threat.as_ref().map(ActiveThreat::frame)
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.state, SessionState::Ended { .. })
    }

    /// Drain the notification outbox
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Re-derive the day config and reset per-day state when a new day begins
    pub(super) fn begin_day(&mut self, day: u32) {
        self.day = day;
        self.config = self.table.config_for(day);
        self.success_count = 0;
        self.threat = None;
        let plan = SpawnPlan::shuffled(&mut self.rng);
        self.scheduler = SpawnScheduler::new(plan);
        self.state = SessionState::Idle;
    }

    pub(super) fn final_day(&self) -> u32 {
        self.table.final_day()
    }
}
