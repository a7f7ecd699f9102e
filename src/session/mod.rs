//! Deterministic game session
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One logical tick at a time, driven by the host's monotonic clock
//! - Seeded RNG only (spawn order, per-threat speed, darken-rate jitter)
//! - Inputs queued and applied at a single point per tick
//! - No rendering or platform dependencies

pub mod danger;
pub mod difficulty;
pub mod events;
pub mod falling;
pub mod fog;
pub mod spawn;
pub mod state;
pub mod tick;

pub use danger::DangerMonitor;
pub use difficulty::{DayConfig, DifficultyTable};
pub use events::{BrightenKind, FailureReason, SessionEvent, ThreatFrame};
pub use falling::FallingThreat;
pub use fog::{FogStep, FogThreat, FogWisp};
pub use spawn::{SpawnPlan, SpawnScheduler};
pub use state::{ActiveThreat, ControlId, FieldLayout, GameSession, SessionState, ThreatKind};
